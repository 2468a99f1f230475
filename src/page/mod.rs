//! Page lifecycle: owns every observer, listener and timer the page features
//! install, so `stop()` can release them together.

pub mod observers;
pub mod registry;
pub mod widgets;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, Window, window};

use crate::config::PageConfig;
use crate::console;
use observers::{ObserverSet, SharedTracker};
use registry::PageRegistry;
use widgets::ParticleTimer;

/// An attached event listener; keeps its closure alive until detached.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Same as `attach`, flagged passive (never calls `preventDefault`).
    pub fn attach_passive(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &opts,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    pub fn detach(self) {
        let callback = self.callback.as_ref().unchecked_ref();
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, callback);
    }
}

pub struct PageController {
    window: Window,
    document: Document,
    config: PageConfig,
    registry: Rc<PageRegistry>,
    /// Outlives `stop()`: sections revealed once stay revealed on restart.
    section_tracker: SharedTracker,
    observers: Rc<RefCell<ObserverSet>>,
    listeners: Vec<Listener>,
    particles: Option<ParticleTimer>,
    running: bool,
}

impl PageController {
    /// Resolve the browser globals and scan the document once.
    pub fn new(config: PageConfig) -> Result<Self, JsValue> {
        let window = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let registry = Rc::new(PageRegistry::scan(&document)?);
        let section_tracker = observers::section_tracker(&config);
        Ok(Self {
            window,
            document,
            config,
            registry,
            section_tracker,
            observers: Rc::new(RefCell::new(ObserverSet::default())),
            listeners: Vec::new(),
            particles: None,
            running: false,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Install every page feature. Starting twice is a no-op; a failure part
    /// way through releases whatever was already installed.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.running {
            return Ok(());
        }
        self.running = true;
        if let Err(e) = self.install() {
            self.stop();
            return Err(e);
        }
        console::info(&format!("started: {}", self.registry.summary()));
        Ok(())
    }

    fn install(&mut self) -> Result<(), JsValue> {
        let (win, doc, cfg) = (&self.window, &self.document, &self.config);
        let registry = &self.registry;
        {
            let mut set = self.observers.borrow_mut();
            let tracker = &self.section_tracker;
            observers::install_section_reveal(&mut set, win, registry, tracker, cfg)?;
            observers::install_timeline(&mut set, registry, cfg)?;
        }
        self.listeners.push(widgets::bind_scroll_progress(win, doc, registry)?);

        observers::install_nav_highlight(&mut self.observers.borrow_mut(), registry, cfg)?;
        self.listeners.extend(widgets::bind_nav_clicks(doc, registry)?);
        self.listeners.extend(widgets::bind_scroll_indicator(registry)?);

        if cfg.particles.enabled {
            self.particles = Some(ParticleTimer::start(win, doc, &cfg.particles)?);
        }
        self.listeners.extend(widgets::bind_modals(doc, registry)?);
        self.listeners.extend(widgets::bind_carousels(registry)?);

        match widgets::apply_reduced_motion(win, doc, cfg) {
            Ok(true) => console::info("reduced motion requested; animations shortened"),
            Ok(false) => {}
            Err(e) => console::warn_js("reduced motion query", &e),
        }

        let observers = self.observers.clone();
        self.listeners.push(Listener::attach(win, "beforeunload", move |_evt| {
            observers.borrow_mut().disconnect_all();
        })?);

        self.listeners.extend(widgets::play_hero(win, doc, registry)?);
        widgets::update_progress(win, doc, registry.progress_bar.as_ref());

        #[cfg(feature = "serde_json")]
        render_chart(doc, cfg);
        Ok(())
    }

    /// Disconnect observers, remove listeners, stop the particle timer.
    /// Already-scheduled reveal and particle-removal timeouts still run.
    pub fn stop(&mut self) {
        self.observers.borrow_mut().disconnect_all();
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        if let Some(timer) = self.particles.take() {
            timer.cancel(&self.window);
        }
        self.running = false;
    }
}

#[cfg(feature = "serde_json")]
fn render_chart(doc: &Document, cfg: &PageConfig) {
    if !cfg.chart.enabled {
        return;
    }
    match crate::chart::render(doc, &cfg.chart) {
        Ok(true) => {}
        Ok(false) => console::warn(&format!(
            "#{} not found; skill chart skipped",
            cfg.chart.canvas_id
        )),
        Err(e) => console::warn_js("skill chart (is Chart.js loaded?)", &e),
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        if self.running {
            self.stop();
        }
    }
}
