//! Click handlers and one-off page effects: nav scrolling, scroll indicator,
//! modals, carousels, particles, progress bar, reduced motion.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use super::Listener;
use super::observers::{ACTIVE, ANIMATE, add_class};
use super::registry::PageRegistry;
use crate::carousel::Carousel;
use crate::config::{PageConfig, ParticleConfig, timer_ms};
use crate::console;
use crate::modal::ModalPanel;
use crate::particles::{ParticleSpec, random_unit};
use crate::progress::{ThrottleGate, scroll_percent, width_style};

pub const HERO_LOADED: &str = "hero-loaded";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// --- Scroll progress ---------------------------------------------------------

pub fn update_progress(window: &Window, document: &Document, bar: Option<&HtmlElement>) {
    let Some(bar) = bar else { return };
    let offset = window.scroll_y().unwrap_or(0.0);
    let doc_h = document
        .body()
        .map(|b| b.scroll_height() as f64)
        .unwrap_or(0.0);
    let view_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let pct = scroll_percent(offset, doc_h, view_h);
    let _ = bar.style().set_property("width", &width_style(pct));
}

/// Passive scroll listener that coalesces updates into one per frame.
pub fn bind_scroll_progress(
    window: &Window,
    document: &Document,
    registry: &Rc<PageRegistry>,
) -> Result<Listener, JsValue> {
    let gate = Rc::new(RefCell::new(ThrottleGate::new()));
    let win = window.clone();
    let doc = document.clone();
    let registry = registry.clone();
    Listener::attach_passive(window, "scroll", move |_evt| {
        if !gate.borrow_mut().try_begin() {
            return;
        }
        let (w, d, r, g) = (win.clone(), doc.clone(), registry.clone(), gate.clone());
        let frame = Closure::once_into_js(move || {
            update_progress(&w, &d, r.progress_bar.as_ref());
            g.borrow_mut().finish();
        });
        if win.request_animation_frame(frame.unchecked_ref()).is_err() {
            gate.borrow_mut().finish();
        }
    })
}

// --- Navigation clicks -------------------------------------------------------

fn smooth_scroll(el: &Element, align_start: bool) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    if align_start {
        opts.set_block(ScrollLogicalPosition::Start);
    }
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

/// Every nav link suppresses its default navigation; links that point at a
/// section smooth-scroll to it.
pub fn bind_nav_clicks(
    document: &Document,
    registry: &Rc<PageRegistry>,
) -> Result<Vec<Listener>, JsValue> {
    let mut out = Vec::with_capacity(registry.nav_links.len());
    for (link, binding) in registry.nav_links.iter().zip(&registry.nav_bindings) {
        let id = binding.section_id.clone();
        let doc = document.clone();
        let registry = registry.clone();
        out.push(Listener::attach(link, "click", move |evt: Event| {
            evt.prevent_default();
            let Some(id) = id.as_deref() else { return };
            let target = match registry.section_by_id(id) {
                Some(s) => Some(s.element.clone()),
                None => doc.get_element_by_id(id),
            };
            if let Some(target) = target {
                smooth_scroll(&target, true);
            }
        })?);
    }
    Ok(out)
}

pub fn bind_scroll_indicator(registry: &Rc<PageRegistry>) -> Result<Option<Listener>, JsValue> {
    let Some(indicator) = registry.scroll_indicator.as_ref() else {
        return Ok(None);
    };
    let registry_cb = registry.clone();
    let listener = Listener::attach(indicator, "click", move |_evt| {
        if let Some(about) = registry_cb.about.as_ref() {
            smooth_scroll(about, false);
        }
    })?;
    Ok(Some(listener))
}

// --- Modals ------------------------------------------------------------------

fn sync_modal(overlay: &Element, panel: &ModalPanel) {
    let _ = overlay
        .class_list()
        .toggle_with_force(ACTIVE, panel.is_open());
}

pub fn bind_modals(
    document: &Document,
    registry: &Rc<PageRegistry>,
) -> Result<Vec<Listener>, JsValue> {
    let panels: Rc<RefCell<Vec<ModalPanel>>> = Rc::new(RefCell::new(
        registry
            .overlays
            .iter()
            .map(|o| {
                let mut p = ModalPanel::new();
                if o.class_list().contains(ACTIVE) {
                    p.open();
                }
                p
            })
            .collect(),
    ));
    let mut out = Vec::new();

    for opener in &registry.openers {
        let target = registry.resolve_modal_target(document, &opener.target);
        let (registry, panels) = (registry.clone(), panels.clone());
        out.push(Listener::attach(&opener.element, "click", move |_evt| {
            let Some(idx) = target else { return };
            let mut panels = panels.borrow_mut();
            panels[idx].open();
            sync_modal(&registry.overlays[idx], &panels[idx]);
        })?);
    }

    for (idx, overlay) in registry.overlays.iter().enumerate() {
        let (registry, panels) = (registry.clone(), panels.clone());
        out.push(Listener::attach(overlay, "click", move |evt: Event| {
            let overlay = &registry.overlays[idx];
            let exact = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|t| &t == overlay);
            let mut panels = panels.borrow_mut();
            if panels[idx].backdrop_click(exact) {
                sync_modal(overlay, &panels[idx]);
            }
        })?);
    }

    for button in &registry.close_buttons {
        let target = button.overlay;
        let (registry, panels) = (registry.clone(), panels.clone());
        out.push(Listener::attach(&button.element, "click", move |_evt| {
            let Some(idx) = target else { return };
            let mut panels = panels.borrow_mut();
            panels[idx].close();
            sync_modal(&registry.overlays[idx], &panels[idx]);
        })?);
    }
    Ok(out)
}

// --- Carousels ---------------------------------------------------------------

fn hide(el: Option<&Element>) {
    if let Some(el) = el.and_then(|e| e.dyn_ref::<HtmlElement>()) {
        let _ = el.style().set_property("display", "none");
    }
}

fn sync_images(images: &[Element], carousel: &Carousel) {
    for (img, on) in images.iter().zip(carousel.flags()) {
        let _ = img.class_list().toggle_with_force(ACTIVE, on);
    }
}

pub fn bind_carousels(registry: &Rc<PageRegistry>) -> Result<Vec<Listener>, JsValue> {
    let mut out = Vec::new();
    for (ci, entry) in registry.carousels.iter().enumerate() {
        let flags: Vec<bool> = entry
            .images
            .iter()
            .map(|img| img.class_list().contains(ACTIVE))
            .collect();
        let Some(carousel) = Carousel::from_flags(&flags) else {
            hide(entry.prev.as_ref());
            hide(entry.next.as_ref());
            continue;
        };
        sync_images(&entry.images, &carousel);
        let state = Rc::new(RefCell::new(carousel));

        if let Some(prev) = entry.prev.as_ref() {
            let (state, registry) = (state.clone(), registry.clone());
            out.push(Listener::attach(prev, "click", move |evt: Event| {
                evt.stop_propagation();
                let mut c = state.borrow_mut();
                c.retreat();
                sync_images(&registry.carousels[ci].images, &c);
            })?);
        }
        if let Some(next) = entry.next.as_ref() {
            let (state, registry) = (state.clone(), registry.clone());
            out.push(Listener::attach(next, "click", move |evt: Event| {
                evt.stop_propagation();
                let mut c = state.borrow_mut();
                c.advance();
                sync_images(&registry.carousels[ci].images, &c);
            })?);
        }
    }
    Ok(out)
}

// --- Particles ---------------------------------------------------------------

pub struct ParticleTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl ParticleTimer {
    pub fn start(
        window: &Window,
        document: &Document,
        cfg: &ParticleConfig,
    ) -> Result<Self, JsValue> {
        let (win, doc, cfg_cb) = (window.clone(), document.clone(), cfg.clone());
        let callback = Closure::wrap(Box::new(move || {
            if let Err(e) = spawn_particle(&win, &doc, &cfg_cb) {
                console::warn_js("particle", &e);
            }
        }) as Box<dyn FnMut()>);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timer_ms(cfg.spawn_interval_ms),
        )?;
        Ok(Self {
            handle,
            _callback: callback,
        })
    }

    pub fn cancel(self, window: &Window) {
        window.clear_interval_with_handle(self.handle);
    }
}

fn spawn_particle(
    window: &Window,
    document: &Document,
    cfg: &ParticleConfig,
) -> Result<(), JsValue> {
    let Some(body) = document.body() else {
        return Ok(());
    };
    let particle: HtmlElement = document.create_element("div")?.dyn_into()?;
    particle.set_class_name("particle");
    let style = particle.style();
    for (prop, value) in ParticleSpec::sample(cfg, random_unit).style_properties() {
        style.set_property(prop, &value)?;
    }
    body.append_child(&particle)?;

    let cleanup = Closure::once_into_js(move || particle.remove());
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cleanup.unchecked_ref(),
        timer_ms(cfg.lifetime_ms),
    )?;
    Ok(())
}

// --- Startup effects ---------------------------------------------------------

/// Shorten CSS animations when the OS asks for reduced motion. Read once.
pub fn apply_reduced_motion(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<bool, JsValue> {
    let Some(query) = window.match_media(REDUCED_MOTION_QUERY)? else {
        return Ok(false);
    };
    if !query.matches() {
        return Ok(false);
    }
    let root = document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(root) = root {
        root.style()
            .set_property("--animation-duration", &config.reduced_motion_duration)?;
    }
    Ok(true)
}

/// `#hero` animates immediately and gets `hero-loaded` once the window load
/// event fires (or right away if it already has).
pub fn play_hero(
    window: &Window,
    document: &Document,
    registry: &Rc<PageRegistry>,
) -> Result<Option<Listener>, JsValue> {
    let Some(hero) = registry.hero.as_ref() else {
        return Ok(None);
    };
    add_class(hero, ANIMATE);
    if document.ready_state() == "complete" {
        add_class(hero, HERO_LOADED);
        return Ok(None);
    }
    let hero_cb = hero.clone();
    let listener = Listener::attach(window, "load", move |_evt| {
        add_class(&hero_cb, HERO_LOADED)
    })?;
    Ok(Some(listener))
}
