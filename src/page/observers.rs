//! IntersectionObserver wiring for section reveals, timeline items and
//! navigation highlighting.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::config::{PageConfig, RevealTiming, timer_ms};
use crate::console;
use crate::nav::NavHighlighter;
use crate::page::registry::{PageRegistry, SectionEntry};
use crate::reveal::{RevealPlan, RevealTarget};
use crate::visibility::{Crossing, FirePolicy, Outcome, VisibilityTracker};

pub const ANIMATE: &str = "animate";
pub const ACTIVE: &str = "active";

type EntryFn = dyn FnMut(js_sys::Array, IntersectionObserver);
type EntryCallback = Closure<EntryFn>;
pub type SharedTracker = Rc<RefCell<VisibilityTracker<usize>>>;

/// A browser observer together with the closure it calls back into.
pub struct Observer {
    inner: IntersectionObserver,
    _callback: EntryCallback,
}

impl Observer {
    pub fn new(
        threshold: f64,
        root_margin: Option<&str>,
        mut on_entry: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
    ) -> Result<Self, JsValue> {
        let handler = move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_entry(&entry, &observer);
                }
            }
        };
        let callback: EntryCallback = Closure::wrap(Box::new(handler) as Box<EntryFn>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            init.set_root_margin(margin);
        }
        let inner =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self {
            inner,
            _callback: callback,
        })
    }

    /// Observer whose threshold comes from the tracker it reports to.
    fn for_tracker(
        tracker: &SharedTracker,
        root_margin: Option<&str>,
        on_entry: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
    ) -> Result<Self, JsValue> {
        let threshold = tracker.borrow().threshold();
        Self::new(threshold, root_margin, on_entry)
    }

    pub fn observe(&self, el: &Element) {
        self.inner.observe(el);
    }

    pub fn disconnect(&self) {
        self.inner.disconnect();
    }
}

/// The three trackers and their observers, released together on teardown.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Observer>,
    trackers: Vec<SharedTracker>,
}

impl ObserverSet {
    pub fn disconnect_all(&mut self) {
        for obs in self.observers.drain(..) {
            obs.disconnect();
        }
        for tracker in self.trackers.drain(..) {
            tracker.borrow_mut().release_all();
        }
    }

    fn push(&mut self, observer: Observer, tracker: SharedTracker) {
        self.observers.push(observer);
        self.trackers.push(tracker);
    }
}

/// Tracker for the section reveal. Owned by the page controller so a
/// section that already played its reveal stays revealed across restarts.
pub fn section_tracker(config: &PageConfig) -> SharedTracker {
    Rc::new(RefCell::new(VisibilityTracker::new(
        config.section_threshold,
        FirePolicy::Once,
    )))
}

/// Sections fire their staggered reveal once; later crossings are ignored
/// but the section stays observed.
pub fn install_section_reveal(
    set: &mut ObserverSet,
    window: &Window,
    registry: &Rc<PageRegistry>,
    tracker: &SharedTracker,
    config: &PageConfig,
) -> Result<(), JsValue> {
    let observer = {
        let hits = tracker.clone();
        let registry = registry.clone();
        let window = window.clone();
        let timing = config.reveal.clone();
        Observer::for_tracker(
            tracker,
            Some(config.section_root_margin.as_str()),
            move |entry, _| {
                let Some(idx) = registry.section_index(&entry.target()) else {
                    return;
                };
                let crossing = Crossing::from_intersecting(entry.is_intersecting());
                let outcome = hits.borrow_mut().on_crossing(&idx, crossing);
                if outcome == Outcome::Fire {
                    animate_section(&window, &registry.sections[idx], &timing);
                }
            },
        )?
    };
    for (idx, section) in registry.sections.iter().enumerate() {
        tracker.borrow_mut().observe(idx);
        observer.observe(&section.element);
    }
    set.push(observer, tracker.clone());
    Ok(())
}

/// Timeline items animate on first sight and are then unobserved.
pub fn install_timeline(
    set: &mut ObserverSet,
    registry: &Rc<PageRegistry>,
    config: &PageConfig,
) -> Result<(), JsValue> {
    let tracker: SharedTracker = Rc::new(RefCell::new(VisibilityTracker::new(
        config.timeline_threshold,
        FirePolicy::UntilFirstHit,
    )));
    let observer = {
        let hits = tracker.clone();
        let registry = registry.clone();
        Observer::for_tracker(&tracker, None, move |entry, observer| {
            let target = entry.target();
            let Some(idx) = registry.timeline_index(&target) else {
                return;
            };
            let crossing = Crossing::from_intersecting(entry.is_intersecting());
            let outcome = hits.borrow_mut().on_crossing(&idx, crossing);
            if outcome == Outcome::FireAndRelease {
                add_class(&target, ANIMATE);
                observer.unobserve(&target);
            }
        })?
    };
    for (idx, item) in registry.timeline_items.iter().enumerate() {
        tracker.borrow_mut().observe(idx);
        observer.observe(item);
    }
    set.push(observer, tracker);
    Ok(())
}

/// Nav links follow whichever section entered the viewport last.
pub fn install_nav_highlight(
    set: &mut ObserverSet,
    registry: &Rc<PageRegistry>,
    config: &PageConfig,
) -> Result<(), JsValue> {
    let tracker: SharedTracker = Rc::new(RefCell::new(VisibilityTracker::new(
        config.nav_threshold,
        FirePolicy::EveryCrossing,
    )));
    let highlighter = Rc::new(RefCell::new(NavHighlighter::new(
        registry.nav_bindings.clone(),
    )));
    let observer = {
        let hits = tracker.clone();
        let registry = registry.clone();
        Observer::for_tracker(&tracker, None, move |entry, _| {
            let Some(idx) = registry.section_index(&entry.target()) else {
                return;
            };
            let crossing = Crossing::from_intersecting(entry.is_intersecting());
            if hits.borrow_mut().on_crossing(&idx, crossing) != Outcome::Fire {
                return;
            }
            apply_nav_crossing(&registry, &mut highlighter.borrow_mut(), idx, crossing);
        })?
    };
    for (idx, section) in registry.sections.iter().enumerate() {
        tracker.borrow_mut().observe(idx);
        observer.observe(&section.element);
    }
    set.push(observer, tracker);
    Ok(())
}

/// Feed a crossing of section `idx` to the highlighter and mirror the
/// resulting flags onto the registry's nav links.
pub fn apply_nav_crossing(
    registry: &PageRegistry,
    highlighter: &mut NavHighlighter,
    idx: usize,
    crossing: Crossing,
) {
    let Some(section) = registry.sections.get(idx) else {
        return;
    };
    let Some(flags) = highlighter.on_crossing(&section.id, crossing) else {
        return;
    };
    for (link, on) in registry.nav_links.iter().zip(flags) {
        let _ = link.class_list().toggle_with_force(ACTIVE, on);
    }
}

/// Mark the section in the next animation frame, then its header and cards
/// on their staggered delays. Scheduled callbacks are not cancelled.
fn animate_section(window: &Window, section: &SectionEntry, timing: &RevealTiming) {
    let plan = RevealPlan::for_section(section.header.is_some(), section.cards.len(), timing);
    let element = section.element.clone();
    let header = section.header.clone();
    let cards = section.cards.clone();
    let win = window.clone();
    let frame = Closure::once_into_js(move || {
        for step in plan.steps() {
            let target = match step.target {
                RevealTarget::Section => Some(&element),
                RevealTarget::Header => header.as_ref(),
                RevealTarget::Card(i) => cards.get(i),
            };
            let Some(target) = target else { continue };
            if step.delay_ms == 0 {
                add_class(target, ANIMATE);
                continue;
            }
            let target = target.clone();
            let cb = Closure::once_into_js(move || add_class(&target, ANIMATE));
            if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                timer_ms(step.delay_ms),
            ) {
                console::warn_js("reveal timeout", &e);
            }
        }
    });
    if let Err(e) = window.request_animation_frame(frame.unchecked_ref()) {
        console::warn_js("reveal frame", &e);
    }
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}
