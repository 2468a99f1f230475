//! Element handles collected once at startup.
//!
//! Every feature reads its elements from here instead of re-querying the
//! document, so the page structure is resolved in one place.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::modal::modal_id;
use crate::nav::{NavBinding, NavVariant};

pub const NAV_LINKS: &str = ".header-nav a, .nav-dot";

pub struct SectionEntry {
    pub id: String,
    pub element: Element,
    pub header: Option<Element>,
    pub cards: Vec<Element>,
}

pub struct CarouselEntry {
    pub container: Element,
    pub prev: Option<Element>,
    pub next: Option<Element>,
    pub images: Vec<Element>,
}

pub struct ModalOpener {
    pub element: Element,
    pub target: String,
}

pub struct CloseButton {
    pub element: Element,
    /// Index into `overlays` of the enclosing overlay.
    pub overlay: Option<usize>,
}

pub struct PageRegistry {
    pub sections: Vec<SectionEntry>,
    pub timeline_items: Vec<Element>,
    pub nav_links: Vec<Element>,
    /// Parallel to `nav_links`.
    pub nav_bindings: Vec<NavBinding>,
    pub overlays: Vec<Element>,
    pub openers: Vec<ModalOpener>,
    pub close_buttons: Vec<CloseButton>,
    pub carousels: Vec<CarouselEntry>,
    pub progress_bar: Option<HtmlElement>,
    pub scroll_indicator: Option<Element>,
    pub hero: Option<Element>,
    pub about: Option<Element>,
}

impl PageRegistry {
    pub fn scan(doc: &Document) -> Result<Self, JsValue> {
        let mut sections = Vec::new();
        for element in elements(doc.query_selector_all("section")?) {
            let header = element.query_selector(".section-header")?;
            let cards = elements(element.query_selector_all(".content-card")?);
            sections.push(SectionEntry {
                id: element.id(),
                element,
                header,
                cards,
            });
        }

        let nav_links = elements(doc.query_selector_all(NAV_LINKS)?);
        let mut nav_bindings = Vec::with_capacity(nav_links.len());
        for link in &nav_links {
            let floating = link.class_list().contains("nav-dot")
                || link.closest(".floating-nav")?.is_some();
            let variant = if floating {
                NavVariant::Floating
            } else {
                NavVariant::Primary
            };
            let href = link.get_attribute("href").unwrap_or_default();
            nav_bindings.push(NavBinding::from_href(&href, variant));
        }

        let overlays = elements(doc.query_selector_all(".modal-overlay")?);
        let openers = elements(doc.query_selector_all("[data-modal-target]")?)
            .into_iter()
            .map(|element| {
                let target = element
                    .get_attribute("data-modal-target")
                    .unwrap_or_default();
                ModalOpener { element, target }
            })
            .collect();
        let mut close_buttons = Vec::new();
        for element in elements(doc.query_selector_all(".modal-close")?) {
            let overlay = match element.closest(".modal-overlay")? {
                Some(o) => overlays.iter().position(|x| x == &o),
                None => None,
            };
            close_buttons.push(CloseButton { element, overlay });
        }

        let mut carousels = Vec::new();
        for container in elements(doc.query_selector_all(".modal-img-container")?) {
            let prev = container.query_selector(".modal-img-prev")?;
            let next = container.query_selector(".modal-img-next")?;
            let images = elements(container.query_selector_all(".carousel-img")?);
            carousels.push(CarouselEntry {
                container,
                prev,
                next,
                images,
            });
        }

        let progress_bar = doc
            .query_selector(".progress-bar")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        Ok(Self {
            sections,
            timeline_items: elements(doc.query_selector_all(".timeline-item")?),
            nav_links,
            nav_bindings,
            overlays,
            openers,
            close_buttons,
            carousels,
            progress_bar,
            scroll_indicator: doc.query_selector(".scroll-indicator")?,
            hero: doc.get_element_by_id("hero"),
            about: doc.get_element_by_id("about"),
        })
    }

    pub fn section_index(&self, el: &Element) -> Option<usize> {
        self.sections.iter().position(|s| &s.element == el)
    }

    pub fn section_by_id(&self, id: &str) -> Option<&SectionEntry> {
        self.sections.iter().find(|s| !s.id.is_empty() && s.id == id)
    }

    pub fn timeline_index(&self, el: &Element) -> Option<usize> {
        self.timeline_items.iter().position(|t| t == el)
    }

    pub fn overlay_index(&self, el: &Element) -> Option<usize> {
        self.overlays.iter().position(|o| o == el)
    }

    /// Resolve a `data-modal-target` value to a registered overlay. Plain id
    /// selectors match directly; anything else is queried and matched.
    pub fn resolve_modal_target(&self, doc: &Document, target: &str) -> Option<usize> {
        if let Some(id) = modal_id(target) {
            return self.overlays.iter().position(|o| o.id() == id);
        }
        let el = doc.query_selector(target).ok().flatten()?;
        self.overlay_index(&el)
    }

    /// Short summary for the startup log line.
    pub fn summary(&self) -> String {
        format!(
            "{} sections, {} timeline items, {} nav links, {} modals, {} carousels",
            self.sections.len(),
            self.timeline_items.len(),
            self.nav_links.len(),
            self.overlays.len(),
            self.carousels.len()
        )
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
