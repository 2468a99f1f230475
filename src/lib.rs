//! Folio Motion core crate.
//!
//! Scroll-driven behaviour for a static portfolio page: staggered section
//! reveals, timeline items, nav highlighting, a scroll progress bar, modal
//! overlays with image carousels, background particles and the skill radar
//! chart. The decision logic lives in plain modules that run on the host;
//! `page` binds it to the DOM.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub mod carousel;
#[cfg(feature = "serde_json")]
pub mod chart;
pub mod config;
mod console;
pub mod modal;
pub mod nav;
pub mod page;
pub mod particles;
pub mod progress;
pub mod reveal;
pub mod visibility;

pub use config::PageConfig;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// JS surface
// -----------------------------------------------------------------------------

/// Page behaviour handle. JS owns it; dropping or calling `stop()` releases
/// every observer and listener it installed.
#[wasm_bindgen]
pub struct Portfolio {
    controller: page::PageController,
}

#[wasm_bindgen]
impl Portfolio {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Portfolio, JsValue> {
        Ok(Self {
            controller: page::PageController::new(PageConfig::default())?,
        })
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.controller.start()
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
impl Portfolio {
    /// Build with a JSON override of the default `PageConfig`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<Portfolio, JsValue> {
        let config = PageConfig::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("invalid page config: {}", e)))?;
        Ok(Self {
            controller: page::PageController::new(config)?,
        })
    }
}

thread_local! {
    static PAGE: RefCell<Option<Portfolio>> = const { RefCell::new(None) };
}

/// Start the default page behaviour, waiting for `DOMContentLoaded` if the
/// document is still loading. The instance lives for the rest of the page.
#[wasm_bindgen]
pub fn start_portfolio() -> Result<(), JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;
    if doc.ready_state() != "loading" {
        return launch();
    }
    let cb = Closure::once_into_js(|| {
        if let Err(e) = launch() {
            console::warn_js("start failed", &e);
        }
    });
    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_once(true);
    doc.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        cb.unchecked_ref(),
        &opts,
    )?;
    Ok(())
}

fn launch() -> Result<(), JsValue> {
    let mut portfolio = Portfolio::new()?;
    portfolio.start()?;
    PAGE.with(|p| p.replace(Some(portfolio)));
    Ok(())
}

/// Scroll completion in [0, 100]; 0 when the page cannot scroll.
#[wasm_bindgen]
pub fn scroll_percent(offset: f64, document_height: f64, viewport_height: f64) -> f64 {
    progress::scroll_percent(offset, document_height, viewport_height)
}
