//! Browser console logging.

use wasm_bindgen::JsValue;

const PREFIX: &str = "[folio-motion]";

pub fn info(msg: &str) {
    web_sys::console::info_1(&JsValue::from_str(&format!("{} {}", PREFIX, msg)));
}

pub fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("{} {}", PREFIX, msg)));
}

/// Log a JS error value (e.g. from a failed DOM call) as a warning.
pub fn warn_js(context: &str, err: &JsValue) {
    web_sys::console::warn_2(&JsValue::from_str(&format!("{} {}:", PREFIX, context)), err);
}
