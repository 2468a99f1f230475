//! Skill radar chart configuration.
//!
//! Rendering belongs to Chart.js (the global `Chart` constructor loaded by the
//! page). This module only builds its configuration object and hands it over.

use serde_json::{Value, json};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement};

use crate::config::SkillChartConfig;

const FONT_FAMILY: &str = "-apple-system, BlinkMacSystemFont, sans-serif";

/// Fill, border, grid, angle-line and label colours.
pub struct Palette {
    pub primary: &'static str,
    pub border: &'static str,
    pub grid: &'static str,
    pub angle_lines: &'static str,
    pub text: &'static str,
}

pub const PALETTE: Palette = Palette {
    primary: "rgba(100, 200, 220, 0.4)",
    border: "rgba(10, 100, 130, 0.6)",
    grid: "rgba(1, 1, 1, 0.6)",
    angle_lines: "rgba(1, 1, 1, 0.6)",
    text: "#86868b",
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(ctx: &JsValue, config: &JsValue) -> Result<ChartJs, JsValue>;
}

/// Chart.js configuration without the formatter callbacks (those are JS
/// functions and get attached after conversion).
pub fn build_config(cfg: &SkillChartConfig) -> Value {
    let p = &PALETTE;
    json!({
        "type": "radar",
        "data": {
            "labels": cfg.labels,
            "datasets": [{
                "label": cfg.dataset_label,
                "data": cfg.values,
                "backgroundColor": p.primary,
                "borderColor": p.border,
                "borderWidth": 2.5,
                "pointBackgroundColor": p.border,
                "pointBorderColor": "#fff",
                "pointBorderWidth": 2,
                "pointRadius": 5,
                "pointHoverRadius": 7,
                "pointHoverBackgroundColor": p.border,
                "pointHoverBorderColor": "#fff"
            }]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": true,
            "animation": { "duration": 1200, "easing": "easeOutQuart" },
            "scales": {
                "r": {
                    "min": 0,
                    "max": 100,
                    "ticks": {
                        "stepSize": 20,
                        "font": { "size": 12, "family": FONT_FAMILY },
                        "color": p.text,
                        "backdropColor": "transparent"
                    },
                    "grid": { "color": p.grid, "lineWidth": 1 },
                    "angleLines": { "color": p.angle_lines, "lineWidth": 1 },
                    "pointLabels": {
                        "font": { "size": 14, "family": FONT_FAMILY, "weight": "500" },
                        "color": "#1d1d1f",
                        "padding": 12
                    }
                }
            },
            "plugins": {
                "legend": { "display": false },
                "tooltip": {
                    "backgroundColor": "rgba(0, 0, 0, 0.8)",
                    "titleFont": { "size": 14, "family": FONT_FAMILY },
                    "bodyFont": { "size": 13, "family": FONT_FAMILY },
                    "padding": 12,
                    "cornerRadius": 8,
                    "callbacks": {}
                }
            }
        }
    })
}

/// Body of the tooltip label formatter: `"{label}: {r}%"`.
pub fn tooltip_label_body(dataset_label: &str) -> String {
    // JSON string literal doubles as a safely escaped JS string literal.
    let prefix = Value::String(format!("{}: ", dataset_label)).to_string();
    format!("return {} + context.parsed.r + '%';", prefix)
}

/// Create the chart on `#{canvas_id}`. Returns `Ok(false)` if the canvas or
/// its 2D context is missing.
pub fn render(document: &Document, cfg: &SkillChartConfig) -> Result<bool, JsValue> {
    let Some(el) = document.get_element_by_id(&cfg.canvas_id) else {
        return Ok(false);
    };
    let canvas: HtmlCanvasElement = el.dyn_into()?;
    let Some(ctx) = canvas.get_context("2d")? else {
        return Ok(false);
    };

    let text = serde_json::to_string(&build_config(cfg))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let config = js_sys::JSON::parse(&text)?;

    let tick_fmt = js_sys::Function::new_with_args("value", "return value + '%';");
    set_path(
        &config,
        &["options", "scales", "r", "ticks"],
        "callback",
        &tick_fmt,
    )?;
    let label_body = tooltip_label_body(&cfg.dataset_label);
    let label_fmt = js_sys::Function::new_with_args("context", &label_body);
    set_path(
        &config,
        &["options", "plugins", "tooltip", "callbacks"],
        "label",
        &label_fmt,
    )?;

    ChartJs::new(&ctx, &config)?;
    Ok(true)
}

fn set_path(root: &JsValue, path: &[&str], key: &str, value: &JsValue) -> Result<(), JsValue> {
    let mut obj = root.clone();
    for seg in path {
        obj = js_sys::Reflect::get(&obj, &JsValue::from_str(seg))?;
    }
    js_sys::Reflect::set(&obj, &JsValue::from_str(key), value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_carries_labels_and_values() {
        let cfg = SkillChartConfig::default();
        let v = build_config(&cfg);
        assert_eq!(v["type"], "radar");
        assert_eq!(v["data"]["labels"][3], "Git/GitHub");
        assert_eq!(v["data"]["datasets"][0]["data"][0], 60.0);
        assert_eq!(v["data"]["datasets"][0]["label"], cfg.dataset_label.as_str());
    }

    #[test]
    fn scale_and_plugins_match_design() {
        let v = build_config(&SkillChartConfig::default());
        let r = &v["options"]["scales"]["r"];
        assert_eq!(r["max"], 100);
        assert_eq!(r["ticks"]["stepSize"], 20);
        assert_eq!(v["options"]["plugins"]["legend"]["display"], false);
        assert!(v["options"]["plugins"]["tooltip"]["callbacks"].is_object());
    }

    #[test]
    fn tooltip_label_is_escaped() {
        let body = tooltip_label_body("Skill \"level\"");
        assert_eq!(body, r#"return "Skill \"level\": " + context.parsed.r + '%';"#);
    }
}
