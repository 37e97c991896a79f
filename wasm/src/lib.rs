use floorplan_renderer::config::{Background, Config};
use floorplan_renderer::render_plan;
use floorplan_renderer::theme::Theme;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanRenderOptions {
    theme: Option<String>,
    background: Option<String>,
    font_family: Option<String>,
    furniture: Option<bool>,
    auto_openings: Option<bool>,
    strict_references: Option<bool>,
}

fn build_config(options: PlanRenderOptions) -> Config {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("blueprint") {
        config.theme = Theme::blueprint();
        config.render.background = Background::Dark;
    }
    if let Some(background) = options.background.as_deref().and_then(Background::from_token) {
        config.render.background = background;
    }
    if let Some(font_family) = options.font_family {
        config.render.font_family = font_family;
    }
    if let Some(furniture) = options.furniture {
        config.layout.furniture = furniture;
    }
    if let Some(auto_openings) = options.auto_openings {
        config.layout.auto_openings = auto_openings;
    }
    if let Some(strict) = options.strict_references {
        config.layout.strict_references = strict;
    }
    config
}

#[wasm_bindgen]
pub fn render_plan_svg(plan_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<PlanRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        PlanRenderOptions::default()
    };

    let config = build_config(options);
    render_plan(plan_json, &config)
        .map(|output| output.svg)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
