use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    #[serde(alias = "white")]
    Light,
    #[serde(alias = "black", alias = "blueprint")]
    Dark,
}

impl Background {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "light" | "white" => Some(Self::Light),
            "dark" | "black" | "blueprint" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepairKind {
    #[default]
    Greedy,
    Conservative,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Edge-coordinate slack (feet) for the shared-wall test.
    pub adjacency_tolerance: f64,
    pub repair: RepairKind,
    pub strict_references: bool,
    pub auto_openings: bool,
    pub furniture: bool,
    pub stove_burners: usize,
    pub dining_seats: usize,
    pub overall_dimension_margin: f64,
    pub dimension_offset: f64,
    pub title: String,
    pub drawing_number: String,
    pub scale_label: String,
    pub floor_height_inches: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            adjacency_tolerance: 0.5,
            repair: RepairKind::Greedy,
            strict_references: false,
            auto_openings: true,
            furniture: true,
            stove_burners: 4,
            dining_seats: 4,
            overall_dimension_margin: 2.0,
            dimension_offset: 0.5,
            title: "FLOOR PLAN".to_string(),
            drawing_number: "FP-001".to_string(),
            scale_label: "1:100".to_string(),
            floor_height_inches: 120.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub dpi: u32,
    pub figure_inches: f64,
    pub background: Background,
    /// Margin in feet added around the scene extents.
    pub padding: f64,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            figure_inches: 12.0,
            background: Background::Light,
            padding: 2.0,
            font_family: "Arial, Helvetica, sans-serif".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn pixel_size(&self) -> f64 {
        (self.figure_inches * self.dpi as f64).max(1.0)
    }

    /// Rendering options carried by the plan itself take precedence over
    /// the config file.
    pub fn with_request_overrides(mut self, background: Option<Background>, dpi: Option<u32>) -> Self {
        if let Some(background) = background {
            self.background = background;
        }
        if let Some(dpi) = dpi.filter(|dpi| *dpi > 0) {
            self.dpi = dpi;
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    light_background: Option<String>,
    dark_background: Option<String>,
    light_foreground: Option<String>,
    dark_foreground: Option<String>,
    load_bearing_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    render: Option<RenderConfig>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "blueprint" {
            config.theme = Theme::blueprint();
            config.render.background = Background::Dark;
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.render.font_family = v;
        }
        if let Some(v) = vars.light_background {
            config.theme.light_background = v;
        }
        if let Some(v) = vars.dark_background {
            config.theme.dark_background = v;
        }
        if let Some(v) = vars.light_foreground {
            config.theme.light_foreground = v;
        }
        if let Some(v) = vars.dark_foreground {
            config.theme.dark_foreground = v;
        }
        if let Some(v) = vars.load_bearing_color {
            config.theme.load_bearing_color = Some(v);
        }
    }

    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }
    if let Some(render) = parsed.render {
        let font_family = config.render.font_family.clone();
        config.render = render;
        if config.render.font_family.is_empty() {
            config.render.font_family = font_family;
        }
    }

    Ok(config)
}
