use serde::{Deserialize, Serialize};

use crate::config::Background;
use crate::scene::{Color, Layer};

/// Gray ramp for ACI 250..=255.
const ACI_GRAYS: [u8; 6] = [51, 91, 132, 173, 214, 255];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub light_background: String,
    pub dark_background: String,
    /// Replacement for ACI 7 on a light background.
    pub light_foreground: String,
    /// Replacement for ACI 7 on a dark background.
    pub dark_foreground: String,
    pub load_bearing_color: Option<String>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            light_background: "#FFFFFF".to_string(),
            dark_background: "#000000".to_string(),
            light_foreground: "#000000".to_string(),
            dark_foreground: "#FFFFFF".to_string(),
            load_bearing_color: None,
        }
    }

    pub fn blueprint() -> Self {
        Self {
            light_background: "#F4F8FF".to_string(),
            dark_background: "#0B2A4A".to_string(),
            light_foreground: "#0B2A4A".to_string(),
            dark_foreground: "#E8F1FF".to_string(),
            load_bearing_color: Some("#FF6B6B".to_string()),
        }
    }

    pub fn background(&self, background: Background) -> &str {
        match background {
            Background::Light => &self.light_background,
            Background::Dark => &self.dark_background,
        }
    }

    pub fn foreground(&self, background: Background) -> &str {
        match background {
            Background::Light => &self.light_foreground,
            Background::Dark => &self.dark_foreground,
        }
    }

    /// Display color for an entity; ACI 7 follows the background.
    pub fn resolve(&self, color: Color, layer: Layer, background: Background) -> String {
        let aci = match color {
            Color::ByLayer => layer.default_aci(),
            Color::Aci(index) => index,
        };
        if aci == 7 || aci == 0 {
            return self.foreground(background).to_string();
        }
        let (r, g, b) = aci_to_rgb(aci);
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

/// Approximates the AutoCAD color index palette.
pub fn aci_to_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0 | 7 => (255, 255, 255),
        1 => (255, 0, 0),
        2 => (255, 255, 0),
        3 => (0, 255, 0),
        4 => (0, 255, 255),
        5 => (0, 0, 255),
        6 => (255, 0, 255),
        8 => (128, 128, 128),
        9 => (192, 192, 192),
        250..=255 => {
            let level = ACI_GRAYS[(index - 250) as usize];
            (level, level, level)
        }
        _ => {
            let hue = f64::from(index / 10 - 1) * 15.0;
            let shade = index % 10;
            let value = match shade / 2 {
                0 => 1.0,
                1 => 0.65,
                2 => 0.5,
                3 => 0.3,
                _ => 0.15,
            };
            let saturation = if shade % 2 == 0 { 1.0 } else { 0.5 };
            hsv_to_rgb(hue, saturation, value)
        }
    }
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    let chroma = value * saturation;
    let sector = (hue / 60.0) % 6.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    let channel = |c: f64| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}
