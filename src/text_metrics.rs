use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Advance of an unmapped glyph, as a fraction of the font size.
const FALLBACK_ADVANCE: f64 = 0.56;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Advance width of `text` set at `font_size`, in the unit of `font_size`.
/// `None` when no usable font is installed.
pub fn measure_text_width(text: &str, font_size: f64, font_family: &str) -> Option<f64> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

/// Like [`measure_text_width`] but never fails; missing fonts fall back to
/// a fixed per-character advance.
pub fn text_width(text: &str, font_size: f64, font_family: &str) -> f64 {
    measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| text.chars().count() as f64 * font_size * FALLBACK_ADVANCE)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f64, font_family: &str) -> Option<f64> {
        let key = normalize_family_key(font_family);
        if !self.cache.contains_key(&key) {
            let face = self.load_face(font_family);
            self.cache.insert(key.clone(), face);
        }
        self.cache
            .get(&key)
            .and_then(|face| face.as_ref())
            .map(|face| face.measure_width(text, font_size))
    }

    fn load_face(&mut self, font_family: &str) -> Option<FontFace> {
        let names: Vec<&str> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|name| !name.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" => Family::SansSerif,
                "monospace" => Family::Monospace,
                _ => Family::Name(name),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FontFace::new(data.to_vec(), index))
            .flatten()
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [u16; 128],
}

impl FontFace {
    fn new(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        let units_per_em = face.units_per_em().max(1);
        Some(Self {
            data,
            index,
            units_per_em,
            ascii_advances,
        })
    }

    fn measure_width(&self, text: &str, font_size: f64) -> f64 {
        let scale = font_size / self.units_per_em as f64;
        let fallback = font_size * FALLBACK_ADVANCE;
        let advance = |units: u16| {
            if units == 0 {
                fallback
            } else {
                units as f64 * scale
            }
        };

        if text.is_ascii() {
            return text
                .bytes()
                .filter(|byte| *byte != b'\n')
                .map(|byte| advance(self.ascii_advances[byte as usize]))
                .sum();
        }

        let Ok(face) = Face::parse(&self.data, self.index) else {
            return text.chars().count() as f64 * fallback;
        };
        text.chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| {
                let units = face
                    .glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .unwrap_or(0);
                advance(units)
            })
            .sum()
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
