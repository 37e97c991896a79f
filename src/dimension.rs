//! Feet-inch formatting and dimension-line placement.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::geom::Point;
use crate::scene::VectorScene;

pub const DIMENSION_TEXT_HEIGHT: f64 = 0.15;

static FEET_INCHES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*(?:(?P<feet>\d+(?:\.\d+)?)\s*(?:'|ft|feet)?)?\s*-?\s*(?:(?P<inches>\d+(?:\.\d+)?)\s*(?:"|''|in|inches))?\s*$"#,
    )
    .expect("feet-inches pattern")
});

/// Formats a length in feet as `F'-I"`, carrying a rounded 12" into the feet.
pub fn format_feet_inches(feet: f64) -> String {
    let value = feet.abs();
    let mut whole = value.trunc() as i64;
    let mut inches = ((value - whole as f64) * 12.0).round() as i64;
    if inches >= 12 {
        whole += 1;
        inches = 0;
    }
    let sign = if feet < 0.0 && (whole, inches) != (0, 0) { "-" } else { "" };
    format!("{sign}{whole}'-{inches}\"")
}

/// Parses `12'-6"`, `12' 6"`, `12'`, `6"`, `12ft` or a bare number of feet.
pub fn parse_feet_inches(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }
    let caps = FEET_INCHES_RE.captures(trimmed)?;
    let feet = caps.name("feet").map(|m| m.as_str().parse::<f64>());
    let inches = caps.name("inches").map(|m| m.as_str().parse::<f64>());
    match (feet, inches) {
        (None, None) => None,
        (feet, inches) => {
            let feet = feet.transpose().ok()?.unwrap_or(0.0);
            let inches = inches.transpose().ok()?.unwrap_or(0.0);
            Some(feet + inches / 12.0)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeetValue {
    Number(f64),
    Text(String),
}

pub fn deserialize_feet<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match FeetValue::deserialize(deserializer)? {
        FeetValue::Number(value) => Ok(value),
        FeetValue::Text(text) => parse_feet_inches(&text).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid feet-inch dimension '{text}'"))
        }),
    }
}

pub fn deserialize_feet_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FeetValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FeetValue::Number(value)) => Ok(Some(value)),
        Some(FeetValue::Text(text)) => parse_feet_inches(&text).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid feet-inch dimension '{text}'"))
        }),
    }
}

/// Aligned dimension between two points, labelled with the measured length.
pub fn add_dimension(scene: &mut VectorScene, start: Point, end: Point, offset: f64) {
    let label = format_feet_inches(start.distance(end));
    scene.add_dimension(start, end, offset, label, DIMENSION_TEXT_HEIGHT);
}

/// Plot width along the bottom edge and plot depth along the left edge,
/// both `margin` outside the boundary.
pub fn add_overall_dimensions(
    scene: &mut VectorScene,
    plot_width: f64,
    plot_depth: f64,
    margin: f64,
    offset: f64,
) {
    add_dimension(
        scene,
        Point::new(0.0, -margin),
        Point::new(plot_width, -margin),
        offset,
    );
    add_dimension(
        scene,
        Point::new(-margin, 0.0),
        Point::new(-margin, plot_depth),
        offset,
    );
}
