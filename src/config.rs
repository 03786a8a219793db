//! Serde model of the JSON configuration record.
//!
//! ```json
//! {
//!   "axiom": "F--F--F",
//!   "rules": { "F": "F+F--F+F" },
//!   "angle": 60,
//!   "draw": { "start_point": [-0.4, 0.2], "start_heading": 90, "default_order": 4 }
//! }
//! ```
//!
//! Every field is optional. Unknown fields are ignored so records written for other
//! tools still load.

use crate::error::{LSystemError, Result};
use crate::interpreter::DrawConfig;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level configuration record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LSystemConfig {
    /// Symbol to replacement. Keys longer than one character never match and are skipped.
    pub rules: HashMap<String, String>,
    pub axiom: String,
    /// Turn angle used for both directions unless overridden.
    pub angle: f64,
    pub left_angle: Option<f64>,
    pub right_angle: Option<f64>,
    /// Symbol to action name. Empty selects the standard table.
    pub actions: HashMap<String, String>,
    pub rand_unit: f64,
    pub rand_angle: f64,
    /// Log every expansion step and action.
    pub trace: bool,
    pub draw: DrawOptions,
}

/// The nested `draw` record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    /// Start point in `-1..1` viewport units.
    pub start_point: [f64; 2],
    /// Compass heading: 0 is up, angles grow clockwise.
    pub start_heading: f64,
    pub default_order: i32,
    pub default_unit: f64,
    pub fill_order: i32,
    pub fill_colors: HashMap<String, String>,
    pub corner_radius: f64,
    pub seq_color_order: i32,
    pub seq_colors: Vec<String>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            start_point: [0.0, 0.0],
            start_heading: 0.0,
            default_order: 5,
            default_unit: 5.0,
            fill_order: 0,
            fill_colors: HashMap::new(),
            corner_radius: 0.0,
            seq_color_order: 0,
            seq_colors: Vec::new(),
        }
    }
}

impl LSystemConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Rejects values that would make every render meaningless.
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("angle", self.angle),
            ("left_angle", self.left_angle.unwrap_or(0.0)),
            ("right_angle", self.right_angle.unwrap_or(0.0)),
            ("rand_unit", self.rand_unit),
            ("rand_angle", self.rand_angle),
            ("draw.start_heading", self.draw.start_heading),
            ("draw.default_unit", self.draw.default_unit),
            ("draw.corner_radius", self.draw.corner_radius),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(LSystemError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.draw.corner_radius < 0.0 {
            return Err(LSystemError::InvalidConfig(format!(
                "draw.corner_radius must not be negative, got {}",
                self.draw.corner_radius
            )));
        }
        Ok(())
    }

    /// Converts the record into the interpreter's drawing settings.
    pub fn into_draw_config(self) -> DrawConfig {
        let draw = self.draw;
        DrawConfig {
            left_angle: self.left_angle.unwrap_or(self.angle),
            right_angle: self.right_angle.unwrap_or(self.angle),
            rand_unit: self.rand_unit,
            rand_angle: self.rand_angle,
            corner_radius: draw.corner_radius,
            fill_order: draw.fill_order,
            fill_colors: symbol_entries("draw.fill_colors", &draw.fill_colors)
                .into_iter()
                .map(|(sym, color)| (sym, color.to_string()))
                .collect(),
            seq_color_order: draw.seq_color_order,
            seq_colors: draw.seq_colors,
            start_point: DVec2::from_array(draw.start_point),
            start_heading: draw.start_heading,
            default_order: draw.default_order,
            default_unit: draw.default_unit,
        }
    }
}

/// Keeps the single-character keys of a symbol-keyed map.
///
/// Symbols are single characters, so longer keys could never match; they are
/// dropped with a warning rather than failing the whole record.
pub(crate) fn symbol_entries<'a>(
    field: &str,
    map: &'a HashMap<String, String>,
) -> Vec<(char, &'a str)> {
    map.iter()
        .filter_map(|(key, value)| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(sym), None) => Some((sym, value.as_str())),
                _ => {
                    tracing::warn!(field, key = %key, "ignoring key that is not a single symbol");
                    None
                }
            }
        })
        .collect()
}
