//! Layout grid values: breakpoints, column count, margin and gutter.
//!
//! The stored shape is the canonical shape, so there is no string form.
//! Parsing only fills in what is missing and clamps what is out of range:
//! columns to `1..=24`, margin and gutter to `>= 0`. The setters apply the
//! same clamps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::number::{json_number, value_as_f64};

pub const COLUMNS_DEFAULT: u8 = 12;
pub const MARGIN_DEFAULT: f64 = 16.0;
pub const GUTTER_DEFAULT: f64 = 24.0;
pub const MIN_COLUMNS: u8 = 1;
pub const MAX_COLUMNS: u8 = 24;

/// Breakpoint widths in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub xs: f64,
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
}

impl Breakpoints {
    /// `(name, width)` pairs, narrowest first.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("xs", self.xs),
            ("sm", self.sm),
            ("md", self.md),
            ("lg", self.lg),
            ("xl", self.xl),
        ]
    }

    fn parse_object(map: &Map<String, Value>) -> Self {
        let d = Self::default();
        let width =
            |key: &str, fallback: f64| map.get(key).and_then(value_as_f64).unwrap_or(fallback);
        Self {
            xs: width("xs", d.xs),
            sm: width("sm", d.sm),
            md: width("md", d.md),
            lg: width("lg", d.lg),
            xl: width("xl", d.xl),
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            xs: 0.0,
            sm: 640.0,
            md: 768.0,
            lg: 1024.0,
            xl: 1280.0,
        }
    }
}

/// A grid token value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridValue {
    breakpoints: Breakpoints,
    columns: u8,
    margin: f64,
    gutter: f64,
}

impl GridValue {
    /// Reads a stored grid, defaulting missing fields. Never fails.
    pub fn parse_value(value: &Value) -> Self {
        let mut grid = Self::default();
        let Some(map) = value.as_object() else {
            if !value.is_null() {
                tracing::debug!(?value, "grid value is not an object, using defaults");
            }
            return grid;
        };

        if let Some(bp) = map.get("breakpoints").and_then(Value::as_object) {
            grid.breakpoints = Breakpoints::parse_object(bp);
        }
        if let Some(columns) = map.get("columns").and_then(value_as_f64) {
            grid.set_columns(columns.round() as i64);
        }
        if let Some(margin) = map.get("margin").and_then(value_as_f64) {
            grid.set_margin(margin);
        }
        if let Some(gutter) = map.get("gutter").and_then(value_as_f64) {
            grid.set_gutter(gutter);
        }
        grid
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn breakpoints_mut(&mut self) -> &mut Breakpoints {
        &mut self.breakpoints
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn gutter(&self) -> f64 {
        self.gutter
    }

    /// Sets the column count, clamped to `1..=24`.
    pub fn set_columns(&mut self, columns: i64) {
        self.columns = columns.clamp(MIN_COLUMNS as i64, MAX_COLUMNS as i64) as u8;
    }

    /// Sets the outer margin, clamped to `>= 0`.
    pub fn set_margin(&mut self, margin: f64) {
        self.margin = non_negative(margin);
    }

    /// Sets the gutter, clamped to `>= 0`.
    pub fn set_gutter(&mut self, gutter: f64) {
        self.gutter = non_negative(gutter);
    }

    /// The stored object.
    pub fn to_value(&self) -> Value {
        let mut bp = Map::new();
        for (name, width) in self.breakpoints.entries() {
            bp.insert(name.into(), json_number(width));
        }
        let mut map = Map::new();
        map.insert("breakpoints".into(), Value::Object(bp));
        map.insert("columns".into(), Value::from(self.columns));
        map.insert("margin".into(), json_number(self.margin));
        map.insert("gutter".into(), json_number(self.gutter));
        Value::Object(map)
    }
}

impl Default for GridValue {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            columns: COLUMNS_DEFAULT,
            margin: MARGIN_DEFAULT,
            gutter: GUTTER_DEFAULT,
        }
    }
}

fn non_negative(n: f64) -> f64 {
    if n.is_finite() {
        n.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_empty_object_uses_defaults() {
        let grid = GridValue::parse_value(&json!({}));
        assert_eq!(grid, GridValue::default());
        assert_eq!(grid.breakpoints().md, 768.0);
        assert_eq!(grid.columns(), 12);
        assert_eq!(grid.margin(), 16.0);
        assert_eq!(grid.gutter(), 24.0);
    }

    #[test]
    fn test_parse_partial_breakpoints() {
        let grid = GridValue::parse_value(&json!({"breakpoints": {"md": 800}, "columns": 8}));
        assert_eq!(grid.breakpoints().md, 800.0);
        assert_eq!(grid.breakpoints().sm, 640.0);
        assert_eq!(grid.columns(), 8);
    }

    #[test]
    fn test_parse_clamps() {
        let grid = GridValue::parse_value(&json!({"columns": 30, "margin": -5, "gutter": -1}));
        assert_eq!(grid.columns(), 24);
        assert_eq!(grid.margin(), 0.0);
        assert_eq!(grid.gutter(), 0.0);

        let grid = GridValue::parse_value(&json!({"columns": 0}));
        assert_eq!(grid.columns(), 1);
    }

    #[test]
    fn test_setters_clamp() {
        let mut grid = GridValue::default();
        grid.set_columns(0);
        assert_eq!(grid.columns(), 1);
        grid.set_columns(30);
        assert_eq!(grid.columns(), 24);
        grid.set_columns(-3);
        assert_eq!(grid.columns(), 1);
        grid.set_margin(-5.0);
        assert_eq!(grid.margin(), 0.0);
        grid.set_gutter(-5.0);
        assert_eq!(grid.gutter(), 0.0);
        grid.set_gutter(f64::NAN);
        assert_eq!(grid.gutter(), 0.0);
    }

    #[test]
    fn test_non_object_uses_defaults() {
        assert_eq!(GridValue::parse_value(&json!("12 columns")), GridValue::default());
    }

    #[test]
    fn test_to_value_is_identity_shape() {
        let stored = json!({
            "breakpoints": {"xs": 0, "sm": 600, "md": 900, "lg": 1200, "xl": 1536},
            "columns": 16,
            "margin": 24,
            "gutter": 16
        });
        assert_eq!(GridValue::parse_value(&stored).to_value(), stored);
    }
}
