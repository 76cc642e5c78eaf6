//! Single value-with-unit tokens: spacing, radius and font size.
//!
//! Stored dimensions come in four shapes, all accepted by
//! [`Dimension::parse_value`]:
//!
//! - `null` / missing: the slot's default
//! - a number: `16` reads as `16px`
//! - a string: `"16px"`, `"1.5rem"`, `"50%"`, `"8"` (unit defaults to `px`)
//! - an object: `{ "value": 16, "unit": "px" }`, missing fields defaulted
//!
//! Anything else falls back to the default. Parsing never fails.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tokenkit_codec::dimension::{Dimension, DimensionUnit, SPACING_DEFAULT};
//!
//! let d = Dimension::parse_value(&json!("1.5rem"), SPACING_DEFAULT);
//! assert_eq!(d, Dimension::new(1.5, DimensionUnit::Rem));
//! assert_eq!(d.to_css(), "1.5rem");
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::number::{format_number, json_number, value_as_f64};

/// Default font size: `16px`.
pub const FONT_SIZE_DEFAULT: Dimension = Dimension::px(16.0);
/// Default spacing: `16px`.
pub const SPACING_DEFAULT: Dimension = Dimension::px(16.0);
/// Default corner radius: `8px`.
pub const RADIUS_DEFAULT: Dimension = Dimension::px(8.0);

/// Radius value meaning "fully round". Previewed as `50%`, stored as-is.
pub const ROUND_RADIUS: f64 = 9999.0;

static DIMENSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?[\d.]+)(px|rem|em|%)?$").expect("valid dimension regex"));

/// Unit of a [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DimensionUnit {
    #[default]
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "rem")]
    Rem,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "%")]
    Percent,
}

impl DimensionUnit {
    /// All units in display order.
    pub const ALL: [DimensionUnit; 4] = [
        DimensionUnit::Px,
        DimensionUnit::Rem,
        DimensionUnit::Em,
        DimensionUnit::Percent,
    ];

    /// The CSS spelling of this unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionUnit::Px => "px",
            DimensionUnit::Rem => "rem",
            DimensionUnit::Em => "em",
            DimensionUnit::Percent => "%",
        }
    }

    /// Parses a CSS unit spelling, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "px" => Some(DimensionUnit::Px),
            "rem" => Some(DimensionUnit::Rem),
            "em" => Some(DimensionUnit::Em),
            "%" => Some(DimensionUnit::Percent),
            _ => None,
        }
    }
}

impl fmt::Display for DimensionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finite number with a CSS length unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub value: f64,
    pub unit: DimensionUnit,
}

impl Dimension {
    pub const fn new(value: f64, unit: DimensionUnit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, DimensionUnit::Px)
    }

    /// Parses a stored dimension, falling back to `default` for anything
    /// that cannot be read.
    pub fn parse_value(value: &Value, default: Dimension) -> Self {
        match value {
            Value::Null => default,
            Value::Number(_) => match value_as_f64(value) {
                Some(n) => Self::px(n),
                None => default,
            },
            Value::String(s) => Self::parse_string(s, default),
            Value::Object(map) => Self::parse_object(map, default),
            _ => {
                tracing::debug!(?value, "unreadable dimension, using default");
                default
            }
        }
    }

    /// Parses `"<number><unit>"`; the unit defaults to `px`.
    pub fn parse_string(s: &str, default: Dimension) -> Self {
        let Some(caps) = DIMENSION_PATTERN.captures(s.trim()) else {
            tracing::debug!(input = s, "dimension string did not match, using default");
            return default;
        };

        let value = match caps[1].parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => {
                tracing::debug!(input = s, "dimension has no numeric part, using default");
                return default;
            }
        };
        let unit = caps
            .get(2)
            .and_then(|m| DimensionUnit::parse(m.as_str()))
            .unwrap_or(DimensionUnit::Px);

        Self { value, unit }
    }

    fn parse_object(map: &Map<String, Value>, default: Dimension) -> Self {
        let value = map
            .get("value")
            .and_then(value_as_f64)
            .unwrap_or(default.value);
        let unit = map
            .get("unit")
            .and_then(Value::as_str)
            .and_then(DimensionUnit::parse)
            .unwrap_or(default.unit);
        Self { value, unit }
    }

    /// The CSS form, `${value}${unit}`.
    pub fn to_css(&self) -> String {
        format!("{}{}", format_number(self.value), self.unit)
    }

    /// Whether this is the "fully round" radius sentinel.
    pub fn is_round(&self) -> bool {
        self.value == ROUND_RADIUS
    }

    /// The CSS form used when previewing a radius: the round sentinel
    /// becomes `50%`, everything else is [`to_css`](Self::to_css).
    pub fn to_radius_css(&self) -> String {
        if self.is_round() {
            "50%".to_string()
        } else {
            self.to_css()
        }
    }

    /// The object form used inside composite values: `{ "value", "unit" }`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("value".into(), json_number(self.value));
        map.insert("unit".into(), Value::String(self.unit.as_str().into()));
        Value::Object(map)
    }
}

impl Default for Dimension {
    fn default() -> Self {
        SPACING_DEFAULT
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
