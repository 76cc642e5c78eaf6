//! Codecs for the individual typography fields.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::number::{format_number, leading_float, value_as_f64};

/// Line height used when a stored value cannot be read.
pub const LINE_HEIGHT_DEFAULT: f64 = 1.5;
/// Font weight used when a stored value cannot be read.
pub const FONT_WEIGHT_DEFAULT: u16 = 400;

static LETTER_SPACING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?[\d.]+)(em|px)?$").expect("valid letter-spacing regex"));

/// The single field a simple typography token holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypographyField {
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    LetterSpacing,
}

impl TypographyField {
    /// Camel-case name as used in stored composite objects.
    pub fn key(&self) -> &'static str {
        match self {
            TypographyField::FontFamily => "fontFamily",
            TypographyField::FontSize => "fontSize",
            TypographyField::FontWeight => "fontWeight",
            TypographyField::LineHeight => "lineHeight",
            TypographyField::LetterSpacing => "letterSpacing",
        }
    }
}

/// Infers which typography field a token holds from its path or name.
///
/// Imported and legacy tokens identify their role by name only, so this is a
/// case-insensitive keyword search. Checked in order: `family`, `size`,
/// `line-height`/`lineheight`/`leading`, `letter-spacing`/`letterspacing`/
/// `tracking`, `weight`. Anything else is a font size.
///
/// ```rust
/// use tokenkit_codec::typography::{detect_token_type, TypographyField};
///
/// assert_eq!(detect_token_type("typography/body/leading"), TypographyField::LineHeight);
/// assert_eq!(detect_token_type("Heading Weight"), TypographyField::FontWeight);
/// assert_eq!(detect_token_type("typography/body"), TypographyField::FontSize);
/// ```
pub fn detect_token_type(path_or_name: &str) -> TypographyField {
    match_token_type(path_or_name).unwrap_or(TypographyField::FontSize)
}

/// Like [`detect_token_type`] but `None` when no keyword matches, so a
/// caller can try the name after the path.
pub fn match_token_type(path_or_name: &str) -> Option<TypographyField> {
    let s = path_or_name.to_lowercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|k| s.contains(k));

    if has_any(&["family"]) {
        Some(TypographyField::FontFamily)
    } else if has_any(&["size"]) {
        Some(TypographyField::FontSize)
    } else if has_any(&["line-height", "lineheight", "leading"]) {
        Some(TypographyField::LineHeight)
    } else if has_any(&["letter-spacing", "letterspacing", "tracking"]) {
        Some(TypographyField::LetterSpacing)
    } else if has_any(&["weight"]) {
        Some(TypographyField::FontWeight)
    } else {
        None
    }
}

/// Reads a unitless line height.
///
/// Numbers pass through, strings are read by their numeric prefix, objects
/// by their `value` field. Everything else is [`LINE_HEIGHT_DEFAULT`].
pub fn parse_line_height(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(_) => value_as_f64(value),
        Value::String(s) => leading_float(s),
        Value::Object(map) => map.get("value").and_then(value_as_f64),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        if !value.is_null() {
            tracing::debug!(?value, "unreadable line height, using default");
        }
        LINE_HEIGHT_DEFAULT
    })
}

/// Reads a font weight, snapped to the nearest hundred in `100..=900`.
///
/// The keywords `normal` and `bold` map to 400 and 700.
pub fn parse_font_weight(value: &Value) -> u16 {
    if let Some(keyword) = value.as_str() {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "normal" => return 400,
            "bold" => return 700,
            _ => {}
        }
    }
    match value_as_f64(value) {
        Some(n) => ((n / 100.0).round() * 100.0).clamp(100.0, 900.0) as u16,
        None => {
            if !value.is_null() {
                tracing::debug!(?value, "unreadable font weight, using default");
            }
            FONT_WEIGHT_DEFAULT
        }
    }
}

/// Reads a font family stack. Empty or non-string values are `None`.
pub fn parse_font_family(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reads a letter spacing; see [`LetterSpacing::parse_value`].
pub fn parse_letter_spacing(value: &Value) -> LetterSpacing {
    LetterSpacing::parse_value(value)
}

/// Unit of a non-`normal` letter spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterSpacingUnit {
    #[default]
    Em,
    Px,
}

impl LetterSpacingUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterSpacingUnit::Em => "em",
            LetterSpacingUnit::Px => "px",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "em" => Some(LetterSpacingUnit::Em),
            "px" => Some(LetterSpacingUnit::Px),
            _ => None,
        }
    }
}

/// Letter spacing, including the CSS `normal` keyword.
///
/// When `is_normal` is set the value serializes as `normal`; `value` and
/// `unit` are kept so an editor can restore them when the flag is cleared.
/// A zero value is not `normal`: `0em` stays `0em`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterSpacing {
    pub value: f64,
    pub unit: LetterSpacingUnit,
    pub is_normal: bool,
}

impl LetterSpacing {
    /// The `normal` keyword.
    pub const NORMAL: LetterSpacing = LetterSpacing {
        value: 0.0,
        unit: LetterSpacingUnit::Em,
        is_normal: true,
    };

    pub const fn em(value: f64) -> Self {
        Self {
            value,
            unit: LetterSpacingUnit::Em,
            is_normal: false,
        }
    }

    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: LetterSpacingUnit::Px,
            is_normal: false,
        }
    }

    /// Parses a stored letter spacing. Never fails; unreadable input is
    /// [`LetterSpacing::NORMAL`].
    pub fn parse_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::NORMAL,
            Value::String(s) => Self::parse_string(s),
            Value::Number(_) => match value_as_f64(value) {
                Some(n) => Self::em(n),
                None => Self::NORMAL,
            },
            Value::Object(map) => Self::parse_object(map),
            _ => Self::NORMAL,
        }
    }

    /// Parses `"normal"` or `"<number><em|px>"`; the unit defaults to `em`.
    pub fn parse_string(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("normal") {
            return Self::NORMAL;
        }
        let Some(caps) = LETTER_SPACING_PATTERN.captures(s) else {
            tracing::debug!(input = s, "letter spacing did not match, using normal");
            return Self::NORMAL;
        };
        let Ok(n) = caps[1].parse::<f64>() else {
            return Self::NORMAL;
        };
        let unit = caps
            .get(2)
            .and_then(|m| LetterSpacingUnit::parse(m.as_str()))
            .unwrap_or_default();
        Self {
            value: n,
            unit,
            is_normal: false,
        }
    }

    fn parse_object(map: &Map<String, Value>) -> Self {
        let unit = map
            .get("unit")
            .and_then(Value::as_str)
            .and_then(LetterSpacingUnit::parse)
            .unwrap_or_default();
        let value = map.get("value").and_then(value_as_f64);
        let is_normal = map
            .get("isNormal")
            .and_then(Value::as_bool)
            .unwrap_or(value.is_none());
        Self {
            value: value.unwrap_or(0.0),
            unit,
            is_normal,
        }
    }

    /// The CSS form: `normal` or `${value}${unit}`.
    pub fn to_css(&self) -> String {
        if self.is_normal {
            "normal".to_string()
        } else {
            format!("{}{}", format_number(self.value), self.unit.as_str())
        }
    }

    /// The stored form, which is the CSS string.
    pub fn to_value(&self) -> Value {
        Value::String(self.to_css())
    }
}

impl Default for LetterSpacing {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for LetterSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
