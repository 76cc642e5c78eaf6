//! Color values with hex, RGB and HSL kept in sync.
//!
//! The hex string is what gets persisted; RGB and HSL are derived from it and
//! recomputed whenever any one of the three is edited. Opacity is separate
//! and never affects the other three.
//!
//! Accepted stored shapes:
//!
//! - a string: `"#3b82f6"`, `"3b82f6"`, `"#fff"`
//! - an object: `{ "hex": "#3b82f6", "opacity": 0.5 }`
//! - an object without `hex` but with `rgb: {r, g, b}` or `hsl: {h, s, l}`
//!
//! A hex that is not `#` plus six hex digits is kept verbatim so an editor
//! can show what the user typed, but [`ColorValue::is_persistable`] reports
//! `false` and callers must not save it.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tokenkit_codec::color::{ColorValue, Rgb};
//!
//! let color = ColorValue::parse_value(&json!({"hex": "#3B82F6"}));
//! assert_eq!(color.rgb(), Rgb::new(59, 130, 246));
//! assert_eq!(color.hsl().rounded().h, 217.0);
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::number::{format_number, json_number, value_as_f64};

/// Hex used when nothing readable was stored.
pub const COLOR_DEFAULT_HEX: &str = "#000000";

static HEX6: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex regex"));

/// An sRGB byte triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
///
/// Stored at full precision so that converting back to RGB is exact; use
/// [`Hsl::rounded`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Whole-number components, with a hue of 360 wrapped to 0.
    pub fn rounded(&self) -> Hsl {
        Hsl {
            h: self.h.round().rem_euclid(360.0),
            s: self.s.round(),
            l: self.l.round(),
        }
    }

    fn normalized(self) -> Hsl {
        let finite = |n: f64| if n.is_finite() { n } else { 0.0 };
        Hsl {
            h: finite(self.h).rem_euclid(360.0),
            s: finite(self.s).clamp(0.0, 100.0),
            l: finite(self.l).clamp(0.0, 100.0),
        }
    }
}

/// Whether `s` is `#` followed by exactly six hex digits.
///
/// This is the check callers run before saving an edited color.
pub fn is_valid_hex(s: &str) -> bool {
    HEX6.is_match(s)
}

/// Decomposes a six-digit hex (with or without `#`) into bytes.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
}

/// Lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Standard RGB → HSL conversion.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

/// Standard HSL → RGB conversion, rounding each channel.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let hsl = hsl.normalized();
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    let to_byte = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;

    if s == 0.0 {
        let v = to_byte(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgb::new(
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Perceived brightness in `[0, 1]`: `(0.299 R + 0.587 G + 0.114 B) / 255`.
pub fn luminance(rgb: Rgb) -> f64 {
    (0.299 * rgb.r as f64 + 0.587 * rgb.g as f64 + 0.114 * rgb.b as f64) / 255.0
}

/// Whether text on this color should be dark. Invalid hex counts as dark
/// background.
pub fn is_light(hex: &str) -> bool {
    hex_to_rgb(hex).is_some_and(|rgb| luminance(rgb) > 0.5)
}

/// Black on light colors, white on dark ones.
pub fn contrast_text_color(hex: &str) -> &'static str {
    if is_light(hex) {
        "#000000"
    } else {
        "#ffffff"
    }
}

/// Prefixes `#` and expands `#rgb` shorthand. Returns the input unchanged
/// when that does not produce a valid hex.
fn normalize_hex(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let candidate = if digits.len() == 3 && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        digits.chars().flat_map(|c| [c, c]).collect::<String>()
    } else {
        digits.to_string()
    };
    let candidate = format!("#{}", candidate);
    if is_valid_hex(&candidate) {
        candidate
    } else {
        raw.to_string()
    }
}

/// A color token value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorValue {
    hex: String,
    rgb: Rgb,
    hsl: Hsl,
    opacity: f64,
}

impl ColorValue {
    /// A fully opaque color from a valid hex. Invalid input is kept as-is
    /// and marked non-persistable.
    pub fn from_hex(hex: &str) -> Self {
        let mut color = Self::default();
        color.set_hex(hex);
        color
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        let mut color = Self::default();
        color.set_rgb(rgb);
        color
    }

    pub fn from_hsl(hsl: Hsl) -> Self {
        let mut color = Self::default();
        color.set_hsl(hsl);
        color
    }

    /// Reads a stored color. Never fails.
    pub fn parse_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::from_hex(s),
            Value::Object(map) => Self::parse_object(map),
            Value::Null => Self::default(),
            _ => {
                tracing::debug!(?value, "unreadable color, using default");
                Self::default()
            }
        }
    }

    fn parse_object(map: &Map<String, Value>) -> Self {
        let supplied_rgb = map.get("rgb").and_then(parse_rgb_object);
        let supplied_hsl = map.get("hsl").and_then(parse_hsl_object);

        let mut color = match map.get("hex").and_then(Value::as_str) {
            Some(hex) => {
                let mut color = Self::from_hex(hex);
                if !color.is_persistable() {
                    if let Some(rgb) = supplied_rgb {
                        color.rgb = rgb;
                        color.hsl = rgb_to_hsl(rgb);
                    }
                }
                color
            }
            None => match (supplied_rgb, supplied_hsl) {
                (Some(rgb), _) => Self::from_rgb(rgb),
                (None, Some(hsl)) => Self::from_hsl(hsl),
                (None, None) => {
                    tracing::debug!("color object has no hex, rgb or hsl, using default");
                    Self::default()
                }
            },
        };

        if let Some(opacity) = map.get("opacity").and_then(value_as_f64) {
            color.set_opacity(opacity);
        }
        color
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Whether the hex may be saved.
    pub fn is_persistable(&self) -> bool {
        is_valid_hex(&self.hex)
    }

    /// Sets the hex. A valid hex recomputes RGB and HSL; an invalid one is
    /// held as typed and leaves them untouched. Returns whether it was valid.
    pub fn set_hex(&mut self, hex: &str) -> bool {
        self.hex = normalize_hex(hex);
        match hex_to_rgb(&self.hex) {
            Some(rgb) => {
                self.rgb = rgb;
                self.hsl = rgb_to_hsl(rgb);
                true
            }
            None => false,
        }
    }

    /// Sets RGB, recomputing hex and HSL.
    pub fn set_rgb(&mut self, rgb: Rgb) {
        self.rgb = rgb;
        self.hex = rgb_to_hex(rgb);
        self.hsl = rgb_to_hsl(rgb);
    }

    /// Sets HSL, recomputing RGB and hex. Hue wraps, saturation and
    /// lightness clamp to `[0, 100]`.
    pub fn set_hsl(&mut self, hsl: Hsl) {
        let hsl = hsl.normalized();
        self.hsl = hsl;
        self.rgb = hsl_to_rgb(hsl);
        self.hex = rgb_to_hex(self.rgb);
    }

    /// Sets opacity, clamped to `[0, 1]`. Non-finite input is ignored.
    pub fn set_opacity(&mut self, opacity: f64) {
        if opacity.is_finite() {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    /// Hex when fully opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        if self.opacity >= 1.0 {
            self.hex.clone()
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.rgb.r,
                self.rgb.g,
                self.rgb.b,
                format_number(self.opacity)
            )
        }
    }

    /// The stored object: `{hex, rgb, hsl, opacity}` with HSL rounded.
    pub fn to_value(&self) -> Value {
        let hsl = self.hsl.rounded();
        let mut rgb = Map::new();
        rgb.insert("r".into(), Value::from(self.rgb.r));
        rgb.insert("g".into(), Value::from(self.rgb.g));
        rgb.insert("b".into(), Value::from(self.rgb.b));
        let mut hsl_map = Map::new();
        hsl_map.insert("h".into(), json_number(hsl.h));
        hsl_map.insert("s".into(), json_number(hsl.s));
        hsl_map.insert("l".into(), json_number(hsl.l));

        let mut map = Map::new();
        map.insert("hex".into(), Value::String(self.hex.clone()));
        map.insert("rgb".into(), Value::Object(rgb));
        map.insert("hsl".into(), Value::Object(hsl_map));
        map.insert("opacity".into(), json_number(self.opacity));
        Value::Object(map)
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self {
            hex: COLOR_DEFAULT_HEX.to_string(),
            rgb: Rgb::new(0, 0, 0),
            hsl: Hsl::new(0.0, 0.0, 0.0),
            opacity: 1.0,
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn parse_rgb_object(value: &Value) -> Option<Rgb> {
    let map = value.as_object()?;
    let channel = |key: &str| {
        map.get(key)
            .and_then(value_as_f64)
            .map(|n| n.round().clamp(0.0, 255.0) as u8)
    };
    Some(Rgb::new(channel("r")?, channel("g")?, channel("b")?))
}

fn parse_hsl_object(value: &Value) -> Option<Hsl> {
    let map = value.as_object()?;
    let component = |key: &str| map.get(key).and_then(value_as_f64);
    Some(Hsl::new(component("h")?, component("s")?, component("l")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =========================================================================
    // Conversions
    // =========================================================================

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#3B82F6"), Some(Rgb::new(59, 130, 246)));
        assert_eq!(hex_to_rgb("ff6b35"), Some(Rgb::new(255, 107, 53)));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#gggggg"), None);
    }

    #[test]
    fn test_rgb_to_hex_is_lowercase() {
        assert_eq!(rgb_to_hex(Rgb::new(59, 130, 246)), "#3b82f6");
        assert_eq!(rgb_to_hex(Rgb::new(0, 0, 0)), "#000000");
    }

    #[test]
    fn test_rgb_to_hsl_known_values() {
        let hsl = rgb_to_hsl(Rgb::new(59, 130, 246)).rounded();
        assert_eq!((hsl.h, hsl.s, hsl.l), (217.0, 91.0, 60.0));

        let red = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert_eq!((red.h, red.s, red.l), (0.0, 100.0, 50.0));

        let gray = rgb_to_hsl(Rgb::new(128, 128, 128)).rounded();
        assert_eq!((gray.h, gray.s, gray.l), (0.0, 0.0, 50.0));
    }

    #[test]
    fn test_hsl_to_rgb_known_values() {
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 100.0, 50.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(120.0, 100.0, 50.0)), Rgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(240.0, 100.0, 50.0)), Rgb::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 0.0, 100.0)), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_rounded_hue_wraps() {
        assert_eq!(Hsl::new(359.7, 50.0, 50.0).rounded().h, 0.0);
    }

    #[test]
    fn test_is_valid_hex() {
        assert!(is_valid_hex("#3b82f6"));
        assert!(is_valid_hex("#3B82F6"));
        assert!(!is_valid_hex("3b82f6"));
        assert!(!is_valid_hex("#3b82f"));
        assert!(!is_valid_hex("#fff"));
        assert!(!is_valid_hex("#3b82f6ff"));
    }

    #[test]
    fn test_contrast_text_color() {
        assert_eq!(contrast_text_color("#ffffff"), "#000000");
        assert_eq!(contrast_text_color("#facc15"), "#000000");
        assert_eq!(contrast_text_color("#1e293b"), "#ffffff");
        assert_eq!(contrast_text_color("#000000"), "#ffffff");
        assert_eq!(contrast_text_color("nonsense"), "#ffffff");
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn test_parse_object_with_hex() {
        let c = ColorValue::parse_value(&json!({"hex": "#3B82F6"}));
        assert_eq!(c.hex(), "#3B82F6");
        assert_eq!(c.rgb(), Rgb::new(59, 130, 246));
        let hsl = c.hsl().rounded();
        assert_eq!((hsl.h, hsl.s, hsl.l), (217.0, 91.0, 60.0));
        assert_eq!(c.opacity(), 1.0);
        assert!(c.is_persistable());
    }

    #[test]
    fn test_parse_string_adds_hash() {
        let c = ColorValue::parse_value(&json!("3b82f6"));
        assert_eq!(c.hex(), "#3b82f6");
        assert!(c.is_persistable());
    }

    #[test]
    fn test_parse_expands_shorthand() {
        let c = ColorValue::parse_value(&json!("#f80"));
        assert_eq!(c.hex(), "#ff8800");
        assert_eq!(c.rgb(), Rgb::new(255, 136, 0));
    }

    #[test]
    fn test_parse_invalid_hex_kept_but_not_persistable() {
        let c = ColorValue::parse_value(&json!({"hex": "#3b8"}));
        assert_eq!(c.hex(), "#33bb88");

        let c = ColorValue::parse_value(&json!({"hex": "#3b82", "rgb": {"r": 1, "g": 2, "b": 3}}));
        assert_eq!(c.hex(), "#3b82");
        assert!(!c.is_persistable());
        assert_eq!(c.rgb(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_parse_object_without_hex() {
        let c = ColorValue::parse_value(&json!({"rgb": {"r": 255, "g": 0, "b": 0}}));
        assert_eq!(c.hex(), "#ff0000");

        let c = ColorValue::parse_value(&json!({"hsl": {"h": 120, "s": 100, "l": 50}}));
        assert_eq!(c.hex(), "#00ff00");

        let c = ColorValue::parse_value(&json!({"name": "brand"}));
        assert_eq!(c, ColorValue::default());
    }

    #[test]
    fn test_parse_opacity_clamped() {
        let c = ColorValue::parse_value(&json!({"hex": "#000000", "opacity": 1.5}));
        assert_eq!(c.opacity(), 1.0);
        let c = ColorValue::parse_value(&json!({"hex": "#000000", "opacity": "0.25"}));
        assert_eq!(c.opacity(), 0.25);
    }

    #[test]
    fn test_parse_other_shapes_default() {
        assert_eq!(ColorValue::parse_value(&json!(42)), ColorValue::default());
        assert_eq!(ColorValue::parse_value(&Value::Null), ColorValue::default());
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    #[test]
    fn test_set_rgb_updates_hex_and_hsl() {
        let mut c = ColorValue::default();
        c.set_rgb(Rgb::new(255, 0, 0));
        assert_eq!(c.hex(), "#ff0000");
        assert_eq!(c.hsl(), Hsl::new(0.0, 100.0, 50.0));
    }

    #[test]
    fn test_set_hsl_updates_rgb_and_hex() {
        let mut c = ColorValue::default();
        c.set_hsl(Hsl::new(480.0, 120.0, 50.0));
        assert_eq!(c.hsl(), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(c.rgb(), Rgb::new(0, 255, 0));
        assert_eq!(c.hex(), "#00ff00");
    }

    #[test]
    fn test_partial_hex_is_held_without_touching_rgb() {
        let mut c = ColorValue::from_hex("#3b82f6");
        assert!(!c.set_hex("#3b8z"));
        assert_eq!(c.hex(), "#3b8z");
        assert_eq!(c.rgb(), Rgb::new(59, 130, 246));
        assert!(!c.is_persistable());
    }

    #[test]
    fn test_opacity_is_independent() {
        let mut c = ColorValue::from_hex("#3b82f6");
        c.set_opacity(0.5);
        assert_eq!(c.hex(), "#3b82f6");
        assert_eq!(c.rgb(), Rgb::new(59, 130, 246));
        c.set_opacity(f64::NAN);
        assert_eq!(c.opacity(), 0.5);
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    #[test]
    fn test_to_css() {
        let mut c = ColorValue::from_hex("#3b82f6");
        assert_eq!(c.to_css(), "#3b82f6");
        c.set_opacity(0.5);
        assert_eq!(c.to_css(), "rgba(59, 130, 246, 0.5)");
    }

    #[test]
    fn test_to_value_reparses() {
        let mut c = ColorValue::from_hex("#3b82f6");
        c.set_opacity(0.8);
        let value = c.to_value();
        assert_eq!(value["hsl"], json!({"h": 217, "s": 91, "l": 60}));
        assert_eq!(ColorValue::parse_value(&value), c);
    }
}
