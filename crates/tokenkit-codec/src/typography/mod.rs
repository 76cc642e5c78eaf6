//! Typography value codecs.
//!
//! Simple typography tokens hold one of five fields; composite tokens hold
//! all of them. This module reads both shapes:
//!
//! | Field | Canonical type | Stored as |
//! |-------|----------------|-----------|
//! | font family | `Option<String>` | `"Inter, sans-serif"` |
//! | font size | [`Dimension`](crate::dimension::Dimension) | `"16px"`, `{value, unit}` |
//! | font weight | `u16` (100–900) | `700`, `"700"`, `"bold"` |
//! | line height | `f64`, unitless | `1.5`, `"1.5"` |
//! | letter spacing | [`LetterSpacing`] | `"normal"`, `"0.05em"`, `0.05` |
//!
//! Which field a simple token holds is taken from its type when it has one
//! and otherwise guessed from its path with [`detect_token_type`].
//!
//! ```rust
//! use serde_json::json;
//! use tokenkit_codec::typography::{CompositeTypography, TypographyField};
//!
//! let legacy = json!({"value": 1.5, "unit": "rem"});
//! let composite = CompositeTypography::parse_value(&legacy, TypographyField::FontSize);
//!
//! assert_eq!(composite.to_css().font_size, "1.5rem");
//! assert_eq!(composite.font_weight, 400);
//! assert_eq!(composite.to_css().letter_spacing, "normal");
//! ```

mod composite;
mod fields;
mod preset;

pub use composite::{is_composite_value, CompositeTypography, TypographyCss};
pub use fields::{
    detect_token_type, match_token_type, parse_font_family, parse_font_weight,
    parse_letter_spacing, parse_line_height, LetterSpacing, LetterSpacingUnit, TypographyField,
    FONT_WEIGHT_DEFAULT, LINE_HEIGHT_DEFAULT,
};
pub use preset::{matching_preset, preset_by_label, Preset, PRESETS};
