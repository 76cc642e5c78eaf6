//! # Tokenkit Codec - Design Token Value Codecs
//!
//! `tokenkit-codec` reads the loosely-typed values design tokens are stored
//! with (numbers, `"16px"` strings, `{value, unit}` objects, legacy shapes
//! from old imports) into canonical Rust types, and writes them back out as
//! storage values and CSS strings.
//!
//! Codecs never reject input. Anything they cannot make sense of falls back
//! to the category default and is reported at `debug` level through
//! `tracing`. Callers that need to refuse bad input check the validity
//! predicates ([`color::is_valid_hex`], [`ColorValue::is_persistable`])
//! before saving.
//!
//! ## Codecs
//!
//! | Module | Canonical type | CSS form |
//! |--------|----------------|----------|
//! | [`dimension`] | [`Dimension`] | `16px`, `1.5rem`, `50%` |
//! | [`typography`] | [`CompositeTypography`] and the simple fields | per field |
//! | [`color`] | [`ColorValue`] | `#3b82f6`, `rgba(59, 130, 246, 0.5)` |
//! | [`shadow`] | [`ShadowValue`] | `box-shadow` list |
//! | [`grid`] | [`GridValue`] | stored object |
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use tokenkit_codec::{ColorValue, Dimension, ShadowValue, SPACING_DEFAULT};
//!
//! let gap = Dimension::parse_value(&json!("1.5rem"), SPACING_DEFAULT);
//! assert_eq!(gap.to_css(), "1.5rem");
//!
//! let blue = ColorValue::parse_value(&json!({"hex": "#3B82F6"}));
//! assert_eq!((blue.rgb().r, blue.rgb().g, blue.rgb().b), (59, 130, 246));
//!
//! let css = "0px 4px 6px 0px rgba(0,0,0,0.1), 0px 1px 2px 0px #000000";
//! let shadow = ShadowValue::parse_value(&json!(css));
//! assert_eq!(shadow.len(), 2);
//! assert_eq!(shadow.to_css(), css);
//! ```

pub mod color;
pub mod dimension;
pub mod grid;
pub mod number;
pub mod shadow;
pub mod typography;

pub use color::{
    contrast_text_color, hex_to_rgb, hsl_to_rgb, is_light, is_valid_hex, rgb_to_hex, rgb_to_hsl,
    ColorValue, Hsl, Rgb, COLOR_DEFAULT_HEX,
};
pub use dimension::{
    Dimension, DimensionUnit, FONT_SIZE_DEFAULT, RADIUS_DEFAULT, ROUND_RADIUS, SPACING_DEFAULT,
};
pub use grid::{Breakpoints, GridValue};
pub use number::format_number;
pub use shadow::{
    format_shadows, parse_css_shadow, ShadowLayer, ShadowValue, SHADOW_DEFAULT_COLOR,
};
pub use typography::{
    detect_token_type, CompositeTypography, LetterSpacing, LetterSpacingUnit, Preset,
    TypographyCss, TypographyField,
};
