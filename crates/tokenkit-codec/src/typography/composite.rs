//! Composite typography: family, size, weight, line height and letter
//! spacing bundled in one value.
//!
//! Legacy tokens hold a single field (`"1.5rem"`, `700`, `"Inter"`). The
//! composite editor still needs all five, so [`CompositeTypography::parse_value`]
//! reads a simple value into the matching field and defaults the rest. The
//! stored value is untouched until the caller writes back
//! [`CompositeTypography::to_value`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dimension::{Dimension, FONT_SIZE_DEFAULT};
use crate::number::json_number;

use super::fields::{
    parse_font_family, parse_font_weight, parse_line_height, LetterSpacing, TypographyField,
    FONT_WEIGHT_DEFAULT, LINE_HEIGHT_DEFAULT,
};
use super::preset::{matching_preset, Preset};

const COMPOSITE_MARKERS: [&str; 3] = ["fontFamily", "fontSize", "fontWeight"];

/// All five typography fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeTypography {
    pub font_family: Option<String>,
    pub font_size: Dimension,
    pub font_weight: u16,
    pub line_height: f64,
    pub letter_spacing: LetterSpacing,
}

impl Default for CompositeTypography {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: FONT_SIZE_DEFAULT,
            font_weight: FONT_WEIGHT_DEFAULT,
            line_height: LINE_HEIGHT_DEFAULT,
            letter_spacing: LetterSpacing::NORMAL,
        }
    }
}

/// CSS-ready typography values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyCss {
    pub font_family: Option<String>,
    pub font_size: String,
    pub font_weight: u16,
    pub line_height: f64,
    pub letter_spacing: String,
}

/// Whether a stored value already has the composite shape.
pub fn is_composite_value(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| COMPOSITE_MARKERS.iter().any(|k| map.contains_key(*k)))
}

impl CompositeTypography {
    /// Reads a stored value as composite typography.
    ///
    /// Objects carrying any of `fontFamily`, `fontSize` or `fontWeight` are
    /// read field by field. Any other value is taken to be the single field
    /// named by `field` (the token's simple type, or a guess from its path
    /// via [`detect_token_type`](super::detect_token_type)).
    pub fn parse_value(value: &Value, field: TypographyField) -> Self {
        match value.as_object() {
            Some(map) if is_composite_value(value) => Self::parse_object(map),
            _ => Self::from_simple(value, field),
        }
    }

    fn parse_object(map: &Map<String, Value>) -> Self {
        let get = |field: TypographyField| map.get(field.key()).unwrap_or(&Value::Null);
        Self {
            font_family: parse_font_family(get(TypographyField::FontFamily)),
            font_size: Dimension::parse_value(get(TypographyField::FontSize), FONT_SIZE_DEFAULT),
            font_weight: parse_font_weight(get(TypographyField::FontWeight)),
            line_height: parse_line_height(get(TypographyField::LineHeight)),
            letter_spacing: LetterSpacing::parse_value(get(TypographyField::LetterSpacing)),
        }
    }

    /// Builds a composite with only `field` populated from `value`.
    pub fn from_simple(value: &Value, field: TypographyField) -> Self {
        let mut composite = Self::default();
        composite.set_field(field, value);
        composite
    }

    /// Overwrites one field from a stored simple value.
    pub fn set_field(&mut self, field: TypographyField, value: &Value) {
        match field {
            TypographyField::FontFamily => self.font_family = parse_font_family(value),
            TypographyField::FontSize => {
                self.font_size = Dimension::parse_value(value, FONT_SIZE_DEFAULT)
            }
            TypographyField::FontWeight => self.font_weight = parse_font_weight(value),
            TypographyField::LineHeight => self.line_height = parse_line_height(value),
            TypographyField::LetterSpacing => {
                self.letter_spacing = LetterSpacing::parse_value(value)
            }
        }
    }

    /// Reads one field back out in its simple stored form.
    pub fn field_value(&self, field: TypographyField) -> Value {
        match field {
            TypographyField::FontFamily => self
                .font_family
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
            TypographyField::FontSize => Value::String(self.font_size.to_css()),
            TypographyField::FontWeight => Value::from(self.font_weight),
            TypographyField::LineHeight => json_number(self.line_height),
            TypographyField::LetterSpacing => self.letter_spacing.to_value(),
        }
    }

    /// Overwrites size, weight, line height and letter spacing at once.
    /// The font family is kept.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.font_size = preset.font_size;
        self.font_weight = preset.font_weight;
        self.line_height = preset.line_height;
        self.letter_spacing = preset.letter_spacing;
    }

    /// The preset whose size and weight match exactly, if any.
    pub fn matching_preset(&self) -> Option<&'static Preset> {
        matching_preset(&self.font_size, self.font_weight)
    }

    /// CSS values for each field.
    pub fn to_css(&self) -> TypographyCss {
        TypographyCss {
            font_family: self.font_family.clone(),
            font_size: self.font_size.to_css(),
            font_weight: self.font_weight,
            line_height: self.line_height,
            letter_spacing: self.letter_spacing.to_css(),
        }
    }

    /// The stored composite object.
    ///
    /// `fontSize` is kept as a `{value, unit}` object and `letterSpacing`
    /// as its CSS string; `fontFamily` is omitted when unset.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        let mut put = |field: TypographyField, value: Value| {
            map.insert(field.key().to_string(), value);
        };
        if let Some(family) = &self.font_family {
            put(TypographyField::FontFamily, Value::String(family.clone()));
        }
        put(TypographyField::FontSize, self.font_size.to_value());
        put(TypographyField::FontWeight, Value::from(self.font_weight));
        put(TypographyField::LineHeight, json_number(self.line_height));
        put(TypographyField::LetterSpacing, self.letter_spacing.to_value());
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::DimensionUnit;
    use crate::typography::preset::preset_by_label;
    use serde_json::json;

    #[test]
    fn test_parse_full_composite() {
        let value = json!({
            "fontFamily": "Inter",
            "fontSize": "20px",
            "fontWeight": 600,
            "lineHeight": 1.3,
            "letterSpacing": "-0.01em"
        });
        let c = CompositeTypography::parse_value(&value, TypographyField::FontSize);
        assert_eq!(c.font_family.as_deref(), Some("Inter"));
        assert_eq!(c.font_size, Dimension::px(20.0));
        assert_eq!(c.font_weight, 600);
        assert_eq!(c.line_height, 1.3);
        assert_eq!(c.letter_spacing, LetterSpacing::em(-0.01));
    }

    #[test]
    fn test_partial_composite_defaults_missing_fields() {
        let c = CompositeTypography::parse_value(
            &json!({"fontWeight": "bold"}),
            TypographyField::FontSize,
        );
        assert_eq!(c.font_weight, 700);
        assert_eq!(c.font_size, FONT_SIZE_DEFAULT);
        assert_eq!(c.line_height, LINE_HEIGHT_DEFAULT);
        assert!(c.letter_spacing.is_normal);
    }

    #[test]
    fn test_simple_dimension_object_is_not_composite() {
        let c = CompositeTypography::parse_value(
            &json!({"value": 1.5, "unit": "rem"}),
            TypographyField::FontSize,
        );
        assert_eq!(c.font_size, Dimension::new(1.5, DimensionUnit::Rem));
        assert_eq!(c.font_weight, 400);
        assert_eq!(c.line_height, 1.5);
        assert!(c.letter_spacing.is_normal);
        assert_eq!(c.font_family, None);
    }

    #[test]
    fn test_simple_values_fill_their_field() {
        let c = CompositeTypography::parse_value(&json!(700), TypographyField::FontWeight);
        assert_eq!(c.font_weight, 700);
        assert_eq!(c.font_size, FONT_SIZE_DEFAULT);

        let c = CompositeTypography::parse_value(&json!("Georgia"), TypographyField::FontFamily);
        assert_eq!(c.font_family.as_deref(), Some("Georgia"));

        let c = CompositeTypography::parse_value(&json!(1.2), TypographyField::LineHeight);
        assert_eq!(c.line_height, 1.2);

        let c = CompositeTypography::parse_value(&json!("0.1em"), TypographyField::LetterSpacing);
        assert_eq!(c.letter_spacing, LetterSpacing::em(0.1));
    }

    #[test]
    fn test_to_css() {
        let c = CompositeTypography {
            font_family: Some("Inter".into()),
            font_size: Dimension::new(1.5, DimensionUnit::Rem),
            font_weight: 500,
            line_height: 1.4,
            letter_spacing: LetterSpacing::em(0.0),
        };
        let css = c.to_css();
        assert_eq!(css.font_size, "1.5rem");
        assert_eq!(css.font_weight, 500);
        assert_eq!(css.line_height, 1.4);
        assert_eq!(css.letter_spacing, "0em");
    }

    #[test]
    fn test_to_value_shape() {
        let c = CompositeTypography {
            font_size: Dimension::new(1.5, DimensionUnit::Rem),
            ..Default::default()
        };
        assert_eq!(
            c.to_value(),
            json!({
                "fontSize": {"value": 1.5, "unit": "rem"},
                "fontWeight": 400,
                "lineHeight": 1.5,
                "letterSpacing": "normal"
            })
        );
    }

    #[test]
    fn test_to_value_reparses_identically() {
        let c = CompositeTypography {
            font_family: Some("Inter, sans-serif".into()),
            font_size: Dimension::px(18.0),
            font_weight: 300,
            line_height: 1.75,
            letter_spacing: LetterSpacing::px(0.5),
        };
        let back = CompositeTypography::parse_value(&c.to_value(), TypographyField::FontSize);
        assert_eq!(back, c);
    }

    #[test]
    fn test_apply_preset_keeps_family() {
        let mut c = CompositeTypography {
            font_family: Some("Inter".into()),
            ..Default::default()
        };
        let preset = preset_by_label("Heading 1").unwrap();
        c.apply_preset(preset);
        assert_eq!(c.font_family.as_deref(), Some("Inter"));
        assert_eq!(c.font_size, Dimension::px(36.0));
        assert_eq!(c.font_weight, 700);
        assert_eq!(c.line_height, 1.2);
        assert_eq!(c.letter_spacing, LetterSpacing::em(-0.01));
        assert_eq!(c.matching_preset().map(|p| p.label), Some("Heading 1"));
    }

    #[test]
    fn test_field_value_round_trips() {
        let c = CompositeTypography {
            font_size: Dimension::new(2.0, DimensionUnit::Em),
            ..Default::default()
        };
        assert_eq!(c.field_value(TypographyField::FontSize), json!("2em"));
        assert_eq!(c.field_value(TypographyField::FontWeight), json!(400));
        assert_eq!(c.field_value(TypographyField::LetterSpacing), json!("normal"));
        assert_eq!(c.field_value(TypographyField::FontFamily), Value::Null);
    }
}
