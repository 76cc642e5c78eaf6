//! End-to-end codec scenarios on stored values.

use serde_json::json;
use tokenkit_codec::typography::{parse_font_weight, parse_line_height};
use tokenkit_codec::{
    contrast_text_color, ColorValue, Dimension, DimensionUnit, GridValue, LetterSpacing,
    ShadowValue, FONT_SIZE_DEFAULT, RADIUS_DEFAULT, SPACING_DEFAULT,
};

// ============================================================================
// Dimension
// ============================================================================

#[test]
fn test_dimension_string_px() {
    let d = Dimension::parse_value(&json!("16px"), SPACING_DEFAULT);
    assert_eq!(d, Dimension::new(16.0, DimensionUnit::Px));
    assert_eq!(d.to_css(), "16px");
}

#[test]
fn test_dimension_defaults_per_category() {
    assert_eq!(Dimension::parse_value(&json!(null), RADIUS_DEFAULT).to_css(), "8px");
    assert_eq!(Dimension::parse_value(&json!("wide"), SPACING_DEFAULT).to_css(), "16px");
    assert_eq!(Dimension::parse_value(&json!([1, 2]), FONT_SIZE_DEFAULT).to_css(), "16px");
}

#[test]
fn test_round_radius_previews_as_percent() {
    let d = Dimension::parse_value(&json!(9999), RADIUS_DEFAULT);
    assert_eq!(d.to_radius_css(), "50%");
    assert_eq!(d.to_value(), json!({"value": 9999, "unit": "px"}));
}

// ============================================================================
// Color
// ============================================================================

#[test]
fn test_color_from_hex_object() {
    let color = ColorValue::parse_value(&json!({"hex": "#3B82F6"}));
    let rgb = color.rgb();
    assert_eq!((rgb.r, rgb.g, rgb.b), (59, 130, 246));
    let hsl = color.hsl().rounded();
    assert_eq!((hsl.h, hsl.s, hsl.l), (217.0, 91.0, 60.0));
    assert!(color.is_persistable());
}

#[test]
fn test_partial_hex_is_held_not_persistable() {
    let mut color = ColorValue::parse_value(&json!("#3B82F6"));
    assert!(color.set_hex("#3B8"));
    assert_eq!(color.hex(), "#33BB88");
    assert!(!color.set_hex("#3B82"));
    assert_eq!(color.hex(), "#3B82");
    assert!(!color.is_persistable());
}

#[test]
fn test_contrast_text() {
    assert_eq!(contrast_text_color("#ffffff"), "#000000");
    assert_eq!(contrast_text_color("#1e293b"), "#ffffff");
}

// ============================================================================
// Shadow
// ============================================================================

#[test]
fn test_two_layer_shadow_round_trip() {
    let css = "0px 4px 6px 0px rgba(0,0,0,0.1), 0px 1px 2px 0px #000000";
    let shadow = ShadowValue::parse_value(&json!(css));
    assert_eq!(shadow.len(), 2);
    assert_eq!(shadow.layers()[0].y, 4.0);
    assert_eq!(shadow.layers()[0].color, "rgba(0,0,0,0.1)");
    assert_eq!(shadow.layers()[1].blur, 2.0);
    assert_eq!(shadow.layers()[1].color, "#000000");
    assert_eq!(shadow.to_css(), css);
}

#[test]
fn test_shadow_without_layers_reseeds_default() {
    let shadow = ShadowValue::parse_value(&json!("none"));
    assert_eq!(shadow.len(), 1);
    assert_eq!(shadow.to_css(), "0px 4px 6px 0px rgba(0,0,0,0.1)");
}

// ============================================================================
// Typography
// ============================================================================

#[test]
fn test_zero_em_letter_spacing_is_not_normal() {
    let spacing = LetterSpacing::parse_value(&json!({"value": 0, "unit": "em", "isNormal": false}));
    assert!(!spacing.is_normal);
    assert_eq!(spacing.to_css(), "0em");
}

#[test]
fn test_normal_letter_spacing_is_idempotent() {
    let once = LetterSpacing::parse_value(&json!("normal"));
    assert!(once.is_normal);
    let twice = LetterSpacing::parse_value(&once.to_value());
    assert!(twice.is_normal);
    assert_eq!(twice.to_css(), "normal");
}

#[test]
fn test_simple_field_fallbacks() {
    assert_eq!(parse_line_height(&json!("1.25")), 1.25);
    assert_eq!(parse_line_height(&json!(true)), 1.5);
    assert_eq!(parse_font_weight(&json!("650")), 700);
    assert_eq!(parse_font_weight(&json!(1200)), 900);
}

// ============================================================================
// Grid
// ============================================================================

#[test]
fn test_grid_clamp_boundaries() {
    assert_eq!(GridValue::parse_value(&json!({"columns": 0})).columns(), 1);
    assert_eq!(GridValue::parse_value(&json!({"columns": 30})).columns(), 24);
    let grid = GridValue::parse_value(&json!({"margin": -5, "gutter": -5}));
    assert_eq!((grid.margin(), grid.gutter()), (0.0, 0.0));
}
