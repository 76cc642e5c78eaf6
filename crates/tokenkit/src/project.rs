//! CSS variable projection.
//!
//! Turns tokens into CSS custom property values for live preview and
//! export. Each token yields its own variable; composite typography and
//! grid tokens can also yield one variable per sub-property so stylesheets
//! can address them individually:
//!
//! ```text
//! --typography-body                 16px
//! --typography-body-family          Inter
//! --typography-body-size            16px
//! --typography-body-weight          400
//! --typography-body-line-height     1.5
//! --typography-body-letter-spacing  normal
//! ```
//!
//! Projection only reads tokens.

use std::collections::BTreeMap;

use serde_json::Value;
use tokenkit_codec::number::format_number;
use tokenkit_codec::{CompositeTypography, GridValue};

use crate::token::{Category, Token, TokenValue};

/// Controls which tokens and sub-variables are projected.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectOptions {
    /// Emit `-family`, `-size` and friends for composite typography.
    pub expand_composites: bool,
    /// Emit `-columns`, `-margin`, `-gutter` and `-breakpoint-*` for grids.
    pub expand_grid: bool,
    /// Preview the round radius sentinel as `50%`.
    pub round_radius_as_percent: bool,
    pub include_generated: bool,
    /// Only project these categories. `None` projects all.
    pub categories: Option<Vec<Category>>,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            expand_composites: true,
            expand_grid: true,
            round_radius_as_percent: true,
            include_generated: true,
            categories: None,
        }
    }
}

impl ProjectOptions {
    /// Whether `token` passes the generated and category filters.
    pub fn includes(&self, token: &Token) -> bool {
        if !self.include_generated && token.is_generated() {
            return false;
        }
        match &self.categories {
            Some(categories) => categories.contains(&token.category()),
            None => true,
        }
    }
}

/// The CSS value of a token's own variable, with default options.
pub fn token_to_css_value(token: &Token) -> String {
    css_value(token, &ProjectOptions::default())
}

/// The CSS value of a token's own variable.
///
/// Composite typography projects its font size here; the other fields are
/// only reachable through [`expand_composite`]. Grids project as compact
/// JSON.
pub fn css_value(token: &Token, options: &ProjectOptions) -> String {
    match token.decode() {
        TokenValue::Color(color) => color.to_css(),
        TokenValue::Dimension(d)
            if token.category() == Category::Radius && options.round_radius_as_percent =>
        {
            d.to_radius_css()
        }
        TokenValue::Dimension(d) => d.to_css(),
        TokenValue::FontFamily(family) => family.unwrap_or_else(|| "inherit".to_string()),
        TokenValue::FontWeight(weight) => weight.to_string(),
        TokenValue::LineHeight(lh) => format_number(lh),
        TokenValue::LetterSpacing(ls) => ls.to_css(),
        TokenValue::Composite(c) => c.font_size.to_css(),
        TokenValue::Shadow(shadow) => shadow.to_css(),
        TokenValue::Grid(grid) => grid.to_value().to_string(),
        TokenValue::Other(value) => other_css(&value),
    }
}

fn other_css(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The five sub-variables of a composite typography token. Empty for any
/// other token.
pub fn expand_composite(token: &Token) -> BTreeMap<String, String> {
    match token.decode() {
        TokenValue::Composite(c) => composite_variables(token.css_variable(), &c),
        _ => BTreeMap::new(),
    }
}

fn composite_variables(base: &str, c: &CompositeTypography) -> BTreeMap<String, String> {
    let css = c.to_css();
    BTreeMap::from([
        (
            format!("{base}-family"),
            css.font_family.unwrap_or_else(|| "inherit".to_string()),
        ),
        (format!("{base}-size"), css.font_size),
        (format!("{base}-weight"), css.font_weight.to_string()),
        (format!("{base}-line-height"), format_number(css.line_height)),
        (format!("{base}-letter-spacing"), css.letter_spacing),
    ])
}

/// Per-property variables of a grid token, lengths in `px`. Empty for any
/// other token.
pub fn expand_grid(token: &Token) -> BTreeMap<String, String> {
    match token.decode() {
        TokenValue::Grid(grid) => grid_variables(token.css_variable(), &grid),
        _ => BTreeMap::new(),
    }
}

fn grid_variables(base: &str, grid: &GridValue) -> BTreeMap<String, String> {
    let px = |n: f64| format!("{}px", format_number(n));
    let mut vars = BTreeMap::from([
        (format!("{base}-columns"), grid.columns().to_string()),
        (format!("{base}-margin"), px(grid.margin())),
        (format!("{base}-gutter"), px(grid.gutter())),
    ]);
    for (name, width) in grid.breakpoints().entries() {
        vars.insert(format!("{base}-breakpoint-{name}"), px(width));
    }
    vars
}

/// Every variable one token contributes under `options`. Does not apply
/// the token filters; see [`ProjectOptions::includes`].
pub fn project_token(token: &Token, options: &ProjectOptions) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    vars.insert(token.css_variable().to_string(), css_value(token, options));
    match token.decode() {
        TokenValue::Composite(c) if options.expand_composites => {
            vars.extend(composite_variables(token.css_variable(), &c));
        }
        TokenValue::Grid(grid) if options.expand_grid => {
            vars.extend(grid_variables(token.css_variable(), &grid));
        }
        _ => {}
    }
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;
    use serde_json::json;

    fn composite_token() -> Token {
        Token::new(
            Category::Typography,
            TokenType::TypographyComposite,
            "Body",
            "typography/body",
        )
        .with_value(json!({
            "fontFamily": "Inter, sans-serif",
            "fontSize": {"value": 1, "unit": "rem"},
            "fontWeight": 500,
            "lineHeight": 1.6,
            "letterSpacing": "0.01em"
        }))
    }

    #[test]
    fn test_css_value_per_category() {
        let color = Token::new(Category::Color, "", "Blue", "color/blue")
            .with_value(json!({"hex": "#3b82f6", "opacity": 0.5}));
        assert_eq!(token_to_css_value(&color), "rgba(59, 130, 246, 0.5)");

        let spacing = Token::new(Category::Spacing, "", "Md", "spacing/md").with_value(json!(12));
        assert_eq!(token_to_css_value(&spacing), "12px");

        let shadow = Token::new(Category::Shadow, "", "Sm", "shadow/sm");
        assert_eq!(token_to_css_value(&shadow), "0px 4px 6px 0px rgba(0,0,0,0.1)");

        let other = Token::new(Category::Other, "", "Z", "other/z").with_value(json!(10));
        assert_eq!(token_to_css_value(&other), "10");
    }

    #[test]
    fn test_round_radius() {
        let pill = Token::new(Category::Radius, "", "Pill", "radius/pill").with_value(json!(9999));
        assert_eq!(token_to_css_value(&pill), "50%");

        let options = ProjectOptions {
            round_radius_as_percent: false,
            ..Default::default()
        };
        assert_eq!(css_value(&pill, &options), "9999px");
        assert_eq!(pill.value(), &json!(9999));
    }

    #[test]
    fn test_expand_composite() {
        let vars = expand_composite(&composite_token());
        assert_eq!(vars.len(), 5);
        assert_eq!(vars["--typography-body-family"], "Inter, sans-serif");
        assert_eq!(vars["--typography-body-size"], "1rem");
        assert_eq!(vars["--typography-body-weight"], "500");
        assert_eq!(vars["--typography-body-line-height"], "1.6");
        assert_eq!(vars["--typography-body-letter-spacing"], "0.01em");
    }

    #[test]
    fn test_expand_composite_without_family() {
        let token = Token::new(Category::Typography, TokenType::TypographyComposite, "H1", "t/h1");
        let vars = expand_composite(&token);
        assert_eq!(vars["--typography-h1-family"], "inherit");
        assert_eq!(vars["--typography-h1-letter-spacing"], "normal");
    }

    #[test]
    fn test_expand_composite_ignores_simple_tokens() {
        let token = Token::new(Category::Typography, TokenType::FontWeight, "Bold", "t/bold");
        assert!(expand_composite(&token).is_empty());
    }

    #[test]
    fn test_projection_does_not_mutate() {
        let token = composite_token();
        let before = token.clone();
        let _ = project_token(&token, &ProjectOptions::default());
        assert_eq!(token, before);
    }

    #[test]
    fn test_grid_projection() {
        let grid = Token::new(Category::Grid, "", "Layout", "grid/layout");
        let css = token_to_css_value(&grid);
        assert!(!css.contains(' '));
        assert_eq!(
            serde_json::from_str::<Value>(&css).unwrap(),
            json!({
                "breakpoints": {"xs": 0, "sm": 640, "md": 768, "lg": 1024, "xl": 1280},
                "columns": 12,
                "margin": 16,
                "gutter": 24
            })
        );

        let vars = project_token(&grid, &ProjectOptions::default());
        assert_eq!(vars["--grid-layout-columns"], "12");
        assert_eq!(vars["--grid-layout-gutter"], "24px");
        assert_eq!(vars["--grid-layout-breakpoint-md"], "768px");
        assert_eq!(vars.len(), 1 + 3 + 5);
    }

    #[test]
    fn test_project_token_respects_expansion_flags() {
        let options = ProjectOptions {
            expand_composites: false,
            ..Default::default()
        };
        let vars = project_token(&composite_token(), &options);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars["--typography-body"], "1rem");
    }
}
