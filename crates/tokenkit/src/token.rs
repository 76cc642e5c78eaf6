//! The token record and its typed value.
//!
//! A [`Token`] is stored with a loosely-typed `value`; [`Token::decode`]
//! runs it through the codec for its category and type and yields a
//! [`TokenValue`]. Writing back goes through [`Token::set_value`] or, for
//! the composite typography editor, [`Token::save_composite`], which also
//! promotes the token's type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokenkit_codec::number::json_number;
use tokenkit_codec::typography::{
    is_composite_value, match_token_type, parse_font_family, parse_font_weight,
    parse_letter_spacing, parse_line_height, FONT_WEIGHT_DEFAULT, LINE_HEIGHT_DEFAULT,
};
use tokenkit_codec::{
    ColorValue, CompositeTypography, Dimension, GridValue, LetterSpacing, ShadowValue,
    TypographyField, FONT_SIZE_DEFAULT, RADIUS_DEFAULT, SPACING_DEFAULT,
};

use crate::error::{Result, TokenError};

/// Path prefix of tokens generated from typography roles.
pub const GENERATED_PREFIX: &str = "typography/role/";

// ============================================================================
// Category
// ============================================================================

/// What kind of design value a token holds. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Color,
    Typography,
    Spacing,
    Shadow,
    Radius,
    Grid,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Color,
        Category::Typography,
        Category::Spacing,
        Category::Shadow,
        Category::Radius,
        Category::Grid,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Typography => "typography",
            Category::Spacing => "spacing",
            Category::Shadow => "shadow",
            Category::Radius => "radius",
            Category::Grid => "grid",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

// ============================================================================
// TokenType
// ============================================================================

/// The category-specific sub-kind stored in a token's `type` field.
///
/// Typography types are recognized; any other string is kept as
/// [`TokenType::Other`] so records round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenType {
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    LetterSpacing,
    TypographyComposite,
    #[default]
    Untyped,
    Other(String),
}

impl TokenType {
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::FontFamily => "fontFamily",
            TokenType::FontSize => "fontSize",
            TokenType::FontWeight => "fontWeight",
            TokenType::LineHeight => "lineHeight",
            TokenType::LetterSpacing => "letterSpacing",
            TokenType::TypographyComposite => "typography-composite",
            TokenType::Untyped => "",
            TokenType::Other(s) => s,
        }
    }

    /// The typography field a simple typography type names.
    pub fn typography_field(&self) -> Option<TypographyField> {
        match self {
            TokenType::FontFamily => Some(TypographyField::FontFamily),
            TokenType::FontSize => Some(TypographyField::FontSize),
            TokenType::FontWeight => Some(TypographyField::FontWeight),
            TokenType::LineHeight => Some(TypographyField::LineHeight),
            TokenType::LetterSpacing => Some(TypographyField::LetterSpacing),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, TokenType::TypographyComposite)
    }

    /// Whether this is one of the five simple typography types.
    pub fn is_simple_typography(&self) -> bool {
        self.typography_field().is_some()
    }
}

impl From<TypographyField> for TokenType {
    fn from(field: TypographyField) -> Self {
        match field {
            TypographyField::FontFamily => TokenType::FontFamily,
            TypographyField::FontSize => TokenType::FontSize,
            TypographyField::FontWeight => TokenType::FontWeight,
            TypographyField::LineHeight => TokenType::LineHeight,
            TypographyField::LetterSpacing => TokenType::LetterSpacing,
        }
    }
}

impl From<&str> for TokenType {
    fn from(s: &str) -> Self {
        match s {
            "fontFamily" => TokenType::FontFamily,
            "fontSize" => TokenType::FontSize,
            "fontWeight" => TokenType::FontWeight,
            "lineHeight" => TokenType::LineHeight,
            "letterSpacing" => TokenType::LetterSpacing,
            "typography-composite" => TokenType::TypographyComposite,
            "" => TokenType::Untyped,
            other => TokenType::Other(other.to_string()),
        }
    }
}

impl From<String> for TokenType {
    fn from(s: String) -> Self {
        TokenType::from(s.as_str())
    }
}

impl From<TokenType> for String {
    fn from(t: TokenType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TokenValue
// ============================================================================

/// A decoded token value, one variant per canonical shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Color(ColorValue),
    /// Spacing, radius and font size.
    Dimension(Dimension),
    FontFamily(Option<String>),
    FontWeight(u16),
    LineHeight(f64),
    LetterSpacing(LetterSpacing),
    Composite(CompositeTypography),
    Shadow(ShadowValue),
    Grid(GridValue),
    Other(Value),
}

impl TokenValue {
    /// The value a new token of this category and type starts with.
    pub fn default_for(category: Category, token_type: &TokenType) -> Self {
        match category {
            Category::Color => TokenValue::Color(ColorValue::default()),
            Category::Spacing => TokenValue::Dimension(SPACING_DEFAULT),
            Category::Radius => TokenValue::Dimension(RADIUS_DEFAULT),
            Category::Shadow => TokenValue::Shadow(ShadowValue::default()),
            Category::Grid => TokenValue::Grid(GridValue::default()),
            Category::Other => TokenValue::Other(Value::String(String::new())),
            Category::Typography => match token_type.typography_field() {
                Some(TypographyField::FontFamily) => TokenValue::FontFamily(None),
                Some(TypographyField::FontSize) => TokenValue::Dimension(FONT_SIZE_DEFAULT),
                Some(TypographyField::FontWeight) => TokenValue::FontWeight(FONT_WEIGHT_DEFAULT),
                Some(TypographyField::LineHeight) => TokenValue::LineHeight(LINE_HEIGHT_DEFAULT),
                Some(TypographyField::LetterSpacing) => {
                    TokenValue::LetterSpacing(LetterSpacing::NORMAL)
                }
                None => TokenValue::Composite(CompositeTypography::default()),
            },
        }
    }

    /// The storage form.
    pub fn to_value(&self) -> Value {
        match self {
            TokenValue::Color(c) => c.to_value(),
            TokenValue::Dimension(d) => d.to_value(),
            TokenValue::FontFamily(f) => f.clone().map(Value::String).unwrap_or(Value::Null),
            TokenValue::FontWeight(w) => Value::from(*w),
            TokenValue::LineHeight(lh) => json_number(*lh),
            TokenValue::LetterSpacing(ls) => ls.to_value(),
            TokenValue::Composite(c) => c.to_value(),
            TokenValue::Shadow(s) => s.to_value(),
            TokenValue::Grid(g) => g.to_value(),
            TokenValue::Other(v) => v.clone(),
        }
    }
}

// ============================================================================
// Naming
// ============================================================================

/// Lowercase ASCII slug: transliterated, runs of anything that is not a
/// letter or digit collapsed to one `-`, no leading or trailing `-`.
///
/// ```rust
/// use tokenkit::slug;
///
/// assert_eq!(slug("Body MD"), "body-md");
/// assert_eq!(slug("  Überschrift / Groß "), "uberschrift-gross");
/// ```
pub fn slug(name: &str) -> String {
    let ascii = deunicode::deunicode(name).to_lowercase();
    let mut out = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// `--{category}-{slug(name)}`.
pub fn css_variable_name(category: Category, name: &str) -> String {
    format!("--{}-{}", category, slug(name))
}

// ============================================================================
// Token
// ============================================================================

/// A single named design value as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    category: Category,
    #[serde(rename = "type", default, skip_serializing_if = "is_untyped")]
    token_type: TokenType,
    path: String,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    css_variable: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

fn is_untyped(t: &TokenType) -> bool {
    matches!(t, TokenType::Untyped)
}

impl Token {
    /// Creates a token holding the default value for its category and type.
    pub fn new(
        category: Category,
        token_type: impl Into<TokenType>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let token_type = token_type.into();
        let name = name.into();
        let value = TokenValue::default_for(category, &token_type).to_value();
        Self {
            id: None,
            css_variable: css_variable_name(category, &name),
            name,
            category,
            token_type,
            path: path.into(),
            value,
            description: None,
        }
    }

    /// Replaces the stored value, builder style.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The CSS custom property name. Set once, not changed by renames.
    pub fn css_variable(&self) -> &str {
        &self.css_variable
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Generated tokens live under `typography/role/` and are read-only.
    pub fn is_generated(&self) -> bool {
        self.path.starts_with(GENERATED_PREFIX)
    }

    /// Fails with [`TokenError::ReadOnly`] for generated tokens.
    pub fn ensure_editable(&self) -> Result<()> {
        if self.is_generated() {
            Err(TokenError::ReadOnly(self.path.clone()))
        } else {
            Ok(())
        }
    }

    /// Fills in the CSS variable name if the record had none.
    pub(crate) fn ensure_css_variable(&mut self) {
        if self.css_variable.trim().is_empty() {
            self.css_variable = css_variable_name(self.category, &self.name);
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.name = name.into();
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) -> Result<()> {
        self.ensure_editable()?;
        self.description = description;
        Ok(())
    }

    /// Replaces the stored value.
    pub fn set_value(&mut self, value: Value) -> Result<()> {
        self.ensure_editable()?;
        self.value = value;
        Ok(())
    }

    pub(crate) fn replace_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Changes the type. The only allowed change is from a simple
    /// typography type (or none) to `typography-composite`.
    pub fn set_type(&mut self, token_type: impl Into<TokenType>) -> Result<()> {
        self.ensure_editable()?;
        let token_type = token_type.into();
        if token_type == self.token_type {
            return Ok(());
        }
        let promotes = self.category == Category::Typography
            && token_type.is_composite()
            && (self.token_type.is_simple_typography() || self.token_type == TokenType::Untyped);
        if !promotes {
            return Err(TokenError::Demotion {
                path: self.path.clone(),
                from: self.token_type.to_string(),
                to: token_type.to_string(),
            });
        }
        tracing::debug!(
            path = %self.path,
            from = %self.token_type,
            "promoting to typography-composite"
        );
        self.token_type = token_type;
        Ok(())
    }

    /// The typography field a simple token holds: its explicit type, else
    /// a keyword match on the path, then the name, else font size.
    pub fn typography_field(&self) -> TypographyField {
        self.token_type
            .typography_field()
            .or_else(|| match_token_type(&self.path))
            .or_else(|| match_token_type(&self.name))
            .unwrap_or(TypographyField::FontSize)
    }

    /// Whether this token is, or will be read as, composite typography.
    /// An object with `fontFamily`, `fontSize` or `fontWeight` reads as
    /// composite whatever the stored type; the type itself only changes on
    /// [`save_composite`](Self::save_composite).
    pub fn is_composite(&self) -> bool {
        self.category == Category::Typography
            && (self.token_type.is_composite() || is_composite_value(&self.value))
    }

    /// The value as composite typography, legacy simple values included.
    /// Does not touch the stored value or type.
    pub fn composite(&self) -> CompositeTypography {
        CompositeTypography::parse_value(&self.value, self.typography_field())
    }

    /// Persists an edit from the composite editor: stores the full object
    /// and promotes the type to `typography-composite`.
    pub fn save_composite(&mut self, composite: &CompositeTypography) -> Result<()> {
        self.set_type(TokenType::TypographyComposite)?;
        self.value = composite.to_value();
        Ok(())
    }

    /// Decodes the stored value with the codec for this token's category
    /// and type. Never fails.
    pub fn decode(&self) -> TokenValue {
        let value = &self.value;
        match self.category {
            Category::Color => TokenValue::Color(ColorValue::parse_value(value)),
            Category::Spacing => {
                TokenValue::Dimension(Dimension::parse_value(value, SPACING_DEFAULT))
            }
            Category::Radius => {
                TokenValue::Dimension(Dimension::parse_value(value, RADIUS_DEFAULT))
            }
            Category::Shadow => TokenValue::Shadow(ShadowValue::parse_value(value)),
            Category::Grid => TokenValue::Grid(GridValue::parse_value(value)),
            Category::Other => TokenValue::Other(value.clone()),
            Category::Typography if self.is_composite() => TokenValue::Composite(self.composite()),
            Category::Typography => match self.typography_field() {
                TypographyField::FontFamily => TokenValue::FontFamily(parse_font_family(value)),
                TypographyField::FontSize => {
                    TokenValue::Dimension(Dimension::parse_value(value, FONT_SIZE_DEFAULT))
                }
                TypographyField::FontWeight => TokenValue::FontWeight(parse_font_weight(value)),
                TypographyField::LineHeight => TokenValue::LineHeight(parse_line_height(value)),
                TypographyField::LetterSpacing => {
                    TokenValue::LetterSpacing(parse_letter_spacing(value))
                }
            },
        }
    }
}
