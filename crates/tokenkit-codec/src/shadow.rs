//! Multi-layer `box-shadow` values.
//!
//! A shadow token is a list of layers in CSS order: the first layer is drawn
//! on top, exactly as in a comma-separated `box-shadow` declaration. The list
//! is never empty; removing the last layer puts a default one back.
//!
//! # CSS parsing
//!
//! [`parse_css_shadow`] tokenizes with `cssparser`, so commas inside
//! `rgba(0,0,0,0.1)` do not split layers. Within a layer, every `px` length is
//! taken in order as x, y, blur and spread, and the first color (`rgb()`,
//! `rgba()`, `hsl()`, `hsla()` or `#hex`) is kept verbatim. Layers with fewer
//! than two `px` lengths are dropped.
//!
//! Only `px` lengths and functional or hex colors are understood: `1em`
//! offsets are ignored and named colors such as `red` fall back to the
//! default color.
//!
//! # Example
//!
//! ```rust
//! use tokenkit_codec::shadow::{format_shadows, parse_css_shadow};
//!
//! let css = "0px 4px 6px 0px rgba(0,0,0,0.1), 0px 1px 2px 0px #000000";
//! let layers = parse_css_shadow(css);
//! assert_eq!(layers.len(), 2);
//! assert_eq!(layers[1].color, "#000000");
//! assert_eq!(format_shadows(&layers), css);
//! ```

use cssparser::{ParseError, Parser, ParserInput, Token};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::number::{format_number, json_number, leading_float, value_as_f64};

/// Color given to layers that do not name one.
pub const SHADOW_DEFAULT_COLOR: &str = "rgba(0,0,0,0.1)";

const COLOR_FUNCTIONS: [&str; 4] = ["rgb", "rgba", "hsl", "hsla"];

/// One `box-shadow` layer. Lengths are in `px`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowLayer {
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    pub spread: f64,
    pub color: String,
}

impl ShadowLayer {
    pub fn new(x: f64, y: f64, blur: f64, spread: f64, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            blur,
            spread,
            color: color.into(),
        }
    }

    /// `"{x}px {y}px {blur}px {spread}px {color}"`.
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px {}",
            format_number(self.x),
            format_number(self.y),
            format_number(self.blur),
            format_number(self.spread),
            self.color
        )
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("x".into(), json_number(self.x));
        map.insert("y".into(), json_number(self.y));
        map.insert("blur".into(), json_number(self.blur));
        map.insert("spread".into(), json_number(self.spread));
        map.insert("color".into(), Value::String(self.color.clone()));
        Value::Object(map)
    }

    fn parse_object(map: &Map<String, Value>) -> Option<Self> {
        let length = |key: &str| map.get(key).and_then(value_as_f64);
        let color = map
            .get("color")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(SHADOW_DEFAULT_COLOR);
        Some(Self::new(
            length("x")?,
            length("y")?,
            length("blur").unwrap_or(0.0),
            length("spread").unwrap_or(0.0),
            color,
        ))
    }
}

impl Default for ShadowLayer {
    fn default() -> Self {
        Self::new(0.0, 4.0, 6.0, 0.0, SHADOW_DEFAULT_COLOR)
    }
}

/// Parses a `box-shadow` value into layers. Malformed layers are skipped;
/// the result may be empty.
pub fn parse_css_shadow(css: &str) -> Vec<ShadowLayer> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    match parser.parse_comma_separated(parse_layer) {
        Ok(layers) => layers.into_iter().flatten().collect(),
        Err(err) => {
            tracing::debug!(input = css, ?err, "unparseable box-shadow");
            Vec::new()
        }
    }
}

fn parse_layer<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> Result<Option<ShadowLayer>, ParseError<'i, ()>> {
    let mut lengths = Vec::with_capacity(4);
    let mut color: Option<String> = None;

    loop {
        let start = input.position();
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Dimension { ref unit, .. } if unit.eq_ignore_ascii_case("px") => {
                if let Some(n) = leading_float(input.slice_from(start)) {
                    lengths.push(n);
                }
            }
            Token::Function(ref name)
                if COLOR_FUNCTIONS
                    .iter()
                    .any(|f| name.eq_ignore_ascii_case(f)) =>
            {
                input.parse_nested_block(|block| {
                    while block.next().is_ok() {}
                    Ok::<(), ParseError<'i, ()>>(())
                })?;
                if color.is_none() {
                    color = Some(input.slice_from(start).to_string());
                }
            }
            Token::Hash(ref value) | Token::IDHash(ref value) => {
                if color.is_none() {
                    color = Some(format!("#{}", &**value));
                }
            }
            _ => {}
        }
    }

    if lengths.len() < 2 {
        tracing::debug!(?lengths, "shadow layer has fewer than two px lengths, skipping");
        return Ok(None);
    }

    Ok(Some(ShadowLayer {
        x: lengths[0],
        y: lengths[1],
        blur: lengths.get(2).copied().unwrap_or(0.0),
        spread: lengths.get(3).copied().unwrap_or(0.0),
        color: color.unwrap_or_else(|| SHADOW_DEFAULT_COLOR.to_string()),
    }))
}

/// Joins layers into a `box-shadow` value, separated by `", "`.
pub fn format_shadows(layers: &[ShadowLayer]) -> String {
    layers
        .iter()
        .map(ShadowLayer::to_css)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A non-empty, ordered list of shadow layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowValue {
    shadows: Vec<ShadowLayer>,
}

impl ShadowValue {
    /// Wraps `layers`, seeding one default layer if empty.
    pub fn from_layers(layers: Vec<ShadowLayer>) -> Self {
        let mut value = Self { shadows: layers };
        value.ensure_layer();
        value
    }

    /// Reads a stored shadow: a CSS string, `{ "shadows": [...] }`, a bare
    /// layer array, or a single layer object. Never fails.
    pub fn parse_value(value: &Value) -> Self {
        Self::from_layers(collect_layers(value))
    }

    pub fn layers(&self) -> &[ShadowLayer] {
        &self.shadows
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut ShadowLayer> {
        self.shadows.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.shadows.len()
    }

    /// Never true: a shadow always has at least one layer.
    pub fn is_empty(&self) -> bool {
        self.shadows.is_empty()
    }

    /// Appends a default layer and returns its index.
    pub fn add_layer(&mut self) -> usize {
        self.push_layer(ShadowLayer::default())
    }

    /// Appends `layer` and returns its index.
    pub fn push_layer(&mut self, layer: ShadowLayer) -> usize {
        self.shadows.push(layer);
        self.shadows.len() - 1
    }

    /// Removes the layer at `index`. Removing the only layer replaces it
    /// with a default one.
    pub fn remove_layer(&mut self, index: usize) -> Option<ShadowLayer> {
        if index >= self.shadows.len() {
            return None;
        }
        let removed = self.shadows.remove(index);
        self.ensure_layer();
        Some(removed)
    }

    /// Moves the layer at `from` so it ends up at `to`, shifting the layers
    /// in between. Returns `false` for out-of-range indices.
    pub fn move_layer(&mut self, from: usize, to: usize) -> bool {
        let len = self.shadows.len();
        if from >= len || to >= len {
            return false;
        }
        let layer = self.shadows.remove(from);
        self.shadows.insert(to, layer);
        true
    }

    /// Swaps two layers. Returns `false` for out-of-range indices.
    pub fn swap_layers(&mut self, a: usize, b: usize) -> bool {
        let len = self.shadows.len();
        if a >= len || b >= len {
            return false;
        }
        self.shadows.swap(a, b);
        true
    }

    /// The `box-shadow` CSS value.
    pub fn to_css(&self) -> String {
        format_shadows(&self.shadows)
    }

    /// The stored object: `{ "shadows": [{x, y, blur, spread, color}] }`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "shadows".into(),
            Value::Array(self.shadows.iter().map(ShadowLayer::to_value).collect()),
        );
        Value::Object(map)
    }

    fn ensure_layer(&mut self) {
        if self.shadows.is_empty() {
            self.shadows.push(ShadowLayer::default());
        }
    }
}

impl Default for ShadowValue {
    fn default() -> Self {
        Self::from_layers(Vec::new())
    }
}

fn collect_layers(value: &Value) -> Vec<ShadowLayer> {
    match value {
        Value::String(css) => parse_css_shadow(css),
        Value::Array(items) => items.iter().flat_map(collect_layers).collect(),
        Value::Object(map) => match map.get("shadows") {
            Some(inner) => collect_layers(inner),
            None => ShadowLayer::parse_object(map).into_iter().collect(),
        },
        _ => Vec::new(),
    }
}
