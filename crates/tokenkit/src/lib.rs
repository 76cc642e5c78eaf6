//! # Tokenkit - Design Token Documents and CSS Variables
//!
//! `tokenkit` builds on [`tokenkit_codec`] (re-exported as [`codec`]) to work
//! with whole design tokens: the stored record, its CSS variable, documents
//! of many tokens, and the stylesheets they export to.
//!
//! ## Core Concepts
//!
//! - [`Token`]: one stored design value with category, type, path and name
//! - [`TokenValue`]: a token's value decoded into its canonical shape
//! - [`TokenSet`]: a JSON or YAML document of tokens, unique by path
//! - [`project`]: CSS custom property values, with composite typography and
//!   grids expanded into per-property variables
//! - [`Exporter`]: renders variables as CSS, SCSS, JSON or a custom template
//! - [`Config`]: export settings from `tokenkit.yaml`
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use tokenkit::{Category, Exporter, ExportFormat, ProjectOptions, Token, TokenSet, TokenType};
//!
//! let mut set = TokenSet::new();
//! set.insert(
//!     Token::new(Category::Color, "", "Brand", "color/brand")
//!         .with_value(json!({"hex": "#3b82f6"})),
//! ).unwrap();
//!
//! // A legacy font-size token opened in the composite editor and saved
//! let mut body = Token::new(Category::Typography, TokenType::FontSize, "Body", "typography/body")
//!     .with_value(json!({"value": 1.5, "unit": "rem"}));
//! let composite = body.composite();
//! body.save_composite(&composite).unwrap();
//! set.insert(body).unwrap();
//!
//! let vars = set.css_variables(&ProjectOptions::default());
//! assert_eq!(vars["--color-brand"], "#3b82f6");
//! assert_eq!(vars["--typography-body-size"], "1.5rem");
//! assert_eq!(vars["--typography-body-weight"], "400");
//!
//! let css = Exporter::new(ExportFormat::Css).render(&vars).unwrap();
//! assert!(css.starts_with(":root {\n  --color-brand: #3b82f6;\n"));
//! ```
//!
//! ## Errors
//!
//! Decoding a value never fails: the codecs fall back to category defaults.
//! [`TokenError`] covers the rest: file I/O, document parsing, duplicate
//! paths, edits to generated tokens, disallowed type changes and template
//! rendering.

pub mod config;
mod error;
pub mod export;
pub mod project;
pub mod set;
pub mod token;

pub use tokenkit_codec as codec;

pub use config::{Config, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
pub use error::{Result, TokenError};
pub use export::{ExportFormat, Exporter};
pub use project::{
    css_value, expand_composite, expand_grid, project_token, token_to_css_value, ProjectOptions,
};
pub use set::{DocumentFormat, Issue, IssueKind, Normalized, TokenSet};
pub use token::{css_variable_name, slug, Category, Token, TokenType, TokenValue, GENERATED_PREFIX};
