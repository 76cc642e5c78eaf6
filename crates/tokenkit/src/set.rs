//! Token documents.
//!
//! A [`TokenSet`] is the ordered list of tokens one document holds. Files
//! are JSON or YAML, either a bare array of token records or an object
//! with a `tokens` array:
//!
//! ```yaml
//! tokens:
//!   - name: Brand
//!     category: color
//!     path: color/brand
//!     value: { hex: "#3b82f6" }
//!   - name: Body
//!     category: typography
//!     type: fontSize
//!     path: typography/body
//!     value: { value: 1, unit: rem }
//! ```
//!
//! Loading is lenient: duplicate paths and non-persistable values are kept
//! so [`TokenSet::validate`] can report them. Editing through
//! [`TokenSet::insert`] refuses duplicates.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};
use crate::project::{project_token, ProjectOptions};
use crate::token::{Category, Token, TokenType, TokenValue};

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentIn {
    List(Vec<Token>),
    Wrapped { tokens: Vec<Token> },
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    tokens: &'a [Token],
}

/// On-disk format of a token document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            _ => Err(TokenError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// An ordered collection of tokens keyed by path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    tokens: Vec<Token>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-loaded tokens, filling in missing CSS variable names.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut set = Self { tokens };
        for token in &mut set.tokens {
            token.ensure_css_variable();
        }
        set
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::parse(json, DocumentFormat::Json, "JSON input")
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::parse(yaml, DocumentFormat::Yaml, "YAML input")
    }

    /// Loads a `.json`, `.yaml` or `.yml` document.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| TokenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::parse(&content, format, &path.display().to_string())?;
        tracing::info!(path = %path.display(), tokens = set.len(), "loaded token document");
        Ok(set)
    }

    fn parse(content: &str, format: DocumentFormat, origin: &str) -> Result<Self> {
        let doc: DocumentIn = match format {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
        .map_err(|message| TokenError::Parse {
            origin: origin.to_string(),
            message,
        })?;
        let tokens = match doc {
            DocumentIn::List(tokens) | DocumentIn::Wrapped { tokens } => tokens,
        };
        Ok(Self::from_tokens(tokens))
    }

    /// Pretty-printed JSON, `{ "tokens": [...] }`.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.document())
            .map(|s| s + "\n")
            .map_err(|e| TokenError::Serialize(e.to_string()))
    }

    /// YAML, `tokens: [...]`.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(&self.document()).map_err(|e| TokenError::Serialize(e.to_string()))
    }

    fn document(&self) -> DocumentOut<'_> {
        DocumentOut {
            tokens: &self.tokens,
        }
    }

    /// Writes the document in the format named by the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match DocumentFormat::from_path(path)? {
            DocumentFormat::Json => self.to_json_string()?,
            DocumentFormat::Yaml => self.to_yaml_string()?,
        };
        std::fs::write(path, content).map_err(|source| TokenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), tokens = self.len(), "saved token document");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, path: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.path() == path)
    }

    /// Mutable access by path. Generated tokens are returned too; their
    /// setters refuse edits.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| t.path() == path)
    }

    /// Appends a token. Fails if its path is taken.
    pub fn insert(&mut self, mut token: Token) -> Result<()> {
        if self.get(token.path()).is_some() {
            return Err(TokenError::DuplicatePath(token.path().to_string()));
        }
        token.ensure_css_variable();
        self.tokens.push(token);
        Ok(())
    }

    /// Removes and returns the token at `path`.
    pub fn remove(&mut self, path: &str) -> Result<Token> {
        let index = self
            .tokens
            .iter()
            .position(|t| t.path() == path)
            .ok_or_else(|| TokenError::NotFound(path.to_string()))?;
        Ok(self.tokens.remove(index))
    }

    /// Rewrites every value in its canonical storage form. Types are left
    /// alone; legacy typography stays simple. Colors whose hex is not valid
    /// are left as stored and listed in [`Normalized::skipped`].
    pub fn normalize(&mut self) -> Normalized {
        let mut report = Normalized::default();
        for token in &mut self.tokens {
            let decoded = token.decode();
            if let TokenValue::Color(color) = &decoded {
                if !color.is_persistable() {
                    tracing::warn!(
                        path = token.path(),
                        hex = color.hex(),
                        "invalid hex, not normalized"
                    );
                    report.skipped.push(token.path().to_string());
                    continue;
                }
            }
            let canonical = decoded.to_value();
            if &canonical != token.value() {
                tracing::debug!(path = token.path(), "normalized value");
                token.replace_value(canonical);
                report.changed += 1;
            }
        }
        report
    }

    /// The preview variable map for every token `options` includes.
    ///
    /// When two tokens share a variable name the later one wins.
    pub fn css_variables(&self, options: &ProjectOptions) -> BTreeMap<String, String> {
        self.tokens
            .iter()
            .filter(|t| options.includes(t))
            .flat_map(|t| project_token(t, options))
            .collect()
    }

    /// Problems that would stop the document from being saved as-is.
    pub fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut seen_paths = HashSet::new();
        let mut variables: HashMap<&str, &str> = HashMap::new();

        for token in &self.tokens {
            let path = token.path().to_string();
            let mut report = |kind| issues.push(Issue { path: path.clone(), kind });

            if !seen_paths.insert(token.path()) {
                report(IssueKind::DuplicatePath);
            }
            if token.name().trim().is_empty() {
                report(IssueKind::EmptyName);
            }
            if let Some(first) = variables.insert(token.css_variable(), token.path()) {
                if first != token.path() {
                    report(IssueKind::DuplicateVariable(token.css_variable().to_string()));
                }
            }
            if token.category() == Category::Typography {
                if let TokenType::Other(t) = token.token_type() {
                    report(IssueKind::UnknownTypographyType(t.clone()));
                }
            }
            if let TokenValue::Color(color) = token.decode() {
                if !color.is_persistable() {
                    report(IssueKind::InvalidHex(color.hex().to_string()));
                }
            }
        }
        issues
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// What [`TokenSet::normalize`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Values rewritten.
    pub changed: usize,
    /// Paths of values that cannot be persisted and were left untouched.
    pub skipped: Vec<String>,
}

/// A validation finding for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The color's hex is not `#rrggbb`.
    InvalidHex(String),
    DuplicatePath,
    /// Another token already projects to this variable.
    DuplicateVariable(String),
    UnknownTypographyType(String),
    EmptyName,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::InvalidHex(hex) => write!(f, "{}: invalid hex color '{}'", self.path, hex),
            IssueKind::DuplicatePath => write!(f, "{}: duplicate path", self.path),
            IssueKind::DuplicateVariable(var) => {
                write!(f, "{}: css variable {} is already used", self.path, var)
            }
            IssueKind::UnknownTypographyType(t) => {
                write!(f, "{}: unknown typography type '{}'", self.path, t)
            }
            IssueKind::EmptyName => write!(f, "{}: empty name", self.path),
        }
    }
}
