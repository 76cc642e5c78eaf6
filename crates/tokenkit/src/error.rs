//! Error types for token documents, export and configuration.
//!
//! The value codecs never fail; errors only come from the layers around
//! them: reading and writing files, rejecting edits that would break a
//! document's invariants, and rendering export templates.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, editing, saving or exporting tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token document could not be parsed.
    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    /// A token document could not be serialized.
    #[error("failed to serialize tokens: {0}")]
    Serialize(String),

    /// The file extension is not one of `json`, `yaml` or `yml`.
    #[error("unsupported token file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A token with this path already exists in the set.
    #[error("duplicate token path '{0}'")]
    DuplicatePath(String),

    /// No token has this path.
    #[error("no token at path '{0}'")]
    NotFound(String),

    /// The token is generated and cannot be edited.
    #[error("token '{0}' is generated and read-only")]
    ReadOnly(String),

    /// A type change other than simple typography to composite.
    #[error("cannot change type of '{path}' from '{from}' to '{to}'")]
    Demotion {
        path: String,
        from: String,
        to: String,
    },

    /// An export template failed to load or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The configuration file is invalid.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Result type for tokenkit operations.
pub type Result<T> = std::result::Result<T, TokenError>;
