//! Export configuration.
//!
//! A YAML file whose fields are all optional:
//!
//! ```yaml
//! selector: ":root"
//! format: css            # css | scss | json
//! include_generated: true
//! expand_composites: true
//! expand_grid: true
//! round_radius_as_percent: true
//! categories: [color, spacing]
//! template: ./tokens.css.j2
//! ```
//!
//! [`Config::resolve`] looks for it in order: an explicit path, the
//! `TOKENKIT_CONFIG` environment variable, `./tokenkit.yaml`. With none of
//! those the defaults apply.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};
use crate::export::ExportFormat;
use crate::project::ProjectOptions;
use crate::token::Category;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "TOKENKIT_CONFIG";
/// Config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "tokenkit.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub selector: String,
    pub format: ExportFormat,
    pub include_generated: bool,
    pub expand_composites: bool,
    pub expand_grid: bool,
    pub round_radius_as_percent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    /// Custom export template. Relative paths are resolved against the
    /// config file's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selector: ":root".to_string(),
            format: ExportFormat::Css,
            include_generated: true,
            expand_composites: true,
            expand_grid: true,
            round_radius_as_percent: true,
            categories: None,
            template: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::parse(yaml, Path::new("<input>"))
    }

    fn parse(yaml: &str, origin: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| TokenError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reads a config file. A relative `template` is made relative to the
    /// file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TokenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content, path)?;
        if let (Some(template), Some(dir)) = (&config.template, path.parent()) {
            if template.is_relative() {
                config.template = Some(dir.join(template));
            }
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Finds and loads the config, looking in `cwd` for the default file.
    pub fn resolve_in(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            return Self::from_file(PathBuf::from(path));
        }
        let local = cwd.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::from_file(local);
        }
        Ok(Self::default())
    }

    /// [`resolve_in`](Self::resolve_in) from the current directory.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_in(explicit, Path::new("."))
    }

    /// The projection settings this config describes.
    pub fn project_options(&self) -> ProjectOptions {
        ProjectOptions {
            expand_composites: self.expand_composites,
            expand_grid: self.expand_grid,
            round_radius_as_percent: self.round_radius_as_percent,
            include_generated: self.include_generated,
            categories: self.categories.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_yaml_str("format: scss\ncategories: [color, radius]\n").unwrap();
        assert_eq!(config.format, ExportFormat::Scss);
        assert_eq!(config.selector, ":root");
        assert_eq!(config.categories, Some(vec![Category::Color, Category::Radius]));
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let err = Config::from_yaml_str("colour: red\n").unwrap_err();
        assert!(matches!(err, TokenError::Config { .. }));
    }

    #[test]
    fn test_project_options() {
        let config = Config {
            expand_grid: false,
            include_generated: false,
            ..Default::default()
        };
        let options = config.project_options();
        assert!(!options.expand_grid);
        assert!(!options.include_generated);
        assert!(options.expand_composites);
    }
}
