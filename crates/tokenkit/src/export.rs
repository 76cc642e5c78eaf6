//! Stylesheet export.
//!
//! Renders a CSS variable map (see [`TokenSet::css_variables`]) through a
//! MiniJinja template. CSS and SCSS have built-in templates; a custom
//! template file can be used instead, and may `{% include %}` files next to
//! it. Templates see:
//!
//! - `selector`: the rule selector, `:root` by default
//! - `variables`: a list of `{name, value}` in name order
//! - `vars`: the same data as a name → value map
//!
//! The `ident` filter strips the leading `--` from a variable name:
//!
//! ```jinja
//! {% for v in variables %}${{ v.name | ident }}: {{ v.value }};
//! {% endfor %}
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use minijinja::{context, path_loader, Environment};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, TokenError};
use crate::project::ProjectOptions;
use crate::set::TokenSet;

const CSS_TEMPLATE: &str = "{{ selector }} {
{% for v in variables %}  {{ v.name }}: {{ v.value }};
{% endfor %}}
";

const SCSS_TEMPLATE: &str = "{% for v in variables %}${{ v.name | ident }}: {{ v.value }};
{% endfor %}";

const CUSTOM: &str = "custom";

/// Built-in output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Css,
    Scss,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Css => "css",
            ExportFormat::Scss => "scss",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(ExportFormat::Css),
            "scss" => Ok(ExportFormat::Scss),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

#[derive(Serialize)]
struct Variable<'a> {
    name: &'a str,
    value: &'a str,
}

enum Target {
    Builtin(ExportFormat),
    Custom(String),
}

/// Renders variable maps into stylesheets.
pub struct Exporter {
    env: Environment<'static>,
    target: Target,
    selector: String,
}

impl Exporter {
    /// An exporter for a built-in format.
    pub fn new(format: ExportFormat) -> Self {
        let mut env = base_environment();
        match format {
            ExportFormat::Css => add_builtin(&mut env, "css", CSS_TEMPLATE),
            ExportFormat::Scss => add_builtin(&mut env, "scss", SCSS_TEMPLATE),
            ExportFormat::Json => {}
        }
        Self {
            env,
            target: Target::Builtin(format),
            selector: ":root".to_string(),
        }
    }

    /// An exporter rendering the template at `path`. Includes resolve
    /// relative to the template's directory.
    pub fn from_template_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TokenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut env = base_environment();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            env.set_loader(path_loader(dir));
        }
        env.add_template_owned(CUSTOM, source)?;
        Ok(Self {
            env,
            target: Target::Custom(path.display().to_string()),
            selector: ":root".to_string(),
        })
    }

    /// The exporter a config asks for: its template if set, else its format.
    pub fn from_config(config: &Config) -> Result<Self> {
        let exporter = match &config.template {
            Some(path) => Self::from_template_file(path)?,
            None => Self::new(config.format),
        };
        Ok(exporter.with_selector(&config.selector))
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Renders a variable map.
    pub fn render(&self, vars: &BTreeMap<String, String>) -> Result<String> {
        let name = match &self.target {
            Target::Builtin(ExportFormat::Json) => {
                return serde_json::to_string_pretty(vars)
                    .map(|s| s + "\n")
                    .map_err(|e| TokenError::Serialize(e.to_string()));
            }
            Target::Builtin(format) => format.as_str(),
            Target::Custom(_) => CUSTOM,
        };
        let variables: Vec<Variable<'_>> = vars
            .iter()
            .map(|(name, value)| Variable { name, value })
            .collect();
        let output = self.env.get_template(name)?.render(context! {
            selector => &self.selector,
            variables => variables,
            vars => vars,
        })?;
        if let Target::Custom(path) = &self.target {
            tracing::debug!(template = %path, bytes = output.len(), "rendered custom template");
        }
        Ok(output)
    }

    /// Projects `set` with `options` and renders the result.
    pub fn export(&self, set: &TokenSet, options: &ProjectOptions) -> Result<String> {
        self.render(&set.css_variables(options))
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_filter("ident", |name: String| -> String {
        name.trim_start_matches("--").to_string()
    });
    env
}

fn add_builtin(env: &mut Environment<'static>, name: &'static str, source: &'static str) {
    if let Err(err) = env.add_template(name, source) {
        // built-in templates are fixed strings
        tracing::error!(%err, name, "built-in export template failed to compile");
    }
}
