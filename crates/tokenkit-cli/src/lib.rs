//! The `tokenkit` command line.
//!
//! Parsing and execution live here so they can be driven from tests with
//! [`Cli::try_parse_from`](clap::Parser::try_parse_from) and [`execute`];
//! `main.rs` only installs logging, prints and sets the exit code.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use console::Style;
use tokenkit::codec::{contrast_text_color, ColorValue};
use tokenkit::{Config, DocumentFormat, ExportFormat, Exporter, TokenSet};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter, e.g. `tokenkit=debug`.
pub const LOG_ENV_VAR: &str = "TOKENKIT_LOG";

/// Normalize design tokens and export them as CSS variables.
#[derive(Debug, Parser)]
#[command(name = "tokenkit", version)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file [default: $TOKENKIT_CONFIG, then ./tokenkit.yaml]
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export a token document as a stylesheet
    Css {
        file: PathBuf,

        /// Output format; overrides the config's format and template
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Rule selector for CSS output
        #[arg(long)]
        selector: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the preview variable map as JSON
    Vars { file: PathBuf },

    /// Rewrite every value in its canonical form
    Normalize {
        file: PathBuf,

        /// Write to a file instead of stdout (format from its extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Report invalid colors, duplicate paths and other problems
    Check { file: PathBuf },

    /// Show a hex color as rgb and hsl with its contrast text color
    Color { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Css,
    Scss,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Css => ExportFormat::Css,
            FormatArg::Scss => ExportFormat::Scss,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text for stdout.
    pub output: String,
    /// `false` makes the process exit with status 1.
    pub success: bool,
}

impl Outcome {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }
}

struct Palette {
    error: Style,
    ok: Style,
    label: Style,
}

impl Palette {
    fn new(color: bool) -> Self {
        Self {
            error: Style::new().red().bold().force_styling(color),
            ok: Style::new().green().force_styling(color),
            label: Style::new().cyan().force_styling(color),
        }
    }
}

/// The `tracing` filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber. `TOKENKIT_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Runs a parsed command line.
pub fn execute(cli: &Cli, color: bool) -> anyhow::Result<Outcome> {
    let palette = Palette::new(color);
    match &cli.command {
        Command::Css {
            file,
            format,
            selector,
            output,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(format) = format {
                config.format = (*format).into();
                config.template = None;
            }
            if let Some(selector) = selector {
                config.selector = selector.clone();
            }
            let set = load_tokens(file)?;
            let exporter = Exporter::from_config(&config).context("loading export template")?;
            let text = exporter
                .export(&set, &config.project_options())
                .context("rendering stylesheet")?;
            write_or_return(output.as_deref(), text)
        }

        Command::Vars { file } => {
            let config = load_config(cli.config.as_deref())?;
            let set = load_tokens(file)?;
            let vars = set.css_variables(&config.project_options());
            Ok(Outcome::ok(serde_json::to_string_pretty(&vars)? + "\n"))
        }

        Command::Normalize { file, output } => {
            let mut set = load_tokens(file)?;
            let report = set.normalize();
            tracing::info!(
                changed = report.changed,
                skipped = report.skipped.len(),
                total = set.len(),
                "normalized token values"
            );
            let success = report.skipped.is_empty();
            let text = match output {
                Some(path) => {
                    set.save(path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    let mut out = String::new();
                    for skipped in &report.skipped {
                        out.push_str(&format!(
                            "{} {}: invalid hex color left as stored\n",
                            palette.error.apply_to("skipped:"),
                            skipped
                        ));
                    }
                    out.push_str(&format!(
                        "normalized {} of {} values into {}\n",
                        report.changed,
                        set.len(),
                        path.display()
                    ));
                    out
                }
                None => match DocumentFormat::from_path(file)? {
                    DocumentFormat::Json => set.to_json_string()?,
                    DocumentFormat::Yaml => set.to_yaml_string()?,
                },
            };
            Ok(Outcome {
                output: text,
                success,
            })
        }

        Command::Check { file } => {
            let set = load_tokens(file)?;
            let issues = set.validate();
            if issues.is_empty() {
                return Ok(Outcome::ok(format!(
                    "{} {}: {} tokens\n",
                    palette.ok.apply_to("ok"),
                    file.display(),
                    set.len()
                )));
            }
            let mut out = String::new();
            for issue in &issues {
                tracing::warn!(%issue, "validation failed");
                out.push_str(&format!("{} {}\n", palette.error.apply_to("error:"), issue));
            }
            out.push_str(&format!("{} problem(s) in {}\n", issues.len(), file.display()));
            Ok(Outcome {
                output: out,
                success: false,
            })
        }

        Command::Color { value } => {
            let color = ColorValue::parse_value(&serde_json::Value::String(value.clone()));
            if !color.is_persistable() {
                bail!("'{}' is not a hex color (#rgb or #rrggbb)", value);
            }
            let rgb = color.rgb();
            let hsl = color.hsl().rounded();
            let rows = [
                ("hex", color.hex().to_ascii_lowercase()),
                ("rgb", format!("{}, {}, {}", rgb.r, rgb.g, rgb.b)),
                ("hsl", format!("{}, {}%, {}%", hsl.h, hsl.s, hsl.l)),
                ("text", contrast_text_color(color.hex()).to_string()),
            ];
            let out: String = rows
                .iter()
                .map(|(label, value)| format!("{:<5} {}\n", palette.label.apply_to(label), value))
                .collect();
            Ok(Outcome::ok(out))
        }
    }
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    Config::resolve(explicit).context("loading config")
}

fn load_tokens(path: &Path) -> anyhow::Result<TokenSet> {
    TokenSet::from_file(path).with_context(|| format!("loading tokens from {}", path.display()))
}

fn write_or_return(output: Option<&Path>, text: String) -> anyhow::Result<Outcome> {
    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
            Ok(Outcome::ok(format!("wrote {}\n", path.display())))
        }
        None => Ok(Outcome::ok(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(1), "info");
        assert_eq!(log_filter(2), "debug");
        assert_eq!(log_filter(7), "trace");
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["tokenkit", "check", "t.json", "-vv", "--no-color"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Check { .. }));
    }

    #[test]
    fn test_format_arg() {
        let cli = Cli::try_parse_from(["tokenkit", "css", "t.json", "--format", "scss"]).unwrap();
        match cli.command {
            Command::Css { format, .. } => assert_eq!(format, Some(FormatArg::Scss)),
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Cli::try_parse_from(["tokenkit", "css", "t.json", "--format", "less"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
