//! Config file resolution.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;
use tokenkit::{Config, ExportFormat, Exporter, TokenError, TokenSet, CONFIG_ENV_VAR};

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_defaults_without_any_config() {
    std::env::remove_var(CONFIG_ENV_VAR);
    let cwd = TempDir::new().unwrap();
    assert_eq!(Config::resolve_in(None, cwd.path()).unwrap(), Config::default());
}

#[test]
#[serial]
fn test_local_file_is_picked_up() {
    std::env::remove_var(CONFIG_ENV_VAR);
    let cwd = TempDir::new().unwrap();
    write(&cwd, "tokenkit.yaml", "format: scss\n");
    let config = Config::resolve_in(None, cwd.path()).unwrap();
    assert_eq!(config.format, ExportFormat::Scss);
}

#[test]
#[serial]
fn test_env_var_beats_local_file() {
    let cwd = TempDir::new().unwrap();
    write(&cwd, "tokenkit.yaml", "format: scss\n");
    let other = TempDir::new().unwrap();
    let env_path = write(&other, "from-env.yaml", "format: json\n");

    std::env::set_var(CONFIG_ENV_VAR, &env_path);
    let config = Config::resolve_in(None, cwd.path());
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.unwrap().format, ExportFormat::Json);
}

#[test]
#[serial]
fn test_explicit_path_beats_env_var() {
    let dir = TempDir::new().unwrap();
    let explicit = write(&dir, "explicit.yaml", "selector: \".theme\"\n");
    let env_path = write(&dir, "env.yaml", "selector: \"body\"\n");

    std::env::set_var(CONFIG_ENV_VAR, &env_path);
    let config = Config::resolve_in(Some(explicit.as_path()), dir.path());
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.unwrap().selector, ".theme");
}

#[test]
#[serial]
fn test_explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");
    let err = Config::resolve_in(Some(missing.as_path()), dir.path()).unwrap_err();
    assert!(matches!(err, TokenError::Io { .. }));
}

#[test]
fn test_custom_template_relative_to_config() {
    let dir = TempDir::new().unwrap();
    write(&dir, "header.j2", "/* generated */\n");
    write(
        &dir,
        "theme.css.j2",
        concat!(
            "{% include \"header.j2\" %}{{ selector }} { ",
            "{% for v in variables %}{{ v.name }}: {{ v.value }}; {% endfor %}}\n",
        ),
    );
    let config_path = write(&dir, "tokenkit.yaml", "selector: .dark\ntemplate: theme.css.j2\n");

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.template, Some(dir.path().join("theme.css.j2")));

    let set = TokenSet::from_json_str(
        r#"[{"name": "Gap", "category": "spacing", "path": "spacing/gap", "value": "4px"}]"#,
    )
    .unwrap();
    let out = Exporter::from_config(&config)
        .unwrap()
        .export(&set, &config.project_options())
        .unwrap();
    insta::assert_snapshot!(out, @r###"
    /* generated */
    .dark { --spacing-gap: 4px; }
    "###);
}

#[test]
fn test_broken_template_reports_template_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.j2", "{% for v in variables %}");
    let err = Exporter::from_template_file(&path).err().unwrap();
    assert!(matches!(err, TokenError::Template(_)));
}
