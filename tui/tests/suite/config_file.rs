use anyhow::Result;
use catalog_tui::BrowserConfig;
use catalog_tui::Cli;
use clap::Parser;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn flags_override_the_config_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[client]
base_url = "http://catalog.internal:7600"
api_prefix = "/api/2"
timeout_secs = 5

[pager]
display_count = 40
step_size = 4
"#,
    )?;

    let config_arg = path.to_string_lossy().to_string();
    let cli = Cli::try_parse_from(["catalog", "--config", &config_arg, "--step", "6"])?;
    let config = BrowserConfig::resolve(&cli)?;

    assert_eq!(config.client.base_url, "http://catalog.internal:7600");
    assert_eq!(config.client.api_prefix, "/api/2");
    assert_eq!(config.client.timeout_secs, 5);
    assert_eq!(config.pager.display_count, 40);
    assert_eq!(config.pager.step_size, 6);
    assert_eq!(config.pager.default_page_size, 100);
    Ok(())
}

#[test]
fn bad_base_url_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, "[client]\nbase_url = \"catalog:7600\"\n")?;

    let cli = Cli {
        config: Some(path),
        ..Default::default()
    };
    let err = BrowserConfig::resolve(&cli).unwrap_err();
    assert!(err.to_string().contains("base_url"), "{err}");
    Ok(())
}
