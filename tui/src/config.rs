use crate::Cli;
use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use catalog_client::ClientConfig;
use catalog_core::PagerConfig;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

const CONFIG_DIR: &str = "catalog";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "catalog.log";

/// Contents of `config.toml`.
///
/// ```toml
/// [client]
/// base_url = "http://localhost:7600"
/// search_route = "search"
///
/// [pager]
/// display_count = 35
/// step_size = 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub pager: PagerConfig,
}

impl BrowserConfig {
    /// `$XDG_CONFIG_HOME/catalog/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Reads `explicit` when given, otherwise the default file if it exists,
    /// otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse config")
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Command-line flags win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.client.base_url = base_url.clone();
        }
        if let Some(rows) = cli.rows {
            self.pager.display_count = rows;
        }
        if let Some(step) = cli.step {
            self.pager.step_size = step;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.client.validate()?;
        self.pager.validate()
    }

    /// Loads, overrides and validates in one go.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = Self::load(cli.config.as_deref())?;
        config.apply_cli(cli);
        config
            .validate()
            .map_err(|err| anyhow!("invalid configuration: {err}"))?;
        Ok(config)
    }
}

/// Log file used when `--log-file` is not given.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(CONFIG_DIR)
        .join(LOG_FILE)
}
