//! Configuration service

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Endpoint used when no configuration overrides it
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8080/EchoChamber/serv";

/// Environment variable holding the configuration file path
pub const CONFIG_ENV: &str = "ECHO_CHAMBER_CONFIG";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub page: PageConfig,
    pub log: LogConfig,
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// WebSocket endpoint
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

/// `[page]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// JSON file with the page header and menu
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome: Option<PathBuf>,
    /// Where to write the rendered page after each message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

/// `[log]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration service trait
pub trait ConfigService: Send + Sync {
    /// Load configuration
    fn load(&self) -> Result<AppConfig>;

    /// Save configuration
    fn save(&self, config: &AppConfig) -> Result<()>;
}

/// TOML file configuration service
///
/// A missing file loads as the default configuration.
pub struct FileConfigService {
    path: PathBuf,
}

impl FileConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigService for FileConfigService {
    fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read config {}", self.path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("invalid config {}", self.path.display()))
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(config).context("failed to serialize config")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write config {}", self.path.display()))
    }
}

/// Pick the configuration file: CLI argument, then `ECHO_CHAMBER_CONFIG`,
/// then `<config dir>/echo-chamber/config.toml`.
pub fn resolve_config_path(arg: Option<String>) -> Option<PathBuf> {
    arg.map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|dir| dir.join("echo-chamber").join("config.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [page]
            snapshot = "/tmp/page.html"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.url, DEFAULT_SERVER_URL);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.page.snapshot, Some(PathBuf::from("/tmp/page.html")));
        assert_eq!(config.page.chrome, None);
    }

    #[test]
    fn cli_argument_wins() {
        assert_eq!(
            resolve_config_path(Some("custom.toml".to_string())),
            Some(PathBuf::from("custom.toml"))
        );
    }
}
