use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::api::DEFAULT_SERVER_URL;

/// Client configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// server_url = "http://127.0.0.1:8000"
/// last_location = "Chennai"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the weather service.
    pub server_url: Option<String>,

    /// Location most recently queried, used to prefill the prompt.
    pub last_location: Option<String>,
}

impl Config {
    /// Service URL to use, falling back to the local default.
    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn set_server_url(&mut self, url: impl Into<String>) {
        self.server_url = Some(url.into());
    }

    /// Remember a queried location; blank input is ignored.
    pub fn remember_location(&mut self, location: &str) {
        let location = location.trim();
        if !location.is_empty() {
            self.last_location = Some(location.to_string());
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-query", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("weather-core-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn server_url_defaults_to_local_service() {
        let cfg = Config::default();
        assert_eq!(cfg.server_url(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn set_server_url_overrides_default() {
        let mut cfg = Config::default();
        cfg.set_server_url("https://weather.example.com");
        assert_eq!(cfg.server_url(), "https://weather.example.com");
    }

    #[test]
    fn remember_location_ignores_blank_input() {
        let mut cfg = Config::default();
        cfg.remember_location("  Chennai ");
        cfg.remember_location("   ");
        assert_eq!(cfg.last_location.as_deref(), Some("Chennai"));
    }

    #[test]
    fn missing_file_loads_default() {
        let cfg = Config::load_from(&temp_path("missing")).expect("missing file is not an error");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("saved");
        let mut cfg = Config::default();
        cfg.set_server_url("http://10.0.0.2:8000");
        cfg.remember_location("Kochi");

        cfg.save_to(&path).expect("save should succeed");
        let loaded = Config::load_from(&path).expect("load should succeed");
        assert_eq!(loaded, cfg);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn invalid_file_reports_path() {
        let path = temp_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "server_url = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
