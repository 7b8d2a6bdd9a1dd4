use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::normalize_base_url;
use crate::error::{ServiceError, ServiceResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SETTINGS_DIR: &str = "godot-manager";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Apply command-line / environment overrides on top of file values.
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ServiceError::Config("base URL cannot be empty".to_string()));
        }
        let normalized = normalize_base_url(&self.base_url);
        let host = normalized
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        // Anything with a scheme other than http(s) ends up with a nested "://".
        if host.is_empty() || host.contains(char::is_whitespace) || host.contains("://") {
            return Err(ServiceError::Config(format!(
                "invalid base URL '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ServiceError::Config(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> ServiceResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write settings through a temporary file and an atomic rename.
    pub fn save(&self, path: &Path) -> ServiceResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = path.with_extension("tmp");
        let mut f = File::create(&temp)?;
        let content = serde_json::to_string_pretty(self)?;
        f.write_all(content.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, path)?;
        tracing::info!(path = %path.display(), "saved settings");
        Ok(())
    }
}

/// `<config dir>/godot-manager/settings.json`, falling back to the home
/// directory on platforms without a config dir.
pub fn default_settings_path() -> ServiceResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .ok_or_else(|| ServiceError::Config("couldn't find a config directory".to_string()))?;
    Ok(base.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let config = ClientConfig {
            base_url: "http://192.168.1.20:9090".to_string(),
            timeout_secs: 5,
        };

        config.save(&path).unwrap();

        assert_eq!(ClientConfig::load(&path).unwrap(), config);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "base_url": "http://example.test" }"#).unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "http://example.test");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn overrides_take_precedence() {
        let file = ClientConfig {
            base_url: "http://from-file".to_string(),
            timeout_secs: 10,
        };
        let resolved = file
            .clone()
            .with_overrides(Some("http://from-flag".to_string()), None);
        assert_eq!(resolved.base_url, "http://from-flag");
        assert_eq!(resolved.timeout_secs, 10);

        assert_eq!(file.clone().with_overrides(None, None), file);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let empty = ClientConfig {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(empty.validate(), Err(ServiceError::Config(_))));

        let spaced = ClientConfig {
            base_url: "http://bad host".to_string(),
            ..Default::default()
        };
        assert!(spaced.validate().is_err());

        let ftp = ClientConfig {
            base_url: "ftp://files.example.com".to_string(),
            ..Default::default()
        };
        assert!(ftp.validate().is_err());

        let no_timeout = ClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(no_timeout.validate().is_err());

        assert!(ClientConfig::default().validate().is_ok());
    }
}
