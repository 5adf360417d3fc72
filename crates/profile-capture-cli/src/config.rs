//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then `~/.profile-capture/config.json`,
//! then the process environment, then a `.env` file in the working directory.
//! Later layers win, so `.env` overrides exported variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name shown in the CLI header.
pub const APP_NAME: &str = "Profile To Affinity";
/// Webhook request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_WEBHOOK_URL: &str = "ZAPIER_WEBHOOK_URL";
pub const ENV_DEBUG_MODE: &str = "DEBUG_MODE";
pub const ENV_TIMEOUT_SECS: &str = "PROFILE_CAPTURE_TIMEOUT_SECS";
/// Overrides the directory holding `config.json`.
pub const ENV_HOME: &str = "PROFILE_CAPTURE_HOME";

const CONFIG_FILE: &str = "config.json";
const ENV_FILE: &str = ".env";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{key} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
}

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub webhook_url: Option<String>,
    pub debug_mode: bool,
    pub app_name: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: None,
            debug_mode: false,
            app_name: APP_NAME.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Shape of `config.json`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    webhook_url: Option<String>,
    debug_mode: Option<bool>,
    timeout_secs: Option<u64>,
}

/// Directory holding the config file: `$PROFILE_CAPTURE_HOME` or `~/.profile-capture`.
pub fn profile_capture_home() -> PathBuf {
    if let Ok(p) = std::env::var(ENV_HOME) {
        return PathBuf::from(p);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".profile-capture")
}

/// Full path of the JSON config file.
pub fn default_config_path() -> PathBuf {
    profile_capture_home().join(CONFIG_FILE)
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped, the
/// value keeps any further `=`, and matching surrounding quotes are removed.
pub fn parse_env_file(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

impl Config {
    /// Resolve configuration from the user's home, the process environment
    /// and the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&default_config_path(), &cwd.join(ENV_FILE), std::env::vars())
    }

    /// Resolve configuration from explicit sources. Missing files are skipped.
    pub fn load_from(
        config_file: &Path,
        env_file: &Path,
        env: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if config_file.exists() {
            config.merge_file(config_file)?;
        }
        config.apply_pairs(env)?;
        if env_file.exists() {
            let content = std::fs::read_to_string(env_file).map_err(|source| ConfigError::Read {
                path: env_file.to_path_buf(),
                source,
            })?;
            debug!(path = %env_file.display(), "applying env file");
            config.apply_pairs(parse_env_file(&content))?;
        }
        Ok(config)
    }

    /// Overlay values from a JSON config file.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "applying config file");

        if let Some(url) = file.webhook_url {
            self.set_webhook_url(url);
        }
        if let Some(debug_mode) = file.debug_mode {
            self.debug_mode = debug_mode;
        }
        if let Some(timeout) = file.timeout_secs {
            self.timeout_secs = timeout;
        }
        Ok(())
    }

    /// Overlay recognized `KEY=VALUE` pairs; other keys are ignored.
    pub fn apply_pairs(
        &mut self,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Result<(), ConfigError> {
        for (key, value) in pairs {
            match key.as_str() {
                ENV_WEBHOOK_URL => self.set_webhook_url(value),
                ENV_DEBUG_MODE => self.debug_mode = value == "true",
                ENV_TIMEOUT_SECS => {
                    self.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                        key: ENV_TIMEOUT_SECS,
                        value: value.clone(),
                    })?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn set_webhook_url(&mut self, url: String) {
        let url = url.trim();
        self.webhook_url = (!url.is_empty()).then(|| url.to_string());
    }

    /// Webhook address reduced to scheme and host, for display.
    pub fn redacted_webhook(&self) -> Option<String> {
        let raw = self.webhook_url.as_deref()?;
        match reqwest::Url::parse(raw) {
            Ok(url) => Some(format!(
                "{}://{}/…",
                url.scheme(),
                url.host_str().unwrap_or_default()
            )),
            Err(_) => Some("<invalid url>".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_nothing_present() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(
            &dir.path().join("config.json"),
            &dir.path().join(".env"),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.app_name, "Profile To Affinity");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.debug_mode);
    }

    #[test]
    fn test_layers_override_in_order() {
        let dir = TempDir::new().unwrap();
        let config_file = dir.path().join("config.json");
        let env_file = dir.path().join(".env");
        std::fs::write(
            &config_file,
            r#"{"webhook_url": "https://hooks.example.com/file", "timeout_secs": 5}"#,
        )
        .unwrap();
        std::fs::write(
            &env_file,
            "# local overrides\nZAPIER_WEBHOOK_URL=https://hooks.example.com/dotenv?a=1&b=2\nDEBUG_MODE=true\n",
        )
        .unwrap();

        let config = Config::load_from(
            &config_file,
            &env_file,
            pairs(&[("PROFILE_CAPTURE_TIMEOUT_SECS", "12")]),
        )
        .unwrap();
        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://hooks.example.com/dotenv?a=1&b=2")
        );
        assert!(config.debug_mode);
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_env_file_overrides_process_environment() {
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(
            &env_file,
            "ZAPIER_WEBHOOK_URL=https://hooks.example.com/from-dotenv\nDEBUG_MODE=false\n",
        )
        .unwrap();

        let config = Config::load_from(
            &dir.path().join("config.json"),
            &env_file,
            pairs(&[
                ("ZAPIER_WEBHOOK_URL", "https://hooks.example.com/exported"),
                ("DEBUG_MODE", "true"),
                ("PROFILE_CAPTURE_TIMEOUT_SECS", "7"),
            ]),
        )
        .unwrap();
        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://hooks.example.com/from-dotenv")
        );
        assert!(!config.debug_mode);
        assert_eq!(config.timeout_secs, 7);
    }

    #[test]
    fn test_debug_mode_requires_literal_true() {
        let mut config = Config::default();
        config.apply_pairs(pairs(&[("DEBUG_MODE", "1")])).unwrap();
        assert!(!config.debug_mode);
        config.apply_pairs(pairs(&[("DEBUG_MODE", "TRUE")])).unwrap();
        assert!(!config.debug_mode);
        config.apply_pairs(pairs(&[("DEBUG_MODE", "true")])).unwrap();
        assert!(config.debug_mode);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_pairs(pairs(&[("PROFILE_CAPTURE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_malformed_config_file() {
        let dir = TempDir::new().unwrap();
        let config_file = dir.path().join("config.json");
        std::fs::write(&config_file, "{ not json").unwrap();
        let err = Config::load_from(&config_file, &dir.path().join(".env"), Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_parse_env_file() {
        let parsed = parse_env_file(
            "\n# comment\nZAPIER_WEBHOOK_URL = \"https://h.example/x=y\"\nNO_EQUALS\n=orphan\nDEBUG_MODE='true'\n",
        );
        assert_eq!(
            parsed,
            pairs(&[
                ("ZAPIER_WEBHOOK_URL", "https://h.example/x=y"),
                ("DEBUG_MODE", "true"),
            ])
        );
    }

    #[test]
    fn test_empty_webhook_is_unset() {
        let mut config = Config::default();
        config
            .apply_pairs(pairs(&[("ZAPIER_WEBHOOK_URL", "  ")]))
            .unwrap();
        assert!(config.webhook_url.is_none());
        assert!(config.redacted_webhook().is_none());
    }

    #[test]
    fn test_redacted_webhook_keeps_host_only() {
        let config = Config {
            webhook_url: Some("https://hooks.zapier.com/hooks/catch/123/abc/".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.redacted_webhook().as_deref(),
            Some("https://hooks.zapier.com/…")
        );
    }
}
