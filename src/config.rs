// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const APP_NAME: &str = "fxnews-rs";

/// Which web search the news agent relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackend {
    /// Serper.dev results fed into the prompt
    Serper,
    /// Gemini's built-in Google Search grounding
    Google,
}

impl std::str::FromStr for SearchBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(SearchBackend::Google),
            "serper" => Ok(SearchBackend::Serper),
            other => Err(AppError::Config(format!(
                "unknown search backend '{}' (expected google or serper)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rates_host: String,
    pub gemini_host: String,
    pub serper_host: String,
    pub gemini_model: String,
    pub temperature: f32,
    pub search_backend: SearchBackend,
    pub request_timeout_secs: u64,
    pub agent_timeout_secs: u64,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates_host: "https://api.frankfurter.dev".to_string(),
            gemini_host: "https://generativelanguage.googleapis.com".to_string(),
            serper_host: "https://google.serper.dev".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            temperature: 0.2,
            search_backend: SearchBackend::Serper,
            request_timeout_secs: 10,
            agent_timeout_secs: 120,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn agent_timeout(&self) -> Duration {
        Duration::from_secs(self.agent_timeout_secs)
    }

    /// Apply `FXNEWS_*` overrides from the environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), AppError> {
        if let Ok(host) = std::env::var("FXNEWS_RATES_HOST") {
            self.rates_host = host;
        }
        if let Ok(model) = std::env::var("FXNEWS_GEMINI_MODEL") {
            self.gemini_model = model;
        }
        if let Ok(backend) = std::env::var("FXNEWS_SEARCH_BACKEND") {
            self.search_backend = backend.parse()?;
        }
        Ok(())
    }
}

/// API keys read once at startup. A missing key is not an error here;
/// the call that needs it fails instead.
#[derive(Clone, Default)]
pub struct Credentials {
    pub google_api_key: Option<String>,
    pub serper_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            google_api_key: read("GOOGLE_API_KEY"),
            serper_api_key: read("SERPER_API_KEY"),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("google_api_key", &mask(&self.google_api_key))
            .field("serper_api_key", &mask(&self.serper_api_key))
            .finish()
    }
}

pub fn load_config_from(path: &Path) -> Result<Config, AppError> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let config: Config = toml::from_str(&config_str)
        .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
    Ok(config)
}

/// Load the explicit config file if given, otherwise the per-user one.
pub fn load_config(path: Option<&Path>) -> Result<Config, AppError> {
    let mut config = match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_from(path)?
        }
        None => match confy::load::<Config>(APP_NAME, None) {
            Ok(config) => config,
            Err(e) => {
                warn!("Could not load user config, using defaults: {}", e);
                Config::default()
            }
        },
    };
    config.apply_env_overrides()?;
    Ok(config)
}

pub fn save_config(config: &Config, path: &Path) -> Result<(), AppError> {
    let config_str =
        toml::to_string_pretty(config).map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(path, config_str)
        .map_err(|e| AppError::Config(format!("cannot write {}: {}", path.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rates_host, "https://api.frankfurter.dev");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.search_backend, SearchBackend::Serper);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "rates_host = \"http://localhost:9999\"\nsearch_backend = \"google\"\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.rates_host, "http://localhost:9999");
        assert_eq!(config.search_backend, SearchBackend::Google);
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            temperature: 0.7,
            request_timeout_secs: 3,
            ..Config::default()
        };
        save_config(&config, &path).unwrap();

        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.request_timeout_secs, 3);
        assert!((reloaded.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let dir = tempdir().unwrap();
        let err = load_config_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_search_backend_parse() {
        assert_eq!("Serper".parse::<SearchBackend>().unwrap(), SearchBackend::Serper);
        assert_eq!("google".parse::<SearchBackend>().unwrap(), SearchBackend::Google);
        assert!("bing".parse::<SearchBackend>().is_err());
    }

    #[test]
    fn test_credentials_debug_is_masked() {
        let creds = Credentials {
            google_api_key: Some("secret-key".to_string()),
            serper_api_key: None,
        };
        let shown = format!("{:?}", creds);
        assert!(!shown.contains("secret-key"));
        assert!(shown.contains("<set>"));
        assert!(shown.contains("<unset>"));
    }
}
