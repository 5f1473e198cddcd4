//! Runtime configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/trimly/config/trimly.toml)
//!    or an explicit path
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! AI backend settings can additionally be overridden by environment variables,
//! which always win over file values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/trimly.toml");

const DEFAULT_TIMEOUT_SECS: u64 = 8;
const DEFAULT_WEEKLY_GOAL_DAYS: u32 = 5;

/// Which text-generation backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Ollama,
    OpenAICompatible,
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAICompatible => "openai_compatible",
            Self::Mock => "mock",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                Ok(Self::OpenAICompatible)
            }
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown AI backend: {}", s)),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for the text-generation backend
#[derive(Debug, Clone, PartialEq)]
pub struct AiSettings {
    pub backend: BackendKind,
    /// Server URL; `None` means no backend is configured
    pub host: Option<String>,
    pub model: String,
    pub api_key: Option<String>,
    /// Upper bound for one prediction request
    pub timeout: Duration,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Ollama,
            host: None,
            model: "llama3.2".to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AiSettings {
    /// Apply `AI_BACKEND` and the backend-specific host/model/key variables
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(backend) = lookup("AI_BACKEND") {
            match backend.parse() {
                Ok(kind) => self.backend = kind,
                Err(_) => {
                    tracing::warn!(backend = %backend, "Unknown AI_BACKEND, keeping configured backend")
                }
            }
        }

        let (host_var, model_var) = match self.backend {
            BackendKind::Ollama => ("OLLAMA_HOST", "OLLAMA_MODEL"),
            BackendKind::OpenAICompatible => ("OPENAI_COMPATIBLE_HOST", "OPENAI_COMPATIBLE_MODEL"),
            BackendKind::Mock => return self,
        };

        if let Some(host) = lookup(host_var) {
            self.host = Some(host);
        }
        if let Some(model) = lookup(model_var) {
            self.model = model;
        }
        if self.backend == BackendKind::OpenAICompatible {
            if let Some(key) = lookup("OPENAI_COMPATIBLE_API_KEY") {
                self.api_key = Some(key);
            }
        }
        self
    }
}

/// Settings for streak and goal tracking
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSettings {
    /// Active days per week that meet the weekly goal
    pub weekly_goal_days: u32,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            weekly_goal_days: DEFAULT_WEEKLY_GOAL_DAYS,
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub ai: AiSettings,
    pub tracking: TrackingSettings,
    /// File the config was read from, `None` for embedded defaults
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load from the default override location, else embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path, else embedded defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a TOML document over the built-in defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("trimly").join("config").join("trimly.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<Config> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    match path.filter(|p| p.exists()) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            let mut config = parse_config(&content)?;
            config.source = Some(path);
            Ok(config)
        }
        None => parse_config(DEFAULT_CONFIG),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    ai: Option<RawAi>,
    tracking: Option<RawTracking>,
}

#[derive(Debug, Deserialize)]
struct RawAi {
    backend: Option<String>,
    host: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawTracking {
    weekly_goal_days: Option<u32>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(ai) = raw.ai {
        if let Some(backend) = ai.backend {
            config.ai.backend = backend.parse().map_err(Error::Config)?;
        }
        config.ai.host = ai.host.filter(|h| !h.trim().is_empty());
        if let Some(model) = ai.model {
            config.ai.model = model;
        }
        config.ai.api_key = ai.api_key;
        if let Some(secs) = ai.timeout_secs {
            if secs == 0 {
                return Err(Error::Config("ai.timeout_secs must be at least 1".into()));
            }
            config.ai.timeout = Duration::from_secs(secs);
        }
    }

    if let Some(tracking) = raw.tracking {
        if let Some(days) = tracking.weekly_goal_days {
            if !(1..=7).contains(&days) {
                return Err(Error::Config(format!(
                    "tracking.weekly_goal_days must be 1-7, got {}",
                    days
                )));
            }
            config.tracking.weekly_goal_days = days;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.ai.backend, BackendKind::Ollama);
        assert_eq!(config.ai.model, "llama3.2");
        assert!(config.ai.host.is_none());
        assert_eq!(config.ai.timeout, Duration::from_secs(8));
        assert_eq!(config.tracking.weekly_goal_days, 5);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml("[tracking]\nweekly_goal_days = 4\n").unwrap();
        assert_eq!(config.tracking.weekly_goal_days, 4);
        assert_eq!(config.ai, AiSettings::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_toml("[ai]\nbackend = \"cloud\"\n").is_err());
        assert!(Config::from_toml("[ai]\ntimeout_secs = 0\n").is_err());
        assert!(Config::from_toml("[tracking]\nweekly_goal_days = 9\n").is_err());
        assert!(Config::from_toml("not toml [").is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trimly.toml");
        fs::write(
            &path,
            "[ai]\nbackend = \"openai_compatible\"\nhost = \"http://gpu:8000\"\ntimeout_secs = 3\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ai.backend, BackendKind::OpenAICompatible);
        assert_eq!(config.ai.host.as_deref(), Some("http://gpu:8000"));
        assert_eq!(config.ai.timeout, Duration::from_secs(3));
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_explicit_path_uses_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.tracking.weekly_goal_days, 5);
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("AI_BACKEND", "openai"),
            ("OPENAI_COMPATIBLE_HOST", "http://localhost:12434"),
            ("OPENAI_COMPATIBLE_MODEL", "qwen2.5"),
            ("OPENAI_COMPATIBLE_API_KEY", "secret"),
            ("OLLAMA_HOST", "http://ignored:11434"),
        ]
        .into_iter()
        .collect();

        let settings =
            AiSettings::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.backend, BackendKind::OpenAICompatible);
        assert_eq!(settings.host.as_deref(), Some("http://localhost:12434"));
        assert_eq!(settings.model, "qwen2.5");
        assert_eq!(settings.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_unknown_env_backend_keeps_file_value() {
        let settings = AiSettings::default().with_overrides(|k| match k {
            "AI_BACKEND" => Some("cloud".to_string()),
            "OLLAMA_HOST" => Some("http://localhost:11434".to_string()),
            _ => None,
        });
        assert_eq!(settings.backend, BackendKind::Ollama);
        assert_eq!(settings.host.as_deref(), Some("http://localhost:11434"));
    }
}
