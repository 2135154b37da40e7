use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple configuration for recall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub injection: InjectionConfig,

    #[serde(default)]
    pub redaction: RedactionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Suppress a new capture this many milliseconds after the last one.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// DOM text below this length never becomes a message.
    #[serde(default = "default_min_dom_text_len")]
    pub min_dom_text_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectionConfig {
    /// Inputs with text at or beyond this length are considered mid-sentence.
    #[serde(default = "default_short_input_len")]
    pub short_input_len: usize,

    #[serde(default = "default_min_fact_importance")]
    pub min_fact_importance: u8,

    #[serde(default = "default_max_facts")]
    pub max_facts: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Two-capitalized-words name matching; high false-positive rate.
    #[serde(default)]
    pub redact_names: bool,

    /// Street-address matching; high false-positive rate.
    #[serde(default)]
    pub redact_addresses: bool,

    /// Extra regex patterns, compiled case-insensitively, applied last.
    #[serde(default)]
    pub custom_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            injection: InjectionConfig::default(),
            redaction: RedactionConfig::default(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_dom_text_len: default_min_dom_text_len(),
        }
    }
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            short_input_len: default_short_input_len(),
            min_fact_importance: default_min_fact_importance(),
            max_facts: default_max_facts(),
        }
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_names: false,
            redact_addresses: false,
            custom_patterns: Vec::new(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_dom_text_len() -> usize {
    10
}

fn default_short_input_len() -> usize {
    50
}

fn default_min_fact_importance() -> u8 {
    7
}

fn default_max_facts() -> usize {
    3
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "recall", "recall") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.recall/config.toml")
        }
    }
}
