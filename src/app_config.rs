use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::classification::IntentCategory;
use crate::orchestrator::OrchestratorConfig;

/// Environment variables that override the file at startup
pub const ENV_MIN_DISPATCH_CONFIDENCE: &str = "MIN_DISPATCH_CONFIDENCE";
pub const ENV_MIN_REPORT_CONFIDENCE: &str = "MIN_REPORT_CONFIDENCE";
pub const ENV_HANDLER_TIMEOUT_SECS: &str = "HANDLER_TIMEOUT_SECS";

/// Application configuration module
/// This module handles the router settings including loading,
/// validating and saving routing thresholds and handler endpoints.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Minimum classification score for a category to be dispatched
    #[serde(default = "default_min_dispatch_confidence")]
    pub min_dispatch_confidence: f64,

    /// Minimum final confidence for an answer to be reported
    #[serde(default = "default_min_report_confidence")]
    pub min_report_confidence: f64,

    /// Time budget per handler call, in seconds
    #[serde(default = "default_handler_timeout_secs")]
    pub handler_timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Optional JSON file with extra dictionary entries
    #[serde(default)]
    pub lexicon_path: Option<String>,

    /// Remote handler endpoints, at most one per category
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,
}

/// A remote handler endpoint for one category
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HandlerConfig {
    // @field: Category this endpoint answers
    pub category: IntentCategory,

    // @field: Service URL
    pub endpoint: String,

    // @field: API key, passed through untouched
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Timeout seconds, overrides handler_timeout_secs
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl HandlerConfig {
    /// Create a handler entry without credentials
    pub fn new(category: IntentCategory, endpoint: impl Into<String>) -> Self {
        Self {
            category,
            endpoint: endpoint.into(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }

    /// Effective timeout, falling back to the global one
    pub fn timeout(&self, default_secs: u64) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(default_secs))
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(anyhow!("Invalid log level: {}", s)),
        }
    }
}

fn default_min_dispatch_confidence() -> f64 {
    0.35
}

fn default_min_report_confidence() -> f64 {
    0.4
}

fn default_handler_timeout_secs() -> u64 {
    5
}

impl Config {
    /// Load the configuration from `path`, writing a default file first if
    /// none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup; unset keys leave values alone
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MIN_DISPATCH_CONFIDENCE) {
            self.min_dispatch_confidence = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_MIN_DISPATCH_CONFIDENCE, value))?;
        }
        if let Some(value) = lookup(ENV_MIN_REPORT_CONFIDENCE) {
            self.min_report_confidence = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_MIN_REPORT_CONFIDENCE, value))?;
        }
        if let Some(value) = lookup(ENV_HANDLER_TIMEOUT_SECS) {
            self.handler_timeout_secs = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_HANDLER_TIMEOUT_SECS, value))?;
        }
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("min_dispatch_confidence", self.min_dispatch_confidence),
            ("min_report_confidence", self.min_report_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("{} must be between 0.0 and 1.0, got {}", name, value));
            }
        }

        if self.handler_timeout_secs == 0 {
            return Err(anyhow!("handler_timeout_secs must be greater than zero"));
        }

        let mut seen = HashSet::new();
        for handler in &self.handlers {
            if handler.category == IntentCategory::Unclassified {
                return Err(anyhow!("A handler cannot be configured for 'unclassified'"));
            }
            if !seen.insert(handler.category) {
                return Err(anyhow!("Duplicate handler for category '{}'", handler.category));
            }
            url::Url::parse(&handler.endpoint)
                .with_context(|| format!("Invalid endpoint for '{}': {}", handler.category, handler.endpoint))?;
            if handler.timeout_secs == Some(0) {
                return Err(anyhow!("Timeout for '{}' must be greater than zero", handler.category));
            }
        }

        Ok(())
    }

    /// Routing thresholds for the orchestrator
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            min_dispatch_confidence: self.min_dispatch_confidence,
            min_report_confidence: self.min_report_confidence,
        }
    }

    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }

    /// Configured endpoint for a category, if any
    pub fn handler_for(&self, category: IntentCategory) -> Option<&HandlerConfig> {
        self.handlers.iter().find(|h| h.category == category)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            min_dispatch_confidence: default_min_dispatch_confidence(),
            min_report_confidence: default_min_report_confidence(),
            handler_timeout_secs: default_handler_timeout_secs(),
            log_level: LogLevel::default(),
            lexicon_path: None,
            handlers: Vec::new(),
        }
    }
}
