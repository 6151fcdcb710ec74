//! Protocol configuration
//!
//! Values are resolved in three layers: built-in defaults, an optional TOML
//! file, then `ORDKEY_*` environment variables. The CLI applies its own flags
//! on top and calls [`ConfigValidation::validate`] before running.

use crate::{OrdkeyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Prefix for environment overrides (`ORDKEY_DURATION_MS=500`, ...)
pub const ENV_PREFIX: &str = "ORDKEY_";

/// Trait for configuration validation
pub trait ConfigValidation {
    /// Validate configuration parameters
    fn validate(&self) -> Result<()>;
}

/// Settings for one protocol round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Name the first participant posts under
    pub first: String,
    /// Name the second participant posts under
    pub second: String,
    /// Channel name (display only)
    pub channel: String,
    /// Length of each participant's generation phase
    pub duration_ms: u64,
    /// Lower bound of the per-iteration sleep, inclusive
    pub min_sleep_ms: u64,
    /// Upper bound of the per-iteration sleep, inclusive
    pub max_sleep_ms: u64,
    /// Seed for the deterministic random handler; `None` uses system entropy
    pub seed: Option<u64>,
    /// Run against the virtual clock instead of wall-clock time
    pub simulated: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            first: "Alice".to_string(),
            second: "Bob".to_string(),
            channel: "one".to_string(),
            duration_ms: 2_000,
            min_sleep_ms: 1,
            max_sleep_ms: 10,
            seed: None,
            simulated: false,
        }
    }
}

impl ProtocolConfig {
    /// Generation duration as a `Duration`
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Load configuration from a TOML file. Missing keys take defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| OrdkeyError::internal(format!("Failed to serialize config: {e}")))
    }

    /// Apply `ORDKEY_*` variables from the process environment
    pub fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply `ORDKEY_*` overrides from an arbitrary key/value source.
    /// Unknown `ORDKEY_*` keys are ignored.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref();
            match name {
                "FIRST" => self.first = value.to_string(),
                "SECOND" => self.second = value.to_string(),
                "CHANNEL" => self.channel = value.to_string(),
                "DURATION_MS" => self.duration_ms = parse_u64(key.as_ref(), value)?,
                "MIN_SLEEP_MS" => self.min_sleep_ms = parse_u64(key.as_ref(), value)?,
                "MAX_SLEEP_MS" => self.max_sleep_ms = parse_u64(key.as_ref(), value)?,
                "SEED" => self.seed = Some(parse_u64(key.as_ref(), value)?),
                "SIMULATED" => self.simulated = parse_bool(key.as_ref(), value)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl ConfigValidation for ProtocolConfig {
    fn validate(&self) -> Result<()> {
        if self.first.is_empty() || self.second.is_empty() {
            return Err(OrdkeyError::invalid("participant names must not be empty"));
        }
        if self.first == self.second {
            return Err(OrdkeyError::invalid(format!(
                "participant names must differ (both are {:?})",
                self.first
            )));
        }
        if self.duration_ms == 0 {
            return Err(OrdkeyError::invalid("duration_ms must be greater than 0"));
        }
        if self.min_sleep_ms == 0 {
            return Err(OrdkeyError::invalid(
                "min_sleep_ms must be at least 1 so every iteration advances the clock",
            ));
        }
        if self.min_sleep_ms > self.max_sleep_ms {
            return Err(OrdkeyError::invalid(format!(
                "min_sleep_ms ({}) must not exceed max_sleep_ms ({})",
                self.min_sleep_ms, self.max_sleep_ms
            )));
        }
        Ok(())
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| OrdkeyError::invalid(format!("{key}={value:?}: {e}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(OrdkeyError::invalid(format!(
            "{key}={other:?}: expected a boolean"
        ))),
    }
}
