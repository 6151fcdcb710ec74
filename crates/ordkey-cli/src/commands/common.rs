//! Configuration resolution shared by all commands

use anyhow::{Context, Result};
use clap::Args;
use ordkey_core::{ConfigValidation, ProtocolConfig};
use std::path::Path;

/// Flags that override file and environment configuration
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Name of the first participant
    #[arg(long)]
    pub first: Option<String>,

    /// Name of the second participant
    #[arg(long)]
    pub second: Option<String>,

    /// Channel name
    #[arg(long)]
    pub channel: Option<String>,

    /// Generation duration per participant, in milliseconds
    #[arg(short, long)]
    pub duration_ms: Option<u64>,

    /// Shortest pause between posts, in milliseconds
    #[arg(long)]
    pub min_sleep_ms: Option<u64>,

    /// Longest pause between posts, in milliseconds
    #[arg(long)]
    pub max_sleep_ms: Option<u64>,

    /// Seed for reproducible randomness
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Use a virtual clock instead of wall-clock time
    #[arg(long)]
    pub simulated: bool,
}

impl ConfigOverrides {
    /// Apply every flag that was given
    pub fn apply(&self, config: &mut ProtocolConfig) {
        if let Some(first) = &self.first {
            config.first.clone_from(first);
        }
        if let Some(second) = &self.second {
            config.second.clone_from(second);
        }
        if let Some(channel) = &self.channel {
            config.channel.clone_from(channel);
        }
        if let Some(duration_ms) = self.duration_ms {
            config.duration_ms = duration_ms;
        }
        if let Some(min_sleep_ms) = self.min_sleep_ms {
            config.min_sleep_ms = min_sleep_ms;
        }
        if let Some(max_sleep_ms) = self.max_sleep_ms {
            config.max_sleep_ms = max_sleep_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.simulated {
            config.simulated = true;
        }
    }
}

/// Defaults, then `path` (if present), then `ORDKEY_*`, then flags.
pub fn load_config(path: &Path, overrides: &ConfigOverrides) -> Result<ProtocolConfig> {
    let mut config = ProtocolConfig::load_or_default(path)
        .with_context(|| format!("loading {}", path.display()))?;
    config.merge_with_env()?;
    overrides.apply(&mut config);
    config.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first = \"Carol\"\nduration_ms = 900").unwrap();

        let overrides = ConfigOverrides {
            duration_ms: Some(100),
            seed: Some(9),
            ..ConfigOverrides::default()
        };
        let config = load_config(file.path(), &overrides).unwrap();

        assert_eq!(config.first, "Carol");
        assert_eq!(config.duration_ms, 100);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_invalid_result_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = ConfigOverrides {
            first: Some("Bob".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(load_config(&dir.path().join("none.toml"), &overrides).is_err());
    }
}
