//! Configuration for the account cache.
//!
//! Loaded from an optional TOML file with environment variables as the
//! highest-priority overlay (prefix `ACCOUNT_CACHE`), falling back to
//! hardcoded defaults for anything unset.

#[cfg(test)]
mod config_test;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::CONFIG_ENV_PREFIX;
use crate::constants::CONFIG_ENV_SEPARATOR;
use crate::constants::DEFAULT_COMPLETION_CHANNEL_CAPACITY;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    /// Capacity of the channel carrying refresh completions from background
    /// fetch tasks back to the coordinator. Fetch tasks block (on the
    /// blocking pool) when it is full rather than dropping completions,
    /// since every scheduled refresh must decrement the in-flight counter.
    #[serde(default = "default_completion_channel_capacity")]
    pub completion_channel_capacity: usize,

    /// Schedule an initial policy + accounts refresh as soon as the
    /// coordinator starts, so the population gate opens without an explicit
    /// first trigger.
    #[serde(default = "default_populate_on_start")]
    pub populate_on_start: bool,
}

fn default_completion_channel_capacity() -> usize {
    DEFAULT_COMPLETION_CHANNEL_CAPACITY
}

fn default_populate_on_start() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            completion_channel_capacity: default_completion_channel_capacity(),
            populate_on_start: default_populate_on_start(),
        }
    }
}

impl CacheConfig {
    /// Load configuration with priority:
    /// 1. Hardcoded defaults
    /// 2. Optional TOML file
    /// 3. Environment variables (highest priority)
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .separator(CONFIG_ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        let config: CacheConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.completion_channel_capacity == 0 {
            return Err(ConfigError::Message(
                "completion_channel_capacity must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
