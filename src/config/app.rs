// src/config/app.rs
use super::defaults::*;
use crate::consts::{CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH};
use crate::enums::KdfAlgorithm;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub pool: PoolConfig,
    pub kdf: KdfConfig,
    pub random: RandomConfig,
    pub compat: CompatConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Worker threads; the queue in front of them is unbounded
    pub workers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct KdfConfig {
    pub algorithm: KdfAlgorithm,
    pub iterations: u32,
    /// Derived key size in bytes
    pub key_length: usize,
    /// Size of the salt generated when the caller supplies none
    pub salt_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomConfig {
    pub default_length: usize,
    /// `None` leaves the request size up to the entropy source
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompatConfig {
    /// Return the bare derived key from `deriveKey` instead of `{ key, salt }`
    pub legacy_derive_key_response: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        default_pool()
    }
}

impl Default for KdfConfig {
    fn default() -> Self {
        default_kdf()
    }
}

impl Default for RandomConfig {
    fn default() -> Self {
        default_random()
    }
}

impl Default for CompatConfig {
    fn default() -> Self {
        default_compat()
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let conf: Config = toml::from_str(content)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_owned(),
            })
        };

        if self.pool.workers == 0 {
            return invalid("pool.workers", "must be at least 1");
        }
        if self.kdf.iterations == 0 {
            return invalid("kdf.iterations", "must be at least 1");
        }
        if self.kdf.key_length == 0 {
            return invalid("kdf.key_length", "must be at least 1");
        }
        if self.kdf.salt_length == 0 {
            return invalid("kdf.salt_length", "must be at least 1");
        }
        if self.random.default_length == 0 {
            return invalid("random.default_length", "must be at least 1");
        }
        if let Some(max) = self.random.max_length {
            if max < self.random.default_length {
                return invalid("random.max_length", "must not be below default_length");
            }
        }
        Ok(())
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config at runtime.
///
/// Only a missing file falls back to defaults. A file that exists but does
/// not parse or validate is an error, never replaced by defaults.
pub fn load() -> Result<&'static Config, ConfigError> {
    if let Some(conf) = CONFIG.get() {
        return Ok(conf);
    }

    let config_path =
        std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let conf = if Path::new(&config_path).exists() {
        Config::from_path(&config_path).inspect_err(|err| {
            error!("{config_path} rejected: {err}");
        })?
    } else {
        warn!("{config_path} not found, using built-in defaults");
        Config::default()
    };

    // a racing loader may have won; both read the same file
    Ok(CONFIG.get_or_init(|| conf))
}
