// src/config/defaults.rs
use crate::config::app::{CompatConfig, KdfConfig, PoolConfig, RandomConfig};
use crate::consts::{
    DEFAULT_KDF_ITERATIONS, DEFAULT_KDF_KEY_LENGTH, DEFAULT_RANDOM_LENGTH, DEFAULT_SALT_LENGTH,
};
use crate::enums::KdfAlgorithm;

pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

pub fn default_pool() -> PoolConfig {
    PoolConfig {
        workers: default_workers(),
    }
}

pub fn default_kdf() -> KdfConfig {
    KdfConfig {
        algorithm: KdfAlgorithm::HmacSha1,
        iterations: DEFAULT_KDF_ITERATIONS,
        key_length: DEFAULT_KDF_KEY_LENGTH,
        salt_length: DEFAULT_SALT_LENGTH,
    }
}

pub fn default_random() -> RandomConfig {
    RandomConfig {
        default_length: DEFAULT_RANDOM_LENGTH,
        max_length: None,
    }
}

pub fn default_compat() -> CompatConfig {
    CompatConfig {
        legacy_derive_key_response: false,
    }
}
