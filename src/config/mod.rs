// src/config/mod.rs
//! Configuration system for crypto-bridge
//!
//! Central, lazy-loaded global config with TOML + env override.

pub use app::{load, CompatConfig, Config, KdfConfig, PoolConfig, RandomConfig};

mod app;
mod defaults;
