// tests/common.rs
//! Shared test utilities: logging setup and ready-made bridges

use std::sync::Arc;

use crypto_bridge::{Bridge, Config, Payload, SeededRandom};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging; respects RUST_LOG, safe to call repeatedly
pub fn setup() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

/// Defaults with a cheap KDF so tests stay fast
#[allow(dead_code)]
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.pool.workers = 4;
    config.kdf.iterations = 64;
    config
}

/// Bridge on the real CSPRNG
#[allow(dead_code)]
pub fn os_bridge() -> Bridge {
    setup();
    Bridge::new(fast_config()).expect("start bridge")
}

/// Bridge on a seeded RNG: same seed, same keys/IVs/salts
#[allow(dead_code)]
pub fn seeded_bridge(seed: u64) -> Bridge {
    setup();
    Bridge::with_random(fast_config(), Arc::new(SeededRandom::new(seed))).expect("start bridge")
}

#[allow(dead_code)]
pub fn text(payload: &Payload) -> &str {
    payload.as_text().expect("scalar payload")
}

#[allow(dead_code)]
pub fn field<'a>(payload: &'a Payload, name: &str) -> &'a str {
    payload
        .field(name)
        .unwrap_or_else(|| panic!("payload has no field {name}: {payload:?}"))
}
