// tests/config_tests.rs
//! TOML configuration loading from disk

mod common;

use std::io::Write;

use crypto_bridge::consts::CONFIG_ENV_VAR;
use crypto_bridge::{load_config, Bridge, Config, ConfigError, KdfAlgorithm, StartupError};
use serde_json::json;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_from_path_reads_every_section() {
    common::setup();
    let file = write_config(
        r#"
        [pool]
        workers = 3

        [kdf]
        algorithm = "hmac-sha256"
        iterations = 1000
        key_length = 32
        salt_length = 8

        [random]
        default_length = 24
        max_length = 4096

        [compat]
        legacy_derive_key_response = true
        "#,
    );

    let config = Config::from_path(file.path()).unwrap();
    assert_eq!(config.pool.workers, 3);
    assert_eq!(config.kdf.algorithm, KdfAlgorithm::HmacSha256);
    assert_eq!(config.kdf.iterations, 1000);
    assert_eq!(config.kdf.key_length, 32);
    assert_eq!(config.kdf.salt_length, 8);
    assert_eq!(config.random.default_length, 24);
    assert_eq!(config.random.max_length, Some(4096));
    assert!(config.compat.legacy_derive_key_response);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("[kdf]\niterations = 500\n");
    let config = Config::from_path(file.path()).unwrap();
    let defaults = Config::default();

    assert_eq!(config.kdf.iterations, 500);
    assert_eq!(config.kdf.algorithm, defaults.kdf.algorithm);
    assert_eq!(config.random.default_length, 16);
    assert!(!config.compat.legacy_derive_key_response);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_bad_values_rejected() {
    for content in [
        "[pool]\nworkers = 0\n",
        "[kdf]\niterations = 0\n",
        "[random]\ndefault_length = 0\n",
        "[kdf]\nunknown = 1\n",
        "[kdf]\nalgorithm = \"md4\"\n",
    ] {
        let file = write_config(content);
        assert!(Config::from_path(file.path()).is_err(), "accepted: {content}");
    }
}

#[test]
fn test_loaded_config_drives_the_bridge() {
    let file = write_config(
        "[pool]\nworkers = 2\n[kdf]\niterations = 10\nkey_length = 32\n[random]\ndefault_length = 8\nmax_length = 64\n",
    );
    let bridge = Bridge::new(Config::from_path(file.path()).unwrap()).unwrap();
    assert_eq!(bridge.workers(), 2);

    let random = bridge.call("getRandomValue", vec![json!({})]).unwrap();
    assert_eq!(common::text(&random).len(), 16);

    let too_long = bridge.call("getRandomValue", vec![json!({ "length": 65 })]);
    assert!(too_long.is_err());

    let derived = bridge
        .call("deriveKey", vec![json!({ "password": "pw", "salt": "aa" })])
        .unwrap();
    assert_eq!(common::field(&derived, "key").len(), 64);
}

// The only test in this binary that touches the process-wide config.
#[test]
fn test_rejected_env_config_is_an_error_not_defaults() {
    common::setup();
    let dir = tempfile::tempdir().unwrap();

    let misspelled = dir.path().join("misspelled.toml");
    std::fs::write(
        &misspelled,
        "[kdf]\nalgorithm = \"hmac-sha256\"\niterations = 100000\nkey_lenght = 32\n",
    )
    .unwrap();
    std::env::set_var(CONFIG_ENV_VAR, &misspelled);
    assert!(matches!(load_config(), Err(ConfigError::Toml(_))));
    assert!(matches!(
        Bridge::from_env(),
        Err(StartupError::Config(ConfigError::Toml(_)))
    ));

    let zero_rounds = dir.path().join("zero.toml");
    std::fs::write(&zero_rounds, "[kdf]\niterations = 0\n").unwrap();
    std::env::set_var(CONFIG_ENV_VAR, &zero_rounds);
    assert!(matches!(load_config(), Err(ConfigError::Invalid { .. })));

    // only an absent file means defaults
    std::env::set_var(CONFIG_ENV_VAR, dir.path().join("absent.toml"));
    assert_eq!(load_config().unwrap(), &Config::default());
    assert!(Bridge::from_env().is_ok());
}
