// src/consts.rs
//! Shared constants: primitive sizes, defaults and wire field names

/// Curve25519 public and secret key size for the NaCl box
pub const BOX_KEY_LEN: usize = 32;

/// XSalsa20 nonce size for the NaCl box
pub const BOX_NONCE_LEN: usize = 24;

/// AES block size; also the only accepted CBC IV length
pub const AES_BLOCK_LEN: usize = 16;

/// Bytes returned by `getRandomValue` when `length` is absent
pub const DEFAULT_RANDOM_LENGTH: usize = 16;

/// Salt generated for `deriveKey` when the caller supplies none
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// PBKDF2 rounds; matches keys derived by existing callers
pub const DEFAULT_KDF_ITERATIONS: u32 = 20_000;

/// PBKDF2 output size in bytes (160 bits)
pub const DEFAULT_KDF_KEY_LENGTH: usize = 20;

/// Env var naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "CRYPTO_BRIDGE_CONFIG";

/// Config file used when the env var is unset
pub const DEFAULT_CONFIG_PATH: &str = "crypto-bridge.toml";

/// Parameter and response field names as they appear on the wire
pub mod fields {
    pub const LENGTH: &str = "length";
    pub const PASSWORD: &str = "password";
    pub const ENCRYPTED_PASSWORD: &str = "encryptedPassword";
    pub const SALT: &str = "salt";
    pub const PUBLIC_KEY: &str = "publicKey";
    pub const PRIVATE_KEY: &str = "privateKey";
    pub const NONCE: &str = "nonce";
    pub const DATA: &str = "data";
    pub const KEY: &str = "key";
    pub const IV: &str = "IV";
    pub const ITEMS: &str = "items";
    pub const RESULT: &str = "result";
}
