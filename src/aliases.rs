// src/aliases.rs
//! Zeroizing secret wrappers from secure-gate
//!
//! Anything a caller would not want left in freed memory goes through one of
//! these: passwords, box secret keys, symmetric keys and derived keys.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(BoxSecretKey32, 32); // Curve25519 secret scalar

// Dynamic secrets
dynamic_alias!(Password, String);
dynamic_alias!(SecretBytes, Vec<u8>); // symmetric keys, derived keys
