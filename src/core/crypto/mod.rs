// src/core/crypto/mod.rs
//! Pure cryptographic operations. No I/O, no threads
//!
//! All functions work on in-memory buffers and take their randomness from a
//! `RandomSource`. Size checks live here so every caller gets them.
mod digest;
mod kdf;
mod nacl_box;
mod symmetric;

pub use digest::md5;
pub use kdf::{derive_key, validate_key};
pub use nacl_box::{box_decrypt, box_encrypt, generate_key_pair, KeyPair};
pub use symmetric::{cbc_decrypt, cbc_encrypt};
