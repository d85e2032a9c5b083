// src/core/crypto/digest.rs
use md5::{Digest, Md5};

/// MD5 over raw bytes.
///
/// Kept for callers that already depend on it. Not collision resistant; do
/// not use it for anything integrity sensitive.
pub fn md5(data: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(&Md5::digest(data));
    out
}
