// src/core/crypto/nacl_box.rs
//! Curve25519-XSalsa20-Poly1305 box, wire compatible with NaCl `crypto_box`
//!
//! Ciphertext layout is `tag (16) || body`, the same bytes NaCl implementations
//! emit once the leading zero padding is stripped.

use crypto_box::aead::generic_array::GenericArray;
use crypto_box::aead::Aead;
use crypto_box::{PublicKey, SalsaBox, SecretKey};
use zeroize::Zeroize;

use crate::aliases::BoxSecretKey32;
use crate::consts::{fields, BOX_KEY_LEN, BOX_NONCE_LEN};
use crate::error::{BridgeError, Result};
use crate::random::RandomSource;

/// Key sizes are fixed by the array types; there is no way to build a short one.
pub struct KeyPair {
    pub public_key: [u8; BOX_KEY_LEN],
    pub private_key: BoxSecretKey32,
}

/// Fresh keypair from a random secret scalar
pub fn generate_key_pair(rng: &dyn RandomSource) -> KeyPair {
    let mut seed = [0u8; BOX_KEY_LEN];
    rng.fill_bytes(&mut seed);
    let secret = SecretKey::from(seed);
    seed.zeroize();

    KeyPair {
        public_key: *secret.public_key().as_bytes(),
        private_key: BoxSecretKey32::new(secret.to_bytes()),
    }
}

/// Seal `plaintext` from the owner of `private_key` to the owner of `public_key`
pub fn box_encrypt(
    public_key: &[u8],
    private_key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let salsa = salsa_box(public_key, private_key)?;
    check_nonce(nonce)?;
    salsa
        .encrypt(GenericArray::from_slice(nonce), plaintext)
        .map_err(|_| BridgeError::AuthenticationFailure)
}

/// Open a box sealed by the owner of `public_key` for the owner of `private_key`
pub fn box_decrypt(
    public_key: &[u8],
    private_key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let salsa = salsa_box(public_key, private_key)?;
    check_nonce(nonce)?;
    salsa
        .decrypt(GenericArray::from_slice(nonce), ciphertext)
        .map_err(|_| BridgeError::AuthenticationFailure)
}

fn salsa_box(public_key: &[u8], private_key: &[u8]) -> Result<SalsaBox> {
    let public = PublicKey::from(key_array(fields::PUBLIC_KEY, public_key)?);
    let mut secret_bytes = key_array(fields::PRIVATE_KEY, private_key)?;
    let secret = SecretKey::from(secret_bytes);
    secret_bytes.zeroize();
    Ok(SalsaBox::new(&public, &secret))
}

fn key_array(field: &'static str, bytes: &[u8]) -> Result<[u8; BOX_KEY_LEN]> {
    bytes.try_into().map_err(|_| BridgeError::InvalidKeySize {
        field,
        expected: "32",
        actual: bytes.len(),
    })
}

fn check_nonce(nonce: &[u8]) -> Result<()> {
    if nonce.len() != BOX_NONCE_LEN {
        return Err(BridgeError::InvalidKeySize {
            field: fields::NONCE,
            expected: "24",
            actual: nonce.len(),
        });
    }
    Ok(())
}
