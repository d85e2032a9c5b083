// src/core/crypto/symmetric.rs
//! AES-CBC with PKCS#7 padding. Key length picks AES-128, AES-192 or AES-256.

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::consts::{fields, AES_BLOCK_LEN};
use crate::error::{BridgeError, Result};

const KEY_SIZES: &str = "16, 24 or 32";

pub fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_iv(iv)?;
    let ciphertext = match key.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| init_failure())?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(|_| init_failure())?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        32 => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| init_failure())?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        actual => return Err(key_size(actual)),
    };
    Ok(ciphertext)
}

pub fn cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    check_iv(iv)?;
    let plaintext = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| init_failure())?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(|_| init_failure())?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        32 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| init_failure())?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        actual => return Err(key_size(actual)),
    };
    plaintext.map_err(|_| BridgeError::CipherFailure("bad padding or ciphertext length".into()))
}

fn check_iv(iv: &[u8]) -> Result<()> {
    if iv.len() != AES_BLOCK_LEN {
        return Err(BridgeError::InvalidKeySize {
            field: fields::IV,
            expected: "16",
            actual: iv.len(),
        });
    }
    Ok(())
}

fn key_size(actual: usize) -> BridgeError {
    BridgeError::InvalidKeySize {
        field: fields::KEY,
        expected: KEY_SIZES,
        actual,
    }
}

fn init_failure() -> BridgeError {
    BridgeError::CipherFailure("cipher rejected key or IV".into())
}
