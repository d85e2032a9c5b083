// src/core/ops.rs
//! One handler per operation
//!
//! Handlers take a decoded `Operation`, call into `core::crypto` and hand back
//! an `Output`. They run on a worker thread and never see the wire format.

use std::sync::Arc;

use tracing::debug;

use crate::aliases::{Password, SecretBytes};
use crate::config::Config;
use crate::consts::{fields, AES_BLOCK_LEN};
use crate::core::crypto;
use crate::error::{BridgeError, Result};
use crate::random::RandomSource;
use crate::request::{CipherItem, Operation};
use crate::response::{Field, Output};

/// What every handler may consult besides its own inputs
#[derive(Clone)]
pub struct Context {
    pub config: Arc<Config>,
    pub random: Arc<dyn RandomSource>,
}

impl Context {
    pub fn new(config: Config, random: Arc<dyn RandomSource>) -> Self {
        Self {
            config: Arc::new(config),
            random,
        }
    }
}

/// Run one decoded operation to completion
pub fn execute(op: Operation, ctx: &Context) -> Result<Output> {
    match op {
        Operation::GetRandom { length } => get_random(ctx, length),
        Operation::DeriveKey { password, salt } => derive_key(ctx, &password, salt),
        Operation::ValidateKey {
            password,
            encrypted_password,
            salt,
        } => validate_key(ctx, &password, &encrypted_password, &salt),
        Operation::GenerateKeyPair => generate_key_pair(ctx),
        Operation::BoxEncrypt {
            public_key,
            private_key,
            nonce,
            plaintext,
        } => box_encrypt(&public_key, &private_key, &nonce, &plaintext),
        Operation::BoxDecrypt {
            public_key,
            private_key,
            nonce,
            ciphertext,
        } => box_decrypt(&public_key, &private_key, &nonce, &ciphertext),
        Operation::SymmetricEncrypt { key, plaintext, iv } => {
            symmetric_encrypt(ctx, &key, &plaintext, iv)
        }
        Operation::SymmetricDecrypt {
            key,
            iv,
            ciphertext,
        } => symmetric_decrypt(&key, iv, &ciphertext),
        Operation::SymmetricDecryptBatch { key, items } => symmetric_decrypt_batch(&key, items),
        Operation::Digest { data } => digest(&data),
    }
}

fn get_random(ctx: &Context, length: usize) -> Result<Output> {
    if length == 0 {
        return Err(BridgeError::InvalidArgument {
            field: fields::LENGTH,
            reason: "must be a positive integer, got 0".into(),
        });
    }
    let bytes = ctx
        .random
        .try_random_bytes(length)
        .map_err(|_| BridgeError::InvalidArgument {
            field: fields::LENGTH,
            reason: format!("cannot allocate {length} bytes"),
        })?;
    Ok(Output::Bytes(bytes))
}

fn derive_key(ctx: &Context, password: &Password, salt: Option<Vec<u8>>) -> Result<Output> {
    let kdf = &ctx.config.kdf;
    let salt = salt.unwrap_or_else(|| ctx.random.random_bytes(kdf.salt_length));
    let key = crypto::derive_key(password, &salt, kdf);
    debug!(salt_len = salt.len(), key_len = key.expose_secret().len(), "derived key");

    let key = key.expose_secret().clone();
    if ctx.config.compat.legacy_derive_key_response {
        return Ok(Output::Bytes(key));
    }
    Ok(Output::Fields(vec![
        (fields::KEY, Field::Hex(key)),
        (fields::SALT, Field::Hex(salt)),
    ]))
}

fn validate_key(
    ctx: &Context,
    password: &Password,
    encrypted_password: &[u8],
    salt: &[u8],
) -> Result<Output> {
    let valid = crypto::validate_key(password, encrypted_password, salt, &ctx.config.kdf);
    Ok(Output::Bool(valid))
}

fn generate_key_pair(ctx: &Context) -> Result<Output> {
    let pair = crypto::generate_key_pair(ctx.random.as_ref());
    Ok(Output::Fields(vec![
        (fields::PUBLIC_KEY, Field::Hex(pair.public_key.to_vec())),
        (
            fields::PRIVATE_KEY,
            Field::Hex(pair.private_key.expose_secret().to_vec()),
        ),
    ]))
}

fn box_encrypt(
    public_key: &[u8],
    private_key: &SecretBytes,
    nonce: &[u8],
    plaintext: &str,
) -> Result<Output> {
    let sealed = crypto::box_encrypt(
        public_key,
        private_key.expose_secret(),
        nonce,
        plaintext.as_bytes(),
    )?;
    debug!(plaintext_len = plaintext.len(), sealed_len = sealed.len(), "box sealed");
    Ok(Output::Bytes(sealed))
}

fn box_decrypt(
    public_key: &[u8],
    private_key: &SecretBytes,
    nonce: &[u8],
    ciphertext: &[u8],
) -> Result<Output> {
    let opened = crypto::box_decrypt(public_key, private_key.expose_secret(), nonce, ciphertext)?;
    debug!(sealed_len = ciphertext.len(), "box opened");
    Ok(Output::Text(utf8(opened)?))
}

fn symmetric_encrypt(
    ctx: &Context,
    key: &SecretBytes,
    plaintext: &str,
    iv: Option<Vec<u8>>,
) -> Result<Output> {
    let iv = iv.unwrap_or_else(|| ctx.random.random_bytes(AES_BLOCK_LEN));
    let ciphertext = crypto::cbc_encrypt(key.expose_secret(), &iv, plaintext.as_bytes())?;
    Ok(Output::Fields(vec![
        (fields::IV, Field::Hex(iv)),
        (fields::RESULT, Field::Hex(ciphertext)),
    ]))
}

fn symmetric_decrypt(key: &SecretBytes, iv: Vec<u8>, ciphertext: &[u8]) -> Result<Output> {
    let plaintext = crypto::cbc_decrypt(key.expose_secret(), &iv, ciphertext)?;
    Ok(Output::Fields(vec![
        (fields::IV, Field::Hex(iv)),
        (fields::RESULT, Field::Text(utf8(plaintext)?)),
    ]))
}

/// All or nothing: the first failing item fails the request
fn symmetric_decrypt_batch(key: &SecretBytes, items: Vec<CipherItem>) -> Result<Output> {
    let count = items.len();
    let outputs = items
        .into_iter()
        .map(|item| symmetric_decrypt(key, item.iv, &item.ciphertext))
        .collect::<Result<Vec<_>>>()?;
    debug!(count, "batch decrypted");
    Ok(Output::List(outputs))
}

fn digest(data: &str) -> Result<Output> {
    Ok(Output::Bytes(crypto::md5(data.as_bytes()).to_vec()))
}

fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| BridgeError::InvalidUtf8(fields::DATA))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    fn ctx() -> Context {
        let mut config = Config::default();
        config.kdf.iterations = 16;
        Context::new(config, Arc::new(SeededRandom::new(42)))
    }

    #[test]
    fn test_derive_key_returns_generated_salt() {
        let ctx = ctx();
        let out = execute(
            Operation::DeriveKey {
                password: Password::new::<String>("pw".into()),
                salt: None,
            },
            &ctx,
        )
        .unwrap()
        .encode();

        let salt = hex::decode(out.field("salt").unwrap()).unwrap();
        assert_eq!(salt.len(), 16);
        let key = hex::decode(out.field("key").unwrap()).unwrap();
        assert!(crypto::validate_key(
            &Password::new::<String>("pw".into()),
            &key,
            &salt,
            &ctx.config.kdf
        ));
    }

    #[test]
    fn test_legacy_derive_key_returns_bare_hex() {
        let mut config = Config::default();
        config.kdf.iterations = 16;
        config.compat.legacy_derive_key_response = true;
        let ctx = Context::new(config, Arc::new(SeededRandom::new(1)));

        let out = execute(
            Operation::DeriveKey {
                password: Password::new::<String>("pw".into()),
                salt: Some(vec![1; 16]),
            },
            &ctx,
        )
        .unwrap();
        match out {
            Output::Bytes(key) => assert_eq!(key.len(), 20),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_symmetric_encrypt_generates_iv_when_absent() {
        let out = execute(
            Operation::SymmetricEncrypt {
                key: SecretBytes::new(vec![5; 32]),
                plaintext: "hi".into(),
                iv: None,
            },
            &ctx(),
        )
        .unwrap()
        .encode();
        assert_eq!(out.field("IV").unwrap().len(), 32);
        assert_eq!(out.field("result").unwrap().len(), 32);
    }

    #[test]
    fn test_non_utf8_plaintext_is_a_failure() {
        let key = vec![5; 16];
        let iv = vec![0; 16];
        let ciphertext = crypto::cbc_encrypt(&key, &iv, &[0xff, 0xfe]).unwrap();
        let err = execute(
            Operation::SymmetricDecrypt {
                key: SecretBytes::new(key),
                iv,
                ciphertext,
            },
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(err, BridgeError::InvalidUtf8("data"));
    }

    #[test]
    fn test_batch_fails_as_a_whole() {
        let key = vec![8; 16];
        let iv = vec![1; 16];
        let good = crypto::cbc_encrypt(&key, &iv, b"ok").unwrap();
        let items = vec![
            CipherItem {
                iv: iv.clone(),
                ciphertext: good,
            },
            CipherItem {
                iv,
                ciphertext: vec![0; 5],
            },
        ];
        let err = execute(
            Operation::SymmetricDecryptBatch {
                key: SecretBytes::new(key),
                items,
            },
            &ctx(),
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::CipherFailure(_)));
    }

    #[test]
    fn test_get_random_unallocatable_length_is_a_failure() {
        let err = execute(
            Operation::GetRandom {
                length: isize::MAX as usize,
            },
            &ctx(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BridgeError::InvalidArgument { field: "length", .. }
        ));
    }

    #[test]
    fn test_get_random_zero_rejected() {
        assert!(matches!(
            execute(Operation::GetRandom { length: 0 }, &ctx()),
            Err(BridgeError::InvalidArgument { field: "length", .. })
        ));
    }
}
