// src/core/crypto/kdf.rs
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::aliases::{Password, SecretBytes};
use crate::config::KdfConfig;
use crate::enums::KdfAlgorithm;

/// PBKDF2 over the password's UTF-8 bytes
pub fn derive_key(password: &Password, salt: &[u8], cfg: &KdfConfig) -> SecretBytes {
    let mut out = vec![0u8; cfg.key_length];
    let pw = password.expose_secret().as_bytes();

    match cfg.algorithm {
        KdfAlgorithm::HmacSha1 => pbkdf2_hmac::<Sha1>(pw, salt, cfg.iterations, &mut out),
        KdfAlgorithm::HmacSha256 => pbkdf2_hmac::<Sha256>(pw, salt, cfg.iterations, &mut out),
    }

    SecretBytes::new(out)
}

/// Recompute and compare in constant time.
///
/// A stored key of the wrong length can never match and yields `false`.
pub fn validate_key(password: &Password, expected: &[u8], salt: &[u8], cfg: &KdfConfig) -> bool {
    let derived = derive_key(password, salt, cfg);
    bool::from(derived.expose_secret().as_slice().ct_eq(expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(algorithm: KdfAlgorithm, iterations: u32, key_length: usize) -> KdfConfig {
        KdfConfig {
            algorithm,
            iterations,
            key_length,
            ..KdfConfig::default()
        }
    }

    // RFC 6070 PBKDF2-HMAC-SHA1 vectors
    #[test]
    fn test_rfc6070_vectors() {
        let pw = Password::new("password".to_owned());
        let one = derive_key(&pw, b"salt", &cfg(KdfAlgorithm::HmacSha1, 1, 20));
        assert_eq!(
            hex::encode(one.expose_secret()),
            "0c60c80f961f0e71f3a9b524af6012062fe037a6"
        );
        let two = derive_key(&pw, b"salt", &cfg(KdfAlgorithm::HmacSha1, 2, 20));
        assert_eq!(
            hex::encode(two.expose_secret()),
            "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"
        );
    }

    #[test]
    fn test_sha256_prf_differs_from_sha1() {
        let pw = Password::new("password".to_owned());
        let a = derive_key(&pw, b"salt", &cfg(KdfAlgorithm::HmacSha1, 1, 32));
        let b = derive_key(&pw, b"salt", &cfg(KdfAlgorithm::HmacSha256, 1, 32));
        assert_eq!(
            hex::encode(b.expose_secret()),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
        assert_ne!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_validate_key() {
        let c = cfg(KdfAlgorithm::HmacSha1, 10, 20);
        let pw = Password::new("correct horse".to_owned());
        let key = derive_key(&pw, b"0123456789abcdef", &c);

        assert!(validate_key(&pw, key.expose_secret(), b"0123456789abcdef", &c));
        assert!(!validate_key(
            &Password::new("correct horsE".to_owned()),
            key.expose_secret(),
            b"0123456789abcdef",
            &c
        ));
        assert!(!validate_key(&pw, key.expose_secret(), b"other salt", &c));
        assert!(!validate_key(&pw, &key.expose_secret()[..19], b"0123456789abcdef", &c));
        assert!(!validate_key(&pw, &[], b"0123456789abcdef", &c));
    }
}
