// src/request/decode.rs
use std::fmt;

use crate::aliases::{Password, SecretBytes};
use crate::config::RandomConfig;
use crate::consts::fields;
use crate::enums::OperationKind;
use crate::error::{BridgeError, Result};

use super::value::{Params, Value};

/// A fully decoded request. Hex fields are bytes, text fields are UTF-8.
///
/// Sizes are checked by the handlers, not here: a 31-byte key decodes fine
/// and fails later with `InvalidKeySize`.
pub enum Operation {
    GetRandom {
        length: usize,
    },
    DeriveKey {
        password: Password,
        salt: Option<Vec<u8>>,
    },
    ValidateKey {
        password: Password,
        encrypted_password: Vec<u8>,
        salt: Vec<u8>,
    },
    GenerateKeyPair,
    BoxEncrypt {
        public_key: Vec<u8>,
        private_key: SecretBytes,
        nonce: Vec<u8>,
        plaintext: String,
    },
    BoxDecrypt {
        public_key: Vec<u8>,
        private_key: SecretBytes,
        nonce: Vec<u8>,
        ciphertext: Vec<u8>,
    },
    SymmetricEncrypt {
        key: SecretBytes,
        plaintext: String,
        iv: Option<Vec<u8>>,
    },
    SymmetricDecrypt {
        key: SecretBytes,
        iv: Vec<u8>,
        ciphertext: Vec<u8>,
    },
    SymmetricDecryptBatch {
        key: SecretBytes,
        items: Vec<CipherItem>,
    },
    Digest {
        data: String,
    },
}

/// One `{ IV, data }` entry of a batch decrypt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherItem {
    pub iv: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::GetRandom { .. } => OperationKind::GetRandom,
            Operation::DeriveKey { .. } => OperationKind::DeriveKey,
            Operation::ValidateKey { .. } => OperationKind::ValidateKey,
            Operation::GenerateKeyPair => OperationKind::GenerateKeyPair,
            Operation::BoxEncrypt { .. } => OperationKind::BoxEncrypt,
            Operation::BoxDecrypt { .. } => OperationKind::BoxDecrypt,
            Operation::SymmetricEncrypt { .. } => OperationKind::SymmetricEncrypt,
            Operation::SymmetricDecrypt { .. } => OperationKind::SymmetricDecrypt,
            Operation::SymmetricDecryptBatch { .. } => OperationKind::SymmetricDecryptBatch,
            Operation::Digest { .. } => OperationKind::Digest,
        }
    }
}

// Only the kind: every other field may be secret.
impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

/// Decode `(name, args)` into a typed operation.
///
/// `args` must hold exactly one parameter object. `generateKeyPair` takes no
/// parameters, so for it an empty argument list is accepted as well.
pub fn decode(
    name: &str,
    args: Vec<serde_json::Value>,
    random: &RandomConfig,
) -> Result<Operation> {
    let kind: OperationKind = name.parse()?;

    if kind == OperationKind::GenerateKeyPair && args.is_empty() {
        return Ok(Operation::GenerateKeyPair);
    }

    let params = single_bag(args)?;
    decode_params(kind, &params, random)
}

fn single_bag(mut args: Vec<serde_json::Value>) -> Result<Params> {
    match (args.pop(), args.is_empty()) {
        (Some(serde_json::Value::Object(map)), true) => Ok(Params::from_json(map)),
        _ => Err(BridgeError::InvalidArguments),
    }
}

fn decode_params(kind: OperationKind, p: &Params, random: &RandomConfig) -> Result<Operation> {
    let op = match kind {
        OperationKind::GetRandom => Operation::GetRandom {
            length: random_length(p, random)?,
        },
        OperationKind::DeriveKey => Operation::DeriveKey {
            password: password(p)?,
            salt: p.optional_hex(fields::SALT)?,
        },
        OperationKind::ValidateKey => Operation::ValidateKey {
            password: password(p)?,
            encrypted_password: p.required_hex(fields::ENCRYPTED_PASSWORD)?,
            salt: p.required_hex(fields::SALT)?,
        },
        OperationKind::GenerateKeyPair => Operation::GenerateKeyPair,
        OperationKind::BoxEncrypt => Operation::BoxEncrypt {
            public_key: p.required_hex(fields::PUBLIC_KEY)?,
            private_key: SecretBytes::new(p.required_hex(fields::PRIVATE_KEY)?),
            nonce: p.required_hex(fields::NONCE)?,
            plaintext: p.required_str(fields::DATA)?.to_owned(),
        },
        OperationKind::BoxDecrypt => Operation::BoxDecrypt {
            public_key: p.required_hex(fields::PUBLIC_KEY)?,
            private_key: SecretBytes::new(p.required_hex(fields::PRIVATE_KEY)?),
            nonce: p.required_hex(fields::NONCE)?,
            ciphertext: p.required_hex(fields::DATA)?,
        },
        OperationKind::SymmetricEncrypt => Operation::SymmetricEncrypt {
            key: SecretBytes::new(p.required_hex(fields::KEY)?),
            plaintext: p.required_str(fields::DATA)?.to_owned(),
            iv: p.optional_hex(fields::IV)?,
        },
        OperationKind::SymmetricDecrypt => Operation::SymmetricDecrypt {
            key: SecretBytes::new(p.required_hex(fields::KEY)?),
            iv: p.required_hex(fields::IV)?,
            ciphertext: p.required_hex(fields::DATA)?,
        },
        OperationKind::SymmetricDecryptBatch => Operation::SymmetricDecryptBatch {
            key: SecretBytes::new(p.required_hex(fields::KEY)?),
            items: p
                .required_list(fields::ITEMS)?
                .iter()
                .map(cipher_item)
                .collect::<Result<_>>()?,
        },
        OperationKind::Digest => Operation::Digest {
            data: p.required_str(fields::DATA)?.to_owned(),
        },
    };
    Ok(op)
}

fn password(p: &Params) -> Result<Password> {
    Ok(Password::new(p.required_str(fields::PASSWORD)?.to_owned()))
}

fn random_length(p: &Params, random: &RandomConfig) -> Result<usize> {
    let Some(requested) = p.optional_int(fields::LENGTH)? else {
        return Ok(random.default_length);
    };

    let invalid = |reason: String| BridgeError::InvalidArgument {
        field: fields::LENGTH,
        reason,
    };

    if requested < 1 {
        return Err(invalid(format!("must be a positive integer, got {requested}")));
    }
    let length =
        usize::try_from(requested).map_err(|_| invalid(format!("{requested} is too large")))?;
    if let Some(max) = random.max_length {
        if length > max {
            return Err(invalid(format!("{length} exceeds the configured maximum {max}")));
        }
    }
    Ok(length)
}

fn cipher_item(value: &Value) -> Result<CipherItem> {
    let Value::Object(item) = value else {
        return Err(BridgeError::TypeMismatch(fields::ITEMS));
    };
    Ok(CipherItem {
        iv: item.required_hex(fields::IV)?,
        ciphertext: item.required_hex(fields::DATA)?,
    })
}
