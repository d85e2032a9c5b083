// src/enums.rs
//! Public enum types used throughout the crate
//!
//! The closed command set and the user-selectable KDF PRF live here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Every command the bridge understands.
///
/// Adding a variant forces a decoder rule and a handler: both match on this
/// enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    GetRandom,
    DeriveKey,
    ValidateKey,
    GenerateKeyPair,
    BoxEncrypt,
    BoxDecrypt,
    SymmetricEncrypt,
    SymmetricDecrypt,
    SymmetricDecryptBatch,
    Digest,
}

impl OperationKind {
    pub const ALL: [OperationKind; 10] = [
        OperationKind::GetRandom,
        OperationKind::DeriveKey,
        OperationKind::ValidateKey,
        OperationKind::GenerateKeyPair,
        OperationKind::BoxEncrypt,
        OperationKind::BoxDecrypt,
        OperationKind::SymmetricEncrypt,
        OperationKind::SymmetricDecrypt,
        OperationKind::SymmetricDecryptBatch,
        OperationKind::Digest,
    ];

    /// Command name used by callers
    pub const fn wire_name(self) -> &'static str {
        match self {
            OperationKind::GetRandom => "getRandomValue",
            OperationKind::DeriveKey => "deriveKey",
            OperationKind::ValidateKey => "validateKey",
            OperationKind::GenerateKeyPair => "generateKeyPair",
            OperationKind::BoxEncrypt => "encrypt",
            OperationKind::BoxDecrypt => "decrypt",
            OperationKind::SymmetricEncrypt => "symmetricEncrypt",
            OperationKind::SymmetricDecrypt => "symmetricDecrypt",
            OperationKind::SymmetricDecryptBatch => "symmetricDecryptBatch",
            OperationKind::Digest => "md5",
        }
    }
}

impl FromStr for OperationKind {
    type Err = BridgeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == name)
            .ok_or_else(|| BridgeError::UnsupportedOperation(name.to_owned()))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// PRF used by PBKDF2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum KdfAlgorithm {
    /// Legacy default; keys derived by existing callers use it
    #[default]
    HmacSha1,
    HmacSha256,
}
