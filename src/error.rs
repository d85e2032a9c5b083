// src/error.rs
//! Public error types for the entire crate

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Every way a single request can fail.
///
/// Decode-time and runtime failures share this type so the caller sees one
/// failure channel regardless of where the request went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Invalid arguments specified: expected exactly one parameter object")]
    InvalidArguments,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} has the wrong type")]
    TypeMismatch(&'static str),

    #[error("Field {field} is not valid hex: {reason}")]
    InvalidEncoding { field: &'static str, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("Invalid size for {field}: expected {expected} bytes, got {actual}")]
    InvalidKeySize {
        field: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("Authentication failed: box could not be sealed or opened")]
    AuthenticationFailure,

    #[error("Cipher failure: {0}")]
    CipherFailure(String),

    #[error("Field {0} did not decrypt to valid UTF-8 text")]
    InvalidUtf8(&'static str),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Bridge is shut down and no longer accepts requests")]
    Unavailable,

    #[error("Worker terminated before delivering a result: {0}")]
    WorkerLost(String),
}

/// Machine-readable tag carried next to the human message on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidArguments,
    MissingField,
    TypeMismatch,
    InvalidEncoding,
    InvalidArgument,
    InvalidKeySize,
    AuthenticationFailure,
    CipherFailure,
    UnsupportedOperation,
    Internal,
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::InvalidArguments => ErrorKind::InvalidArguments,
            BridgeError::MissingField(_) => ErrorKind::MissingField,
            BridgeError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            BridgeError::InvalidEncoding { .. } | BridgeError::InvalidUtf8(_) => {
                ErrorKind::InvalidEncoding
            }
            BridgeError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            BridgeError::InvalidKeySize { .. } => ErrorKind::InvalidKeySize,
            BridgeError::AuthenticationFailure => ErrorKind::AuthenticationFailure,
            BridgeError::CipherFailure(_) => ErrorKind::CipherFailure,
            BridgeError::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            BridgeError::Unavailable | BridgeError::WorkerLost(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn invalid_hex(field: &'static str, err: hex::FromHexError) -> Self {
        BridgeError::InvalidEncoding {
            field,
            reason: err.to_string(),
        }
    }
}

/// Failures while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failures while bringing a bridge up
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to start worker threads: {0}")]
    Spawn(#[from] std::io::Error),
}
