// src/lib.rs
//! crypto-bridge: fixed cryptographic operations behind a text-only wire
//!
//! Features:
//! - Hex/UTF-8 command protocol (one request in, exactly one result out)
//! - Off-thread execution on a fixed-size worker pool
//! - NaCl box, PBKDF2, AES-CBC, MD5 and CSPRNG operations
//! - Injected randomness for deterministic tests

pub mod aliases;
pub mod bridge;
pub mod config;
pub mod consts;
pub mod core;
pub mod enums;
pub mod error;
pub mod random;
pub mod request;
pub mod response;
pub mod scheduler;

// Re-export everything callers need at the crate root
pub use bridge::Bridge;
pub use config::{load as load_config, Config};
pub use enums::{KdfAlgorithm, OperationKind};
pub use error::{BridgeError, ConfigError, ErrorKind, Result, StartupError};
pub use random::{OsRandom, RandomSource, SeededRandom};
pub use request::{Operation, Params, Request, Value};
pub use response::{OperationResult, Output, Payload, Response};
pub use scheduler::{Ticket, WorkerPool};
