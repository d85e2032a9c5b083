// src/request/mod.rs
//! Request model and decoder
//!
//! A request arrives as a command name plus a JSON argument list holding one
//! parameter object. It leaves as a typed `Operation` with every hex field
//! already turned into bytes, or as a `BridgeError`.

mod decode;
mod value;

pub use decode::{decode, CipherItem, Operation};
pub use value::{Params, Value};

use serde::{Deserialize, Serialize};

/// Wire envelope for one command
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Request {
    /// Opaque correlation id, echoed back on the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub name: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl Request {
    pub fn new(name: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            id: None,
            name: name.into(),
            args: vec![params],
        }
    }

    pub fn with_id(mut self, id: impl Into<serde_json::Value>) -> Self {
        self.id = Some(id.into());
        self
    }
}
