// src/response.rs
//! Response encoder
//!
//! Handlers return an `Output` that still knows the semantic type of each
//! value. `Output::encode` turns it into the wire `Payload`: bytes become
//! lowercase hex, text stays text, booleans become `"true"`/`"false"`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{BridgeError, ErrorKind};

/// Exactly one of these per request
pub type OperationResult = Result<Payload, BridgeError>;

/// One named value inside a structured output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Hex(Vec<u8>),
    Text(String),
}

/// Raw handler result, before wire encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Bytes(Vec<u8>),
    Text(String),
    Bool(bool),
    Fields(Vec<(&'static str, Field)>),
    List(Vec<Output>),
}

/// Wire payload of a successful response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Object(BTreeMap<String, String>),
    List(Vec<Payload>),
}

impl Output {
    /// Total: every well-formed output has a wire form.
    ///
    /// Byte buffers are wiped once their hex copy exists.
    pub fn encode(self) -> Payload {
        match self {
            Output::Bytes(bytes) => Payload::Text(hex_and_wipe(bytes)),
            Output::Text(text) => Payload::Text(text),
            Output::Bool(flag) => Payload::Text(flag.to_string()),
            Output::Fields(fields) => Payload::Object(
                fields
                    .into_iter()
                    .map(|(name, field)| {
                        let value = match field {
                            Field::Hex(bytes) => hex_and_wipe(bytes),
                            Field::Text(text) => text,
                        };
                        (name.to_owned(), value)
                    })
                    .collect(),
            ),
            Output::List(items) => Payload::List(items.into_iter().map(Output::encode).collect()),
        }
    }
}

fn hex_and_wipe(mut bytes: Vec<u8>) -> String {
    let encoded = hex::encode(&bytes);
    bytes.zeroize();
    encoded
}

impl Payload {
    /// The string form of a scalar payload
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// One field of a structured payload
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Payload::Object(map) => map.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Payload]> {
        match self {
            Payload::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// Terminal state of a request on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Ok { payload: Payload },
    Error { kind: ErrorKind, message: String },
}

/// Wire envelope sent back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Response {
    pub fn new(id: Option<serde_json::Value>, result: OperationResult) -> Self {
        let outcome = match result {
            Ok(payload) => Outcome::Ok { payload },
            Err(err) => Outcome::Error {
                kind: err.kind(),
                message: err.to_string(),
            },
        };
        Self { id, outcome }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bytes_encode_as_lowercase_hex() {
        assert_eq!(
            Output::Bytes(vec![0xde, 0xad, 0xBE, 0xef]).encode(),
            Payload::Text("deadbeef".into())
        );
        assert_eq!(Output::Bytes(vec![]).encode(), Payload::Text(String::new()));
    }

    #[test]
    fn test_bool_encodes_as_string() {
        assert_eq!(Output::Bool(true).encode().as_text(), Some("true"));
        assert_eq!(Output::Bool(false).encode().as_text(), Some("false"));
    }

    #[test]
    fn test_fields_keep_their_own_encoding() {
        let payload = Output::Fields(vec![
            ("IV", Field::Hex(vec![0, 1])),
            ("result", Field::Text("00ff".into())),
        ])
        .encode();
        assert_eq!(payload.field("IV"), Some("0001"));
        // text that looks like hex is not re-encoded
        assert_eq!(payload.field("result"), Some("00ff"));
    }

    #[test]
    fn test_success_response_json_shape() {
        let response = Response::new(Some(json!(7)), Ok(Payload::Text("ab".into())));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "id": 7, "status": "ok", "payload": "ab" })
        );
    }

    #[test]
    fn test_failure_response_json_shape() {
        let response = Response::new(None, Err(BridgeError::MissingField("salt")));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "error",
                "kind": "MissingField",
                "message": "Missing required field: salt"
            })
        );
    }

    #[test]
    fn test_response_parses_back() {
        let line = r#"{"id":"a","status":"ok","payload":{"IV":"00","result":"hi"}}"#;
        let response: Response = serde_json::from_str(line).unwrap();
        assert!(response.is_ok());
        match response.outcome {
            Outcome::Ok { payload } => assert_eq!(payload.field("result"), Some("hi")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
