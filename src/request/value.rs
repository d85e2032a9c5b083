// src/request/value.rs
use std::collections::BTreeMap;

use crate::error::{BridgeError, Result};

/// One parameter value. An absent field is simply not in the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    List(Vec<Value>),
    Object(Params),
    /// Booleans, non-integral numbers and integers beyond i64; no field accepts them
    Other(serde_json::Value),
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::String(s) => Value::Str(s),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Other(Json::Number(n)),
            },
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Object(Params::from_json(map)),
            other => Value::Other(other),
        }
    }
}

/// The parameter bag of one request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON `null` counts as absent
    pub fn from_json(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, Value::from(v)))
                .collect(),
        )
    }

    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn optional_str(&self, field: &'static str) -> Result<Option<&str>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(BridgeError::TypeMismatch(field)),
        }
    }

    pub fn required_str(&self, field: &'static str) -> Result<&str> {
        self.optional_str(field)?
            .ok_or(BridgeError::MissingField(field))
    }

    pub fn optional_int(&self, field: &'static str) -> Result<Option<i64>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Int(i)) => Ok(Some(*i)),
            // an integer, just wider than i64
            Some(Value::Other(serde_json::Value::Number(n))) if n.is_u64() => {
                Err(BridgeError::InvalidArgument {
                    field,
                    reason: format!("{n} is out of range"),
                })
            }
            Some(_) => Err(BridgeError::TypeMismatch(field)),
        }
    }

    /// Strict hex: even length, hex digits only. Empty string is zero bytes.
    pub fn optional_hex(&self, field: &'static str) -> Result<Option<Vec<u8>>> {
        self.optional_str(field)?
            .map(|s| hex::decode(s).map_err(|e| BridgeError::invalid_hex(field, e)))
            .transpose()
    }

    pub fn required_hex(&self, field: &'static str) -> Result<Vec<u8>> {
        self.optional_hex(field)?
            .ok_or(BridgeError::MissingField(field))
    }

    pub fn required_list(&self, field: &'static str) -> Result<&[Value]> {
        match self.get(field) {
            None => Err(BridgeError::MissingField(field)),
            Some(Value::List(items)) => Ok(items.as_slice()),
            Some(_) => Err(BridgeError::TypeMismatch(field)),
        }
    }
}
