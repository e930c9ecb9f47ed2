//! Entry decoding
//!
//! Parses a response body and pulls the list of entries out of it.

use super::path::{lookup, take_path};
use crate::error::{Error, Result};
use crate::types::Entries;
use serde_json::Value;

/// Key name reported in shape errors when the whole body was expected to be
/// the entry list.
const ROOT_KEY: &str = "<root>";

/// Parse a raw response body into a JSON document
pub fn parse_document(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))
}

/// Entry extractor with optional data key
#[derive(Debug, Clone, Default)]
pub struct EntryDecoder {
    /// Dotted path to the entry array
    data_key: Option<String>,
}

impl EntryDecoder {
    /// Create a decoder that treats the whole body as the entry array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder reading entries from `data_key`
    pub fn with_data_key(data_key: Option<String>) -> Self {
        Self {
            data_key: data_key.filter(|k| !k.is_empty()),
        }
    }

    /// The configured data key, if any
    pub fn data_key(&self) -> Option<&str> {
        self.data_key.as_deref()
    }

    /// Move the entries out of a decoded document.
    ///
    /// A top-level array is always the entry list. Otherwise the body must
    /// be an object and the data key must point at an array.
    pub fn entries(&self, mut body: Value) -> Result<Entries> {
        let key = self.data_key.as_deref().unwrap_or_default();

        if body.is_object() {
            return match take_path(&mut body, key) {
                Some(Value::Array(entries)) => Ok(entries),
                Some(other) => Err(Error::shape(self.key_name(), &other)),
                None => Err(Error::shape(self.key_name(), &Value::Null)),
            };
        }

        match body {
            Value::Array(entries) => Ok(entries),
            other => Err(Error::shape(self.key_name(), &other)),
        }
    }

    /// Borrow the entries of a decoded document without consuming it
    pub fn entry_slice<'a>(&self, body: &'a Value) -> Result<&'a [Value]> {
        let found = match body {
            Value::Array(entries) => return Ok(entries),
            Value::Object(_) => lookup(body, self.data_key.as_deref().unwrap_or_default()),
            other => Some(other),
        };

        match found {
            Some(Value::Array(entries)) => Ok(entries),
            Some(other) => Err(Error::shape(self.key_name(), other)),
            None => Err(Error::shape(self.key_name(), &Value::Null)),
        }
    }

    fn key_name(&self) -> &str {
        self.data_key.as_deref().unwrap_or(ROOT_KEY)
    }
}
