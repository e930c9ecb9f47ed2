//! Error types for unpage
//!
//! Every fallible operation in the crate returns `Result<T, Error>`.
//! Nothing in here is retried: the first error aborts the whole run and is
//! handed back to the caller unchanged.

use serde_json::Value;
use thiserror::Error;

/// The main error type for unpage
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport / HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("unexpected type for key `{key}`: got `{found}`")]
    Shape { key: String, found: String },

    #[error("Invalid last link '{link}': no numeric '{param}' query parameter")]
    InvalidLastLink { link: String, param: String },

    // ============================================================================
    // Run Control Errors
    // ============================================================================
    #[error("Cancelled")]
    Cancelled,

    #[error("Timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid header: {header}")]
    InvalidHeader { header: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a shape error for a key whose value has the wrong JSON type
    pub fn shape(key: impl Into<String>, found: &Value) -> Self {
        Self::Shape {
            key: key.into(),
            found: json_type_name(found).to_string(),
        }
    }

    /// Create an invalid last link error
    pub fn invalid_last_link(link: impl Into<String>, param: impl Into<String>) -> Self {
        Self::InvalidLastLink {
            link: link.into(),
            param: param.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for errors raised by the run being stopped from outside
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Timeout { .. })
    }
}

/// Name of a JSON value's type, as shown in shape errors
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Result type alias for unpage
pub type Result<T> = std::result::Result<T, Error>;
