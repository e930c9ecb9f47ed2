//! Request header handling

use crate::error::{Error, Result};
use crate::types::StringMap;

/// Headers sent unless the user overrides them
///
/// The user agent is set on the client itself.
pub fn default_headers() -> StringMap {
    StringMap::from([("Accept".to_string(), "application/json".to_string())])
}

/// Split a `"Key: value"` header on its first colon
pub fn parse_header(header: &str) -> Result<(String, String)> {
    let (key, value) = header.split_once(':').ok_or_else(|| Error::InvalidHeader {
        header: header.to_string(),
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidHeader {
            header: header.to_string(),
        });
    }

    Ok((key.to_string(), value.trim().to_string()))
}

/// Insert a header, replacing any existing one with the same name
///
/// Header names compare case-insensitively.
pub fn merge_header(headers: &mut StringMap, key: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
    headers.insert(key, value);
}
