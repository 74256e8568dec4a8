// Structural validation capability for request inputs.

use std::fmt;

use serde::Serialize;

/// Why an input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "cannot be blank")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Implemented by every creation/update input.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Fail with [`ValidationError::required`] when `value` is blank.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(())
    }
}

/// Like [`require`], for optional update fields: absent is fine, blank is not.
pub fn require_if_set(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| require(field, v))
}

/// Object-safe view of a JSON request body.
///
/// Blanket-implemented for every `Validate + Serialize` type so request
/// specs can hold inputs without being generic over them.
pub trait Input: Validate + Sync {
    fn encode_json(&self) -> Result<Vec<u8>, serde_json::Error>;
}

impl<T: Validate + Serialize + Sync> Input for T {
    fn encode_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
