//! Error types for configuration loading and the debug utilities.

use serde::Serialize;
use std::fmt;

/// Failure to load a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Read(#[from] std::io::Error),

    /// Malformed YAML, bad encoding, or a root that is not a mapping.
    #[error("failed to decode configuration: {0}")]
    Decode(#[from] serde_yaml::Error),
}

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Input errors
    InvalidInput,
    DecodeFailed,
    ChecksumMismatch,

    // Not found errors
    BucketNotFound,
    RecordNotFound,

    // Internal errors
    StoreError,
    InternalError,
}

/// Structured error reported by the debug utilities.
#[derive(Debug, Serialize)]
pub struct DebugError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl DebugError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            details: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn invalid_input(field: &str, reason: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidInput, format!("invalid {}: {}", field, reason))
            .with_field(field)
    }

    pub fn decode_failed(what: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DecodeFailed, format!("failed to decode {}", what))
            .with_details(err.to_string())
    }

    pub fn checksum_mismatch(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ChecksumMismatch, "base58 checksum mismatch")
            .with_details(err.to_string())
    }

    pub fn bucket_not_found(bucket: &str) -> Self {
        Self::new(
            ErrorCode::BucketNotFound,
            format!("Bucket not found: {}", bucket),
        )
    }

    pub fn record_not_found(bucket: &str, key: &str) -> Self {
        Self::new(
            ErrorCode::RecordNotFound,
            format!("Record not found: {}/{}", bucket, key),
        )
    }

    pub fn store(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::StoreError, err.to_string())
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

impl fmt::Display for DebugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DebugError {}

impl From<rusqlite::Error> for DebugError {
    fn from(err: rusqlite::Error) -> Self {
        DebugError::store(err)
    }
}

// Allow using ? with anyhow errors by converting them
impl From<anyhow::Error> for DebugError {
    fn from(err: anyhow::Error) -> Self {
        // Try to downcast to DebugError first
        match err.downcast::<DebugError>() {
            Ok(debug_err) => debug_err,
            Err(err) => DebugError::internal(err),
        }
    }
}

/// Result type for utility operations.
pub type DebugResult<T> = std::result::Result<T, DebugError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_with_code() {
        let err = DebugError::record_not_found("audit", "job-7");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "RECORD_NOT_FOUND");
        assert_eq!(json["message"], "Record not found: audit/job-7");
        assert!(json.get("field").is_none());
    }

    #[test]
    fn test_display_includes_details() {
        let err = DebugError::decode_failed("audit history", "buffer underflow");
        assert_eq!(err.to_string(), "failed to decode audit history: buffer underflow");
    }

    #[test]
    fn test_anyhow_roundtrip_keeps_code() {
        let err: anyhow::Error = DebugError::bucket_not_found("missing").into();
        let back = DebugError::from(err);
        assert_eq!(back.code, ErrorCode::BucketNotFound);

        let other = DebugError::from(anyhow::anyhow!("boom"));
        assert_eq!(other.code, ErrorCode::InternalError);
    }
}
