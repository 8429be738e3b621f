//! Audit-history blob decoding.
//!
//! An audit history is a protobuf `AuditHistory` message, optionally
//! gzip-compressed, and usually handed around as hex or base64 text.

use crate::error::{DebugError, DebugResult};
use base64::{Engine, engine::general_purpose::STANDARD};
use clap::ValueEnum;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Read;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Ordered list of audit entries.
#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct AuditHistory {
    #[prost(message, repeated, tag = "1")]
    pub entries: Vec<AuditEntry>,
}

/// A single recorded action.
#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct AuditEntry {
    /// Milliseconds since the Unix epoch.
    #[prost(int64, tag = "1")]
    pub timestamp_ms: i64,
    #[prost(string, tag = "2")]
    pub actor: String,
    #[prost(string, tag = "3")]
    pub action: String,
    #[prost(btree_map = "string, string", tag = "4")]
    pub fields: BTreeMap<String, String>,
}

impl AuditEntry {
    /// RFC 3339 rendering of the timestamp, if it is in range.
    pub fn time_rfc3339(&self) -> Option<String> {
        chrono::DateTime::from_timestamp_millis(self.timestamp_ms)
            .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
    }
}

/// Textual form of a blob given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BlobEncoding {
    /// Hexadecimal, with or without a 0x prefix
    #[default]
    Hex,
    /// Standard base64
    Base64,
    /// The string's own bytes
    Raw,
}

/// Turn blob text into bytes.
pub fn decode_text(blob: &str, encoding: BlobEncoding) -> DebugResult<Vec<u8>> {
    match encoding {
        BlobEncoding::Hex => parse_hex(blob),
        BlobEncoding::Base64 => {
            let compact: String = blob.split_whitespace().collect();
            STANDARD
                .decode(compact)
                .map_err(|e| DebugError::invalid_input("base64", e))
        }
        BlobEncoding::Raw => Ok(blob.as_bytes().to_vec()),
    }
}

/// Parse hex text, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(text: &str) -> DebugResult<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits).map_err(|e| DebugError::invalid_input("hex", e))
}

/// Decode an audit history, inflating gzip payloads first.
pub fn decode_history(bytes: &[u8]) -> DebugResult<AuditHistory> {
    let payload = inflate_if_gzip(bytes)?;
    let history = <AuditHistory as prost::Message>::decode(payload.as_ref())
        .map_err(|e| DebugError::decode_failed("audit history", e))?;
    tracing::debug!(
        entries = history.entries.len(),
        bytes = payload.len(),
        "Decoded audit history"
    );
    Ok(history)
}

fn inflate_if_gzip(bytes: &[u8]) -> DebugResult<Cow<'_, [u8]>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(Cow::Borrowed(bytes));
    }

    let mut inflated = Vec::new();
    flate2::read::GzDecoder::new(bytes)
        .read_to_end(&mut inflated)
        .map_err(|e| DebugError::decode_failed("gzip payload", e))?;
    Ok(Cow::Owned(inflated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use prost::Message;
    use std::io::Write;

    fn sample_history() -> AuditHistory {
        AuditHistory {
            entries: vec![
                AuditEntry {
                    timestamp_ms: 1_700_000_000_000,
                    actor: "alice".to_string(),
                    action: "create".to_string(),
                    fields: BTreeMap::from([("bucket".to_string(), "jobs".to_string())]),
                },
                AuditEntry {
                    timestamp_ms: 1_700_000_060_000,
                    actor: "bob".to_string(),
                    action: "delete".to_string(),
                    fields: BTreeMap::new(),
                },
            ],
        }
    }

    #[test]
    fn test_decode_plain_history() {
        let bytes = sample_history().encode_to_vec();
        let decoded = decode_history(&bytes).unwrap();
        assert_eq!(decoded, sample_history());
    }

    #[test]
    fn test_decode_gzip_history() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&sample_history().encode_to_vec())
            .unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(decode_history(&compressed).unwrap(), sample_history());
    }

    #[test]
    fn test_empty_blob_is_empty_history() {
        assert!(decode_history(&[]).unwrap().entries.is_empty());
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = decode_history(&[0x0a, 0xff, 0xff]).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::DecodeFailed);
    }

    #[test]
    fn test_decode_text_encodings() {
        assert_eq!(decode_text("0x0a 0b", BlobEncoding::Hex).unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode_text("CgsM", BlobEncoding::Base64).unwrap(), vec![0x0a, 0x0b, 0x0c]);
        assert_eq!(decode_text("ab", BlobEncoding::Raw).unwrap(), b"ab".to_vec());

        let err = decode_text("zz", BlobEncoding::Hex).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("hex"));
    }

    #[test]
    fn test_time_rendering() {
        let entry = &sample_history().entries[0];
        assert_eq!(entry.time_rfc3339().as_deref(), Some("2023-11-14T22:13:20.000Z"));
    }
}
