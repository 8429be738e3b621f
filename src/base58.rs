//! Hex to Base58Check conversion.
//!
//! Base58Check appends the first four bytes of a double SHA-256 of the
//! payload before encoding. An optional version byte is prepended to the
//! payload and verified on decode.

use crate::audit::parse_hex;
use crate::error::{DebugError, DebugResult};

/// Encode a hex payload as Base58Check.
pub fn encode_check(hex_payload: &str, version: Option<u8>) -> DebugResult<String> {
    let payload = parse_hex(hex_payload)?;
    let versioned: Vec<u8> = version.into_iter().chain(payload).collect();
    Ok(bs58::encode(versioned).with_check().into_string())
}

/// Decode Base58Check text into its payload bytes.
///
/// With `version` set, the leading byte must match it and is stripped.
pub fn decode_check(input: &str, version: Option<u8>) -> DebugResult<Vec<u8>> {
    let mut bytes = bs58::decode(input.trim())
        .with_check(None)
        .into_vec()
        .map_err(|e| match e {
            bs58::decode::Error::InvalidChecksum { .. } => DebugError::checksum_mismatch(e),
            other => DebugError::invalid_input("base58", other),
        })?;

    if let Some(expected) = version {
        match bytes.first() {
            Some(&found) if found == expected => {
                bytes.remove(0);
            }
            Some(&found) => {
                return Err(DebugError::invalid_input(
                    "version",
                    format!("expected 0x{:02x}, found 0x{:02x}", expected, found),
                ));
            }
            None => return Err(DebugError::invalid_input("version", "empty payload")),
        }
    }

    Ok(bytes)
}

/// Decode Base58Check text and render the payload as lowercase hex.
pub fn decode_check_hex(input: &str, version: Option<u8>) -> DebugResult<String> {
    decode_check(input, version).map(hex::encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const ADDRESS: &str = "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs";
    const HASH160: &str = "f54a5851e9372b87810a8e60cdd2e7cfd80b6e31";

    #[test]
    fn test_encode_short_payload() {
        assert_eq!(encode_check("2d31", None).unwrap(), "PWEu9GGN");
    }

    #[test]
    fn test_encode_address_with_version() {
        assert_eq!(encode_check(HASH160, Some(0)).unwrap(), ADDRESS);
        assert_eq!(encode_check(&format!("0x00{HASH160}"), None).unwrap(), ADDRESS);
    }

    #[test]
    fn test_decode_address() {
        assert_eq!(decode_check_hex(ADDRESS, Some(0)).unwrap(), HASH160);
        assert_eq!(decode_check_hex(ADDRESS, None).unwrap(), format!("00{HASH160}"));
    }

    #[test]
    fn test_wrong_version_is_rejected() {
        let err = decode_check(ADDRESS, Some(5)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.field.as_deref(), Some("version"));
    }

    #[test]
    fn test_checksum_mismatch() {
        // Last character altered.
        let err = decode_check("1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAt", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ChecksumMismatch);
    }

    #[test]
    fn test_invalid_characters() {
        let err = decode_check("0OIl", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_invalid_hex_input() {
        let err = encode_check("abc", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
