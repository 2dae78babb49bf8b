//! Hex encoding/decoding utilities.

use crate::error::ParseError;

/// Strip an optional `0x`/`0X` prefix.
pub fn strip_0x(raw: &str) -> Option<&str> {
    raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))
}

pub fn hex_encode(bytes: &[u8]) -> String {
    format!("0x{}", ::hex::encode(bytes))
}

/// Decode hex digits (no prefix). Odd lengths are rejected.
pub fn hex_decode(digits: &str) -> Result<Vec<u8>, ParseError> {
    ::hex::decode(digits).map_err(|e| ParseError::InvalidHex {
        raw: digits.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_prefixed_lowercase() {
        assert_eq!(hex_encode(&[0xAB, 0x01]), "0xab01");
        assert_eq!(hex_encode(&[]), "0x");
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        assert_eq!(hex_decode("ABCD").unwrap(), [0xab, 0xcd]);
        assert!(hex_decode("abc").is_err());
        assert!(matches!(hex_decode("zz"), Err(ParseError::InvalidHex { .. })));
    }
}
