//! Base64 helpers for boundary values
//!
//! Every binary value that crosses the subsystem boundary (salts, ivs,
//! ciphertexts, encoded keys) uses standard base64 with padding - no
//! URL-safe variant.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode bytes as standard base64
pub(crate) fn b64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64
pub(crate) fn b64_decode(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let data = b"binary \x00\xff data";
        let encoded = b64_encode(data);
        assert_eq!(b64_decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_standard_alphabet_with_padding() {
        // 0xfb 0xef maps to "++8=" in the standard alphabet ("--8" would be URL-safe)
        assert_eq!(b64_encode(&[0xfb, 0xef]), "++8=");
    }

    #[test]
    fn test_rejects_urlsafe_input() {
        assert!(b64_decode("-_8=").is_err());
    }
}
