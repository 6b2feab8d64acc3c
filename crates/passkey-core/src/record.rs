//! The durable passkey record

use serde::{Deserialize, Serialize};

use crate::encoding::b64_decode;
use crate::envelope::IV_LEN;
use crate::error::{PasskeyError, Result};

/// The persisted passkey bundle: public key, wrapped private key, and the
/// derivation inputs needed to recover the private key from a password
///
/// All fields are standard base64 strings. A record is created once at
/// password-set time and only read afterwards; replacing it is the
/// password-change flow's job. This subsystem never mutates a record in
/// place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasskeyRecord {
    /// SPKI-encoded public key
    pub public_key: String,

    /// AES-256-GCM ciphertext of the PKCS8-encoded private key, tag appended
    pub encrypted_private_key: String,

    /// PBKDF2 salt (16 bytes)
    pub salt: String,

    /// AES-GCM nonce used for the wrap (12 bytes)
    pub iv: String,
}

impl PasskeyRecord {
    /// Decode the salt field
    pub fn decode_salt(&self) -> Result<Vec<u8>> {
        b64_decode(&self.salt).map_err(|e| PasskeyError::KeyFormat(format!("invalid salt: {}", e)))
    }

    /// Decode the iv field (must be exactly 12 bytes)
    pub fn decode_iv(&self) -> Result<[u8; IV_LEN]> {
        let raw = b64_decode(&self.iv)
            .map_err(|e| PasskeyError::KeyFormat(format!("invalid iv: {}", e)))?;
        if raw.len() != IV_LEN {
            return Err(PasskeyError::KeyFormat(format!(
                "invalid iv length: expected {}, got {}",
                IV_LEN,
                raw.len()
            )));
        }

        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&raw);
        Ok(iv)
    }

    /// Serialize to the boundary JSON shape
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from the boundary JSON shape
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
