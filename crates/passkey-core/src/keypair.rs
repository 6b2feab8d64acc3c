//! RSA keypair generation and SPKI/PKCS8 serialization

use std::sync::Arc;

use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::encoding::{b64_decode, b64_encode};
use crate::error::{PasskeyError, Result};
use crate::provider::CryptoProvider;

/// An RSA-OAEP keypair
///
/// The public half is freely shareable; the private half must never be
/// persisted unwrapped.
#[derive(Clone)]
pub struct KeyPair {
    pub public: RsaPublicKey,
    pub private: RsaPrivateKey,
}

/// Generates RSA keypairs and converts them to and from their transport
/// encodings: SPKI for public keys, PKCS8 for private keys, both carried
/// as standard base64.
pub struct AsymmetricKeyService {
    provider: Arc<dyn CryptoProvider>,
}

impl AsymmetricKeyService {
    /// Create a new keypair service
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        Self { provider }
    }

    /// Generate a fresh 2048-bit RSA-OAEP keypair
    ///
    /// Each call draws from the provider's secure random source and yields
    /// a statistically independent keypair.
    pub fn generate_key_pair(&self) -> Result<KeyPair> {
        let (public, private) = self.provider.rsa_generate_keypair()?;
        Ok(KeyPair { public, private })
    }

    /// Encode a public key as base64 SPKI
    pub fn encode_public_key(&self, key: &RsaPublicKey) -> Result<String> {
        let der = key
            .to_public_key_der()
            .map_err(|e| PasskeyError::KeyFormat(e.to_string()))?;
        Ok(b64_encode(der.as_bytes()))
    }

    /// Decode a base64 SPKI public key
    pub fn decode_public_key(&self, encoded: &str) -> Result<RsaPublicKey> {
        let der = b64_decode(encoded).map_err(|e| PasskeyError::KeyFormat(e.to_string()))?;
        RsaPublicKey::from_public_key_der(&der).map_err(|e| PasskeyError::KeyFormat(e.to_string()))
    }

    /// Encode a private key as base64 PKCS8
    pub fn encode_private_key(&self, key: &RsaPrivateKey) -> Result<String> {
        let der = key
            .to_pkcs8_der()
            .map_err(|e| PasskeyError::KeyFormat(e.to_string()))?;
        Ok(b64_encode(der.as_bytes()))
    }

    /// Decode a base64 PKCS8 private key
    pub fn decode_private_key(&self, encoded: &str) -> Result<RsaPrivateKey> {
        let der = b64_decode(encoded).map_err(|e| PasskeyError::KeyFormat(e.to_string()))?;
        RsaPrivateKey::from_pkcs8_der(&der).map_err(|e| PasskeyError::KeyFormat(e.to_string()))
    }
}
