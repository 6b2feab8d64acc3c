//! Private-key envelope: AES-256-GCM wrapping of PKCS8-encoded keys

use std::sync::Arc;

use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use crate::encoding::{b64_decode, b64_encode};
use crate::error::{PasskeyError, Result};
use crate::key_derivation::SymmetricKey;
use crate::provider::CryptoProvider;

/// AES-GCM nonce length in bytes (96 bits)
pub const IV_LEN: usize = 12;

/// Wraps and unwraps private keys under a password-derived symmetric key
///
/// The GCM authentication tag is the sole integrity check: a wrong key, a
/// wrong iv, and a flipped ciphertext bit all fail identically.
pub struct EnvelopeCipher {
    provider: Arc<dyn CryptoProvider>,
}

impl EnvelopeCipher {
    /// Create a new envelope cipher
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        Self { provider }
    }

    /// Generate a fresh random 12-byte iv
    ///
    /// Every wrap must consume a fresh iv. Reusing a salt+iv pair under
    /// the same password across two wraps voids the GCM guarantees.
    pub fn generate_iv(&self) -> [u8; IV_LEN] {
        let mut iv = [0u8; IV_LEN];
        self.provider.random_bytes(&mut iv);
        iv
    }

    /// Wrap a private key: PKCS8-encode, then seal under `key` and `iv`
    ///
    /// Returns base64 ciphertext with the 16-byte tag appended.
    /// Deterministic given identical inputs.
    pub fn wrap(
        &self,
        private_key: &RsaPrivateKey,
        key: &SymmetricKey,
        iv: &[u8; IV_LEN],
    ) -> Result<String> {
        let der = private_key
            .to_pkcs8_der()
            .map_err(|e| PasskeyError::KeyFormat(e.to_string()))?;
        let sealed = self.provider.aes_gcm_seal(key.as_bytes(), iv, der.as_bytes())?;
        Ok(b64_encode(&sealed))
    }

    /// Unwrap a private key previously produced by [`EnvelopeCipher::wrap`]
    ///
    /// Fails with the opaque [`PasskeyError::Wrap`] on any authentication
    /// or decode failure; callers cannot tell a wrong password from
    /// corrupted bytes.
    pub fn unwrap(
        &self,
        ciphertext: &str,
        key: &SymmetricKey,
        iv: &[u8; IV_LEN],
    ) -> Result<RsaPrivateKey> {
        let sealed = b64_decode(ciphertext).map_err(|_| PasskeyError::Wrap)?;
        let der = Zeroizing::new(
            self.provider
                .aes_gcm_open(key.as_bytes(), iv, &sealed)
                .map_err(|_| PasskeyError::Wrap)?,
        );
        RsaPrivateKey::from_pkcs8_der(&der).map_err(|_| PasskeyError::Wrap)
    }
}
