//! Content encryption under the passkey keypair

use std::sync::Arc;

use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{b64_decode, b64_encode};
use crate::envelope::EnvelopeCipher;
use crate::error::{PasskeyError, Result};
use crate::key_derivation::{KdfParams, KeyDerivationService};
use crate::keypair::AsymmetricKeyService;
use crate::provider::CryptoProvider;
use crate::record::PasskeyRecord;

/// OAEP overhead for SHA-256: two hash outputs plus two bytes
const OAEP_OVERHEAD: usize = 2 * 32 + 2;

/// Decrypted content item - automatically zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DecryptedContent {
    value: String,
}

impl DecryptedContent {
    /// Wrap a decrypted value
    pub fn new(value: String) -> Self {
        Self { value }
    }

    /// Get the plaintext (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Consume and return the inner value
    pub fn into_inner(mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

impl std::fmt::Debug for DecryptedContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptedContent")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Encrypts and decrypts content items under the passkey keypair and runs
/// the password-based decryption flow end to end
pub struct ContentCipher {
    provider: Arc<dyn CryptoProvider>,
    derivation: KeyDerivationService,
    envelope: EnvelopeCipher,
    keys: AsymmetricKeyService,
}

impl ContentCipher {
    /// Create a new content cipher
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        Self {
            derivation: KeyDerivationService::new(provider.clone()),
            envelope: EnvelopeCipher::new(provider.clone()),
            keys: AsymmetricKeyService::new(provider.clone()),
            provider,
        }
    }

    /// Maximum plaintext size in bytes for a single OAEP block under `public_key`
    ///
    /// 190 bytes for a 2048-bit modulus with SHA-256 padding.
    pub fn max_plaintext_len(public_key: &RsaPublicKey) -> usize {
        public_key.size().saturating_sub(OAEP_OVERHEAD)
    }

    /// RSA-OAEP-encrypt a content item under the public key
    ///
    /// The plaintext must fit in a single OAEP block; larger payloads must
    /// be split by the caller.
    pub fn encrypt(&self, plaintext: &[u8], public_key: &RsaPublicKey) -> Result<String> {
        let max = Self::max_plaintext_len(public_key);
        if plaintext.len() > max {
            return Err(PasskeyError::PayloadTooLarge {
                size: plaintext.len(),
                max,
            });
        }

        let ciphertext = self.provider.rsa_oaep_encrypt(public_key, plaintext)?;
        Ok(b64_encode(&ciphertext))
    }

    /// Encrypt a content item against a record's public key
    pub fn encrypt_content(&self, record: &PasskeyRecord, plaintext: &[u8]) -> Result<String> {
        let public_key = self.keys.decode_public_key(&record.public_key)?;
        self.encrypt(plaintext, &public_key)
    }

    /// RSA-OAEP-decrypt a content item with the private key
    pub fn decrypt(&self, ciphertext: &str, private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
        let raw = b64_decode(ciphertext).map_err(|_| PasskeyError::Decryption)?;
        self.provider
            .rsa_oaep_decrypt(private_key, &raw)
            .map_err(|_| PasskeyError::Decryption)
    }

    /// Decrypt a content item end to end from a passkey record and password
    ///
    /// Derives the symmetric key from the record's salt, unwraps the
    /// private key with the record's iv, and decrypts the target
    /// ciphertext. Every failure past record decoding collapses into
    /// [`PasskeyError::DecryptionFailed`] so callers cannot tell a wrong
    /// password from corrupt data.
    pub fn decrypt_content(
        &self,
        record: &PasskeyRecord,
        password: &str,
        ciphertext: &str,
    ) -> Result<DecryptedContent> {
        let salt = record.decode_salt()?;
        let iv = record.decode_iv()?;

        self.run_decryption(record, password, &salt, &iv, ciphertext)
            .map_err(|_| PasskeyError::DecryptionFailed)
    }

    fn run_decryption(
        &self,
        record: &PasskeyRecord,
        password: &str,
        salt: &[u8],
        iv: &[u8; 12],
        ciphertext: &str,
    ) -> Result<DecryptedContent> {
        let key = self
            .derivation
            .derive_key(password.as_bytes(), salt, &KdfParams::default())?;
        let private_key = self.envelope.unwrap(&record.encrypted_private_key, &key, iv)?;
        let plaintext = self.decrypt(ciphertext, &private_key)?;

        let text = String::from_utf8(plaintext).map_err(|_| PasskeyError::DecryptionFailed)?;
        Ok(DecryptedContent::new(text))
    }
}
