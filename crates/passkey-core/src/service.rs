//! Passkey orchestration

use std::sync::Arc;

use tracing::{debug, info};

use crate::content::{ContentCipher, DecryptedContent};
use crate::encoding::b64_encode;
use crate::envelope::EnvelopeCipher;
use crate::error::{PasskeyError, Result};
use crate::key_derivation::{KdfParams, KeyDerivationService};
use crate::keypair::AsymmetricKeyService;
use crate::provider::{CryptoProvider, OsCryptoProvider};
use crate::record::PasskeyRecord;

/// Entry point composing the cipher components
///
/// Stateless: every call is a single-shot transform over its explicit
/// inputs, so one instance can serve arbitrarily many concurrent callers
/// without coordination.
pub struct PasskeyService {
    derivation: KeyDerivationService,
    keys: AsymmetricKeyService,
    envelope: EnvelopeCipher,
    content: ContentCipher,
}

impl PasskeyService {
    /// Create a service backed by the OS crypto provider
    pub fn new() -> Self {
        Self::with_provider(Arc::new(OsCryptoProvider::new()))
    }

    /// Create a service with a custom crypto provider
    pub fn with_provider(provider: Arc<dyn CryptoProvider>) -> Self {
        Self {
            derivation: KeyDerivationService::new(provider.clone()),
            keys: AsymmetricKeyService::new(provider.clone()),
            envelope: EnvelopeCipher::new(provider.clone()),
            content: ContentCipher::new(provider),
        }
    }

    /// Enroll a user: generate a keypair and wrap its private half under
    /// the password
    ///
    /// Returns the record for the caller to persist. The password never
    /// outlives this call.
    pub fn enroll(&self, password: &str) -> Result<PasskeyRecord> {
        let salt = self.derivation.generate_salt();
        let key = self
            .derivation
            .derive_key(password.as_bytes(), &salt, &KdfParams::default())?;

        let pair = self.keys.generate_key_pair()?;
        let iv = self.envelope.generate_iv();
        let encrypted_private_key = self.envelope.wrap(&pair.private, &key, &iv)?;

        let record = PasskeyRecord {
            public_key: self.keys.encode_public_key(&pair.public)?,
            encrypted_private_key,
            salt: b64_encode(&salt),
            iv: b64_encode(&iv),
        };

        info!("Enrolled new passkey record");
        Ok(record)
    }

    /// Encrypt a content item against the record's public key
    pub fn encrypt_content(&self, record: &PasskeyRecord, plaintext: &[u8]) -> Result<String> {
        self.content.encrypt_content(record, plaintext)
    }

    /// Decrypt a content item with the password and the record
    pub fn decrypt_content(
        &self,
        record: &PasskeyRecord,
        password: &str,
        ciphertext: &str,
    ) -> Result<DecryptedContent> {
        self.content.decrypt_content(record, password, ciphertext)
    }

    /// Re-wrap the private key under a new password
    ///
    /// Unwraps with the old password, then derives a key from a fresh
    /// salt and wraps again under a fresh iv. The keypair itself is
    /// unchanged, so existing content stays decryptable. Returns the
    /// replacement record; the caller persists it over the old one.
    pub fn change_password(
        &self,
        record: &PasskeyRecord,
        old_password: &str,
        new_password: &str,
    ) -> Result<PasskeyRecord> {
        let salt = record.decode_salt()?;
        let iv = record.decode_iv()?;

        let old_key = self
            .derivation
            .derive_key(old_password.as_bytes(), &salt, &KdfParams::default())?;
        let private = self
            .envelope
            .unwrap(&record.encrypted_private_key, &old_key, &iv)
            .map_err(|_| PasskeyError::DecryptionFailed)?;

        let new_salt = self.derivation.generate_salt();
        let new_key = self
            .derivation
            .derive_key(new_password.as_bytes(), &new_salt, &KdfParams::default())?;
        let new_iv = self.envelope.generate_iv();
        let encrypted_private_key = self.envelope.wrap(&private, &new_key, &new_iv)?;

        debug!("Re-wrapped private key under new password");
        Ok(PasskeyRecord {
            public_key: record.public_key.clone(),
            encrypted_private_key,
            salt: b64_encode(&new_salt),
            iv: b64_encode(&new_iv),
        })
    }
}

impl Default for PasskeyService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::provider::SeededCryptoProvider;

    fn seeded_service(seed: u64) -> PasskeyService {
        PasskeyService::with_provider(Arc::new(SeededCryptoProvider::from_seed(seed)))
    }

    fn enrolled() -> &'static (PasskeyService, PasskeyRecord) {
        static STATE: OnceLock<(PasskeyService, PasskeyRecord)> = OnceLock::new();
        STATE.get_or_init(|| {
            let service = seeded_service(21);
            let record = service.enroll("correct-horse").unwrap();
            (service, record)
        })
    }

    #[test]
    fn test_enroll_then_decrypt() {
        let (service, record) = enrolled();

        let ciphertext = service.encrypt_content(record, b"hello").unwrap();
        let plaintext = service
            .decrypt_content(record, "correct-horse", &ciphertext)
            .unwrap();

        assert_eq!(plaintext.expose(), "hello");
    }

    #[test]
    fn test_wrong_password_fails_with_umbrella_error() {
        let (service, record) = enrolled();

        let ciphertext = service.encrypt_content(record, b"hello").unwrap();
        let result = service.decrypt_content(record, "wrong-pass", &ciphertext);

        assert!(matches!(result, Err(PasskeyError::DecryptionFailed)));
    }

    #[test]
    fn test_record_fields_are_base64() {
        let (_, record) = enrolled();

        assert_eq!(record.decode_salt().unwrap().len(), 16);
        assert_eq!(record.decode_iv().unwrap().len(), 12);
        assert!(!record.public_key.is_empty());
        assert!(!record.encrypted_private_key.is_empty());
    }

    #[test]
    fn test_change_password() {
        let (service, record) = enrolled();

        let ciphertext = service.encrypt_content(record, b"carried over").unwrap();
        let new_record = service
            .change_password(record, "correct-horse", "battery-staple")
            .unwrap();

        // same keypair, so old content decrypts under the new password
        assert_eq!(new_record.public_key, record.public_key);
        let plaintext = service
            .decrypt_content(&new_record, "battery-staple", &ciphertext)
            .unwrap();
        assert_eq!(plaintext.expose(), "carried over");

        // the old password no longer opens the new record
        assert!(matches!(
            service.decrypt_content(&new_record, "correct-horse", &ciphertext),
            Err(PasskeyError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_change_password_uses_fresh_salt_and_iv() {
        let (service, record) = enrolled();

        let new_record = service
            .change_password(record, "correct-horse", "battery-staple")
            .unwrap();

        assert_ne!(new_record.salt, record.salt);
        assert_ne!(new_record.iv, record.iv);
    }

    #[test]
    fn test_change_password_rejects_wrong_old_password() {
        let (service, record) = enrolled();

        assert!(matches!(
            service.change_password(record, "wrong-pass", "battery-staple"),
            Err(PasskeyError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_same_seed_reproduces_record() {
        let record_a = seeded_service(99).enroll("correct-horse").unwrap();
        let record_b = seeded_service(99).enroll("correct-horse").unwrap();

        assert_eq!(record_a.public_key, record_b.public_key);
        assert_eq!(record_a.encrypted_private_key, record_b.encrypted_private_key);
        assert_eq!(record_a.salt, record_b.salt);
        assert_eq!(record_a.iv, record_b.iv);
    }
}
