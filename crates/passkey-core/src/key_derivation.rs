//! Password-based key derivation using PBKDF2-HMAC-SHA-256

use std::sync::Arc;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{PasskeyError, Result};
use crate::provider::CryptoProvider;

/// Default PBKDF2 iteration count
pub const DEFAULT_ITERATIONS: u32 = 65_536;

/// Minimum accepted PBKDF2 iteration count
pub const MIN_ITERATIONS: u32 = 65_536;

/// Minimum accepted salt length in bytes
pub const MIN_SALT_LEN: usize = 16;

/// Parameters for PBKDF2 key derivation
#[derive(Debug, Clone)]
pub struct KdfParams {
    /// Iteration count (default: 65536)
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Derived 256-bit symmetric key - automatically zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: [u8; 32],
}

impl SymmetricKey {
    /// Create a symmetric key from raw bytes
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Get the key bytes (use carefully - avoid copying)
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }

    /// Create from a slice (must be exactly 32 bytes)
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != 32 {
            return None;
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(slice);
        Some(Self { key })
    }
}

impl Clone for SymmetricKey {
    fn clone(&self) -> Self {
        Self { key: self.key }
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derives symmetric keys from passwords
///
/// Pure over its inputs: identical (password, salt, iterations) always
/// yield the same key. Password correctness is not checkable here - a
/// wrong password derives a different key that fails the authenticated
/// unwrap downstream.
pub struct KeyDerivationService {
    provider: Arc<dyn CryptoProvider>,
}

impl KeyDerivationService {
    /// Create a new key derivation service
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        Self { provider }
    }

    /// Generate a random 16-byte salt
    ///
    /// A user's salt is generated once at enrollment and reused on every
    /// derivation for that user; regenerating it orphans the wrapped key.
    pub fn generate_salt(&self) -> Vec<u8> {
        let mut salt = vec![0u8; MIN_SALT_LEN];
        self.provider.random_bytes(&mut salt);
        salt
    }

    /// Derive a 256-bit key from a password and salt
    ///
    /// # Arguments
    /// * `password` - The user's password bytes
    /// * `salt` - Per-user salt, at least 16 bytes
    /// * `params` - Iteration count, at least 65536
    ///
    /// # Returns
    /// A 32-byte key suitable for AES-256-GCM
    pub fn derive_key(&self, password: &[u8], salt: &[u8], params: &KdfParams) -> Result<SymmetricKey> {
        if salt.len() < MIN_SALT_LEN {
            return Err(PasskeyError::KeyDerivation(format!(
                "salt must be at least {} bytes, got {}",
                MIN_SALT_LEN,
                salt.len()
            )));
        }
        if params.iterations < MIN_ITERATIONS {
            return Err(PasskeyError::KeyDerivation(format!(
                "iteration count {} is below the minimum of {}",
                params.iterations, MIN_ITERATIONS
            )));
        }

        let key = self.provider.pbkdf2_sha256(password, salt, params.iterations);
        Ok(SymmetricKey::new(key))
    }
}
