//! Error types for passkey-core

use thiserror::Error;

/// Result type alias for passkey operations
pub type Result<T> = std::result::Result<T, PasskeyError>;

/// Passkey error types
#[derive(Error, Debug)]
pub enum PasskeyError {
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Invalid key encoding: {0}")]
    KeyFormat(String),

    /// Unwrap failure. Deliberately opaque: wrong password, wrong iv, and
    /// tampered ciphertext must be indistinguishable to callers.
    #[error("Unable to unwrap private key")]
    Wrap,

    #[error("Plaintext is {size} bytes but at most {max} bytes fit in one RSA-OAEP block")]
    PayloadTooLarge { size: usize, max: usize },

    /// RSA-OAEP decryption failure. Deliberately opaque.
    #[error("Content decryption failed")]
    Decryption,

    /// Umbrella failure for the password-based decryption flow. Collapses
    /// every sub-step failure so callers cannot probe which one occurred.
    #[error("Password mismatch or corrupt data")]
    DecryptionFailed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Crypto error: {0}")]
    Crypto(String),
}
