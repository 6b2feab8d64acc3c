//! # passkey-core
//!
//! Client-side passkey envelope encryption:
//! - PBKDF2-HMAC-SHA-256 derivation of symmetric keys from passwords
//! - RSA-OAEP (2048-bit, SHA-256) keypairs for content encryption
//! - AES-256-GCM wrapping of the private key under the password-derived key
//! - Zeroize-on-drop handling for keys and decrypted plaintext
//!
//! The private key only ever leaves the trust boundary wrapped inside a
//! [`PasskeyRecord`]; the password recovers it on demand and is itself
//! never stored. Persistence of records and transport of ciphertexts are
//! the caller's concern.

pub mod content;
mod encoding;
pub mod envelope;
pub mod error;
pub mod key_derivation;
pub mod keypair;
pub mod provider;
pub mod record;
mod service;

pub use content::{ContentCipher, DecryptedContent};
pub use envelope::{EnvelopeCipher, IV_LEN};
pub use error::{PasskeyError, Result};
pub use key_derivation::{KdfParams, KeyDerivationService, SymmetricKey, DEFAULT_ITERATIONS};
pub use keypair::{AsymmetricKeyService, KeyPair};
pub use provider::{CryptoProvider, OsCryptoProvider, SeededCryptoProvider};
pub use record::PasskeyRecord;
pub use service::PasskeyService;
