//! Crypto provider trait definition

use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::Result;

/// Trait for the underlying cryptographic primitives
///
/// Implementations must be stateless from the caller's perspective: no
/// retained session data between calls, safe to share across threads.
pub trait CryptoProvider: Send + Sync {
    /// Fill `buf` with cryptographically secure random bytes
    fn random_bytes(&self, buf: &mut [u8]);

    /// PBKDF2 with HMAC-SHA-256 and a 256-bit output
    fn pbkdf2_sha256(&self, password: &[u8], salt: &[u8], iterations: u32) -> [u8; 32];

    /// AES-256-GCM encryption; the 16-byte authentication tag is appended
    /// to the returned ciphertext
    fn aes_gcm_seal(&self, key: &[u8; 32], iv: &[u8; 12], plaintext: &[u8]) -> Result<Vec<u8>>;

    /// AES-256-GCM decryption of ciphertext||tag; tag verification failure
    /// is an error
    fn aes_gcm_open(&self, key: &[u8; 32], iv: &[u8; 12], ciphertext: &[u8]) -> Result<Vec<u8>>;

    /// Generate a fresh RSA keypair (2048-bit modulus, e = 65537)
    fn rsa_generate_keypair(&self) -> Result<(RsaPublicKey, RsaPrivateKey)>;

    /// RSA-OAEP encryption with SHA-256 padding
    fn rsa_oaep_encrypt(&self, public_key: &RsaPublicKey, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// RSA-OAEP decryption with SHA-256 padding
    fn rsa_oaep_decrypt(&self, private_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>>;
}
