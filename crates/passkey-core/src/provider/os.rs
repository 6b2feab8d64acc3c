//! Default provider backed by OS randomness and the RustCrypto primitives

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use super::traits::CryptoProvider;
use crate::error::{PasskeyError, Result};

/// RSA modulus size in bits
pub(crate) const RSA_KEY_BITS: usize = 2048;

/// Crypto provider using the operating system's random source
#[derive(Debug, Default, Clone, Copy)]
pub struct OsCryptoProvider;

impl OsCryptoProvider {
    /// Create a new OS-backed provider
    pub fn new() -> Self {
        Self
    }
}

impl CryptoProvider for OsCryptoProvider {
    fn random_bytes(&self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }

    fn pbkdf2_sha256(&self, password: &[u8], salt: &[u8], iterations: u32) -> [u8; 32] {
        let mut key = [0u8; 32];
        pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
        key
    }

    fn aes_gcm_seal(&self, key: &[u8; 32], iv: &[u8; 12], plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher =
            Aes256Gcm::new_from_slice(key).map_err(|e| PasskeyError::Crypto(e.to_string()))?;
        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| PasskeyError::Crypto(e.to_string()))
    }

    fn aes_gcm_open(&self, key: &[u8; 32], iv: &[u8; 12], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher =
            Aes256Gcm::new_from_slice(key).map_err(|e| PasskeyError::Crypto(e.to_string()))?;
        cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|e| PasskeyError::Crypto(e.to_string()))
    }

    fn rsa_generate_keypair(&self) -> Result<(RsaPublicKey, RsaPrivateKey)> {
        let private = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
            .map_err(|e| PasskeyError::Crypto(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        Ok((public, private))
    }

    fn rsa_oaep_encrypt(&self, public_key: &RsaPublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
        public_key
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext)
            .map_err(|e| PasskeyError::Crypto(e.to_string()))
    }

    fn rsa_oaep_decrypt(&self, private_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        private_key
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map_err(|e| PasskeyError::Crypto(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes_differ() {
        let provider = OsCryptoProvider::new();
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        provider.random_bytes(&mut a);
        provider.random_bytes(&mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_pbkdf2_known_vector() {
        // PBKDF2-HMAC-SHA-256("password", "salt", 1 iteration)
        let expected: [u8; 32] = [
            0x12, 0x0f, 0xb6, 0xcf, 0xfc, 0xf8, 0xb3, 0x2c, 0x43, 0xe7, 0x22, 0x52, 0x56, 0xc4,
            0xf8, 0x37, 0xa8, 0x65, 0x48, 0xc9, 0x2c, 0xcc, 0x35, 0x48, 0x08, 0x05, 0x98, 0x7c,
            0xb7, 0x0b, 0xe1, 0x7b,
        ];
        let provider = OsCryptoProvider::new();
        assert_eq!(provider.pbkdf2_sha256(b"password", b"salt", 1), expected);
    }

    #[test]
    fn test_aes_gcm_seal_open_round_trip() {
        let provider = OsCryptoProvider::new();
        let key = [7u8; 32];
        let iv = [3u8; 12];

        let sealed = provider.aes_gcm_seal(&key, &iv, b"plaintext").unwrap();
        // ciphertext plus 16-byte tag
        assert_eq!(sealed.len(), b"plaintext".len() + 16);

        let opened = provider.aes_gcm_open(&key, &iv, &sealed).unwrap();
        assert_eq!(opened, b"plaintext");
    }

    #[test]
    fn test_aes_gcm_open_rejects_tampering() {
        let provider = OsCryptoProvider::new();
        let key = [7u8; 32];
        let iv = [3u8; 12];

        let mut sealed = provider.aes_gcm_seal(&key, &iv, b"plaintext").unwrap();
        sealed[0] ^= 0xff;

        assert!(provider.aes_gcm_open(&key, &iv, &sealed).is_err());
    }
}
