//! Pluggable cryptographic primitives
//!
//! The cipher components never touch a random source or a crypto crate
//! directly; everything goes through [`CryptoProvider`] so tests can swap
//! in deterministic randomness.

mod os;
mod seeded;
mod traits;

pub use os::OsCryptoProvider;
pub use seeded::SeededCryptoProvider;
pub use traits::CryptoProvider;
