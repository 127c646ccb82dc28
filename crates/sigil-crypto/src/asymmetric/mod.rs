//! Asymmetric cryptography algorithms
//!
//! Only ECDSA over NIST P-256 with SHA-256 is provided.

pub mod p256;

pub use self::p256::P256;
