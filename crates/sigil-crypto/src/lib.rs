//! Sigil Cryptography Library
//!
//! Trusted primitives for the sigil key-management layer: P-256 ECDSA key
//! generation, PKCS#8 / SPKI / JWK codecs, PBKDF2-HMAC-SHA256 and base64.
//! Nothing here knows about PEM armor or password masks.

pub mod error;

pub mod asymmetric;
pub mod encoding;
pub mod kdf;

pub use asymmetric::p256::{self as ecdsa_p256, P256, SIGNATURE_LEN};
pub use encoding::EcJwk;
pub use kdf::{pbkdf2_sha256, Pbkdf2Params};

// Re-export the curve types handles are built on
pub use ::p256::PublicKey;
