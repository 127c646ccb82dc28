//! Text encodings used at the key-material boundaries

pub mod base64;
pub mod jwk;

pub use jwk::EcJwk;
