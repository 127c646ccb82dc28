//! # Sigil
//!
//! 口令保护的签名密钥
//!
//! ## 模块
//!
//! - `sigil_crypto` - 基础加密原语 (P-256, PBKDF2, Base64, JWK)
//! - `sigil_key` - PEM、掩码、密钥管理与签名
//!
//! The `sigil` binary lives in the `sigil-cli` crate.

pub use sigil_crypto;
pub use sigil_key;

pub use sigil_key::{KeyManager, Signer, SoftwareProvider};
