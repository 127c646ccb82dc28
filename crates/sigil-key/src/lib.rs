//! # sigil-key
//!
//! 口令掩码的 P-256 密钥管理
//!
//! Private keys leave the process only as PKCS#8 DER XOR-ed with a
//! password-derived mask and wrapped in `PRIVATE KEY` armor. Public keys are
//! plain SPKI `PUBLIC KEY` armor. Signatures are base64 of the raw 64-byte
//! `r || s` form.

pub mod error;
pub mod manager;
pub mod mask;
pub mod pem;
pub mod provider;
pub mod request;
pub mod signer;

pub use error::{Error, Result};
pub use manager::{KeyManager, PrivateKeyOf, PublicKeyOf};
pub use mask::{derive_mask, Mask, MASK_ITERATIONS, MASK_SALT};
pub use pem::PemLabel;
pub use provider::{
    Algorithm, KeyHandle, KeyKind, KeyPair, KeyProvider, KeyUsages, SoftwarePrivateKey,
    SoftwareProvider, SoftwarePublicKey,
};
pub use request::{sign_request, verify_request, Action, RequestScope, SignedRequest};
pub use signer::{message_bytes, Signer};
