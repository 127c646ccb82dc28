//! Detached ECDSA P-256 / SHA-256 signatures
//!
//! Signatures travel as standard base64 of the raw 64-byte `r || s` form.
//! Text messages are turned into bytes by [`message_bytes`], which keeps one
//! byte per UTF-16 code unit and drops the high byte. Characters above
//! U+00FF therefore do not survive; existing signatures depend on it.

use sigil_crypto::encoding::base64;

use crate::{
    error::Result,
    manager::{PrivateKeyOf, PublicKeyOf},
    provider::{KeyProvider, SoftwareProvider},
};

/// One byte per UTF-16 code unit, high byte discarded
pub fn message_bytes(text: &str) -> Vec<u8> {
    text.encode_utf16().map(|unit| unit as u8).collect()
}

#[derive(Clone, Debug, Default)]
pub struct Signer<P = SoftwareProvider> {
    provider: P,
}

impl<P: KeyProvider> Signer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Sign `message` and return the base64 signature
    pub fn sign(&self, key: &PrivateKeyOf<P>, message: &[u8]) -> Result<String> {
        let signature = self.provider.sign(key, message)?;
        tracing::trace!(message_len = message.len(), "signed message");
        Ok(base64::encode(signature))
    }

    /// [`Signer::sign`] over [`message_bytes`] of `text`
    pub fn sign_text(&self, key: &PrivateKeyOf<P>, text: &str) -> Result<String> {
        self.sign(key, &message_bytes(text))
    }

    /// Check a base64 signature
    ///
    /// A signature that is not base64, has the wrong length or does not
    /// match is `Ok(false)`. `Err` means the key itself cannot verify.
    pub fn verify(&self, key: &PublicKeyOf<P>, message: &[u8], signature: &str) -> Result<bool> {
        let raw = match base64::decode(signature.trim()) {
            Ok(raw) => raw,
            Err(_) => return Ok(false),
        };
        self.provider.verify(key, message, &raw)
    }

    pub fn verify_text(&self, key: &PublicKeyOf<P>, text: &str, signature: &str) -> Result<bool> {
        self.verify(key, &message_bytes(text), signature)
    }
}
