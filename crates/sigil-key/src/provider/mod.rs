//! Cryptographic provider abstraction
//!
//! Key handles are opaque: callers see the kind, algorithm, usages and
//! whether a key may be exported, never the key material itself. All access
//! goes through a [`KeyProvider`], so a hardware-backed provider can replace
//! [`SoftwareProvider`] without touching the manager or signer.

mod software;

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use sigil_crypto::{EcJwk, Pbkdf2Params};
use zeroize::Zeroizing;

pub use software::{SoftwarePrivateKey, SoftwareProvider, SoftwarePublicKey};

use crate::error::Result;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// ECDSA over NIST P-256, SHA-256 message digest
    EcdsaP256,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::EcdsaP256 => "ECDSA P-256",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    Public,
    Private,
}

/// Set of operations a key may be used for
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct KeyUsages(u8);

impl KeyUsages {
    pub const NONE: Self = Self(0);
    pub const SIGN: Self = Self(1);
    pub const VERIFY: Self = Self(1 << 1);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn can_sign(self) -> bool {
        self.contains(Self::SIGN)
    }

    pub fn can_verify(self) -> bool {
        self.contains(Self::VERIFY)
    }

    /// WebCrypto `key_ops` names
    pub fn key_ops(self) -> Vec<String> {
        let mut ops = Vec::new();
        if self.can_sign() {
            ops.push("sign".to_string());
        }
        if self.can_verify() {
            ops.push("verify".to_string());
        }
        ops
    }
}

impl fmt::Debug for KeyUsages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.key_ops()).finish()
    }
}

/// Opaque reference to a key held by a provider
pub trait KeyHandle: Send + Sync {
    fn kind(&self) -> KeyKind;

    fn algorithm(&self) -> Algorithm;

    fn usages(&self) -> KeyUsages;

    fn extractable(&self) -> bool;
}

/// Freshly generated key pair
#[derive(Debug)]
pub struct KeyPair<Pub, Priv> {
    pub public_key: Pub,
    pub private_key: Priv,
}

/// The trusted primitive set the key manager and signer are built on
pub trait KeyProvider: Send + Sync {
    type PrivateKey: KeyHandle;
    type PublicKey: KeyHandle;

    /// Generate an ECDSA P-256 key pair; the private half gets `usages`
    fn generate_key_pair(
        &self,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<KeyPair<Self::PublicKey, Self::PrivateKey>>;

    /// Import PKCS#8 DER as an ECDSA P-256 private key
    fn import_pkcs8_der(
        &self,
        der: &[u8],
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::PrivateKey>;

    fn export_pkcs8_der(&self, key: &Self::PrivateKey) -> Result<Zeroizing<Vec<u8>>>;

    /// Export a private key as a JWK carrying `d` and `key_ops`
    fn export_jwk(&self, key: &Self::PrivateKey) -> Result<EcJwk>;

    /// Import the public half of a JWK; a `d` member is rejected
    fn import_public_jwk(
        &self,
        jwk: &EcJwk,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::PublicKey>;

    fn import_spki_der(
        &self,
        der: &[u8],
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::PublicKey>;

    fn export_spki_der(&self, key: &Self::PublicKey) -> Result<Vec<u8>>;

    /// PBKDF2 over `password`; `bit_len` must be a multiple of 8
    fn derive_bits(
        &self,
        password: &[u8],
        params: &Pbkdf2Params<'_>,
        bit_len: u32,
    ) -> Result<Zeroizing<Vec<u8>>>;

    /// ECDSA/SHA-256, raw `r || s` output
    fn sign(&self, key: &Self::PrivateKey, data: &[u8]) -> Result<Vec<u8>>;

    /// `Ok(false)` for a signature that does not verify, `Err` only when
    /// the key cannot be used for verification
    fn verify(&self, key: &Self::PublicKey, data: &[u8], signature: &[u8]) -> Result<bool>;
}

impl<T: KeyProvider> KeyProvider for Arc<T> {
    type PrivateKey = T::PrivateKey;
    type PublicKey = T::PublicKey;

    fn generate_key_pair(
        &self,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<KeyPair<Self::PublicKey, Self::PrivateKey>> {
        (**self).generate_key_pair(extractable, usages)
    }

    fn import_pkcs8_der(
        &self,
        der: &[u8],
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::PrivateKey> {
        (**self).import_pkcs8_der(der, extractable, usages)
    }

    fn export_pkcs8_der(&self, key: &Self::PrivateKey) -> Result<Zeroizing<Vec<u8>>> {
        (**self).export_pkcs8_der(key)
    }

    fn export_jwk(&self, key: &Self::PrivateKey) -> Result<EcJwk> {
        (**self).export_jwk(key)
    }

    fn import_public_jwk(
        &self,
        jwk: &EcJwk,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::PublicKey> {
        (**self).import_public_jwk(jwk, extractable, usages)
    }

    fn import_spki_der(
        &self,
        der: &[u8],
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::PublicKey> {
        (**self).import_spki_der(der, extractable, usages)
    }

    fn export_spki_der(&self, key: &Self::PublicKey) -> Result<Vec<u8>> {
        (**self).export_spki_der(key)
    }

    fn derive_bits(
        &self,
        password: &[u8],
        params: &Pbkdf2Params<'_>,
        bit_len: u32,
    ) -> Result<Zeroizing<Vec<u8>>> {
        (**self).derive_bits(password, params, bit_len)
    }

    fn sign(&self, key: &Self::PrivateKey, data: &[u8]) -> Result<Vec<u8>> {
        (**self).sign(key, data)
    }

    fn verify(&self, key: &Self::PublicKey, data: &[u8], signature: &[u8]) -> Result<bool> {
        (**self).verify(key, data, signature)
    }
}
