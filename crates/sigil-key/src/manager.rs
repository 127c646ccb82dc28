//! Key material manager
//!
//! Generates P-256 key pairs and moves them in and out of PEM armor. Private
//! keys are exported as PKCS#8 DER XORed with a password mask (see
//! [`crate::mask`]); public keys are plain SPKI. There is no integrity tag
//! over the masked bytes, so the provider rejecting the unmasked DER is the
//! only way a wrong password is noticed.

use zeroize::Zeroizing;

use crate::{
    error::Result,
    mask::derive_mask,
    pem::{self, PemLabel},
    provider::{KeyPair, KeyProvider, KeyUsages, SoftwareProvider},
};

pub type PrivateKeyOf<P> = <P as KeyProvider>::PrivateKey;
pub type PublicKeyOf<P> = <P as KeyProvider>::PublicKey;

#[derive(Clone, Debug, Default)]
pub struct KeyManager<P = SoftwareProvider> {
    provider: P,
}

impl<P: KeyProvider> KeyManager<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate an extractable ECDSA P-256 key pair, private half usable for `sign`
    pub fn generate_key_pair(&self) -> Result<KeyPair<PublicKeyOf<P>, PrivateKeyOf<P>>> {
        self.provider.generate_key_pair(true, KeyUsages::SIGN)
    }

    /// Unmask a password-protected "PRIVATE KEY" armor and import it for `sign`
    ///
    /// A wrong password leaves invalid DER behind and fails with
    /// `KeyImportError`, the same as a corrupt key.
    pub fn import_private_key(&self, armor: &str, password: &str) -> Result<PrivateKeyOf<P>> {
        let mut der = Zeroizing::new(pem::decode_label(armor, PemLabel::PrivateKey)?);
        let mask = derive_mask(&self.provider, password, der.len())?;
        mask.apply(&mut der)?;

        let key = self.provider.import_pkcs8_der(&der, true, KeyUsages::SIGN);
        if key.is_err() {
            tracing::debug!(der_len = der.len(), "masked private key rejected");
        }
        key
    }

    /// Export a private key as password-masked "PRIVATE KEY" armor
    pub fn export_private_key(&self, key: &PrivateKeyOf<P>, password: &str) -> Result<String> {
        let mut der = self.provider.export_pkcs8_der(key)?;
        let mask = derive_mask(&self.provider, password, der.len())?;
        mask.apply(&mut der)?;
        tracing::debug!(der_len = der.len(), "exported masked private key");
        Ok(pem::encode(&der, PemLabel::PrivateKey))
    }

    /// Public key of a private key, usable for `verify` only
    ///
    /// Goes through the JWK form: the private scalar is dropped and
    /// `key_ops` narrowed before re-import.
    pub fn derive_public_key(&self, private_key: &PrivateKeyOf<P>) -> Result<PublicKeyOf<P>> {
        let mut jwk = self.provider.export_jwk(private_key)?;
        jwk.d = None;
        jwk.key_ops = Some(KeyUsages::VERIFY.key_ops());
        self.provider
            .import_public_jwk(&jwk, true, KeyUsages::VERIFY)
    }

    /// Export a public key as "PUBLIC KEY" armor (never masked)
    pub fn export_public_key(&self, key: &PublicKeyOf<P>) -> Result<String> {
        let der = self.provider.export_spki_der(key)?;
        Ok(pem::encode(&der, PemLabel::PublicKey))
    }

    /// Import "PUBLIC KEY" armor for `verify`
    pub fn import_public_key(&self, armor: &str) -> Result<PublicKeyOf<P>> {
        let der = pem::decode_label(armor, PemLabel::PublicKey)?;
        self.provider
            .import_spki_der(&der, true, KeyUsages::VERIFY)
    }

    /// Strip the password mask, leaving standard PKCS#8 armor
    ///
    /// Pure text transform: the result is not checked, so a wrong password
    /// produces armor that will not import anywhere.
    pub fn unmask_private_key(&self, armor: &str, password: &str) -> Result<String> {
        self.toggle_mask(armor, password)
    }

    /// Apply the password mask to standard PKCS#8 armor
    pub fn mask_private_key(&self, armor: &str, password: &str) -> Result<String> {
        self.toggle_mask(armor, password)
    }

    fn toggle_mask(&self, armor: &str, password: &str) -> Result<String> {
        let mut der = Zeroizing::new(pem::decode_label(armor, PemLabel::PrivateKey)?);
        let mask = derive_mask(&self.provider, password, der.len())?;
        mask.apply(&mut der)?;
        Ok(pem::encode(&der, PemLabel::PrivateKey))
    }
}
