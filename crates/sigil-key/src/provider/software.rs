use std::fmt;

use sigil_crypto::{ecdsa_p256, kdf, EcJwk, Pbkdf2Params, PublicKey, P256};
use zeroize::Zeroizing;

use super::{Algorithm, KeyHandle, KeyKind, KeyPair, KeyProvider, KeyUsages};
use crate::error::{Error, Result};

/// Pure-software provider over the RustCrypto P-256 implementation
///
/// Holds no state; handles own their key material.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareProvider;

pub struct SoftwarePrivateKey {
    inner: P256,
    extractable: bool,
    usages: KeyUsages,
}

pub struct SoftwarePublicKey {
    inner: PublicKey,
    extractable: bool,
    usages: KeyUsages,
}

impl KeyHandle for SoftwarePrivateKey {
    fn kind(&self) -> KeyKind {
        KeyKind::Private
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::EcdsaP256
    }

    fn usages(&self) -> KeyUsages {
        self.usages
    }

    fn extractable(&self) -> bool {
        self.extractable
    }
}

impl KeyHandle for SoftwarePublicKey {
    fn kind(&self) -> KeyKind {
        KeyKind::Public
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::EcdsaP256
    }

    fn usages(&self) -> KeyUsages {
        self.usages
    }

    fn extractable(&self) -> bool {
        self.extractable
    }
}

impl fmt::Debug for SoftwarePrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftwarePrivateKey")
            .field("extractable", &self.extractable)
            .field("usages", &self.usages)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SoftwarePublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftwarePublicKey")
            .field("extractable", &self.extractable)
            .field("usages", &self.usages)
            .finish_non_exhaustive()
    }
}

fn check_usages(requested: KeyUsages, allowed: KeyUsages, kind: KeyKind) -> Result<()> {
    if !allowed.contains(requested) {
        return Err(Error::ProviderError(format!(
            "usages {:?} not allowed for a {:?} ECDSA key",
            requested, kind
        )));
    }
    Ok(())
}

fn ensure_extractable(extractable: bool) -> Result<()> {
    if !extractable {
        return Err(Error::ProviderError("key is not extractable".to_string()));
    }
    Ok(())
}

impl KeyProvider for SoftwareProvider {
    type PrivateKey = SoftwarePrivateKey;
    type PublicKey = SoftwarePublicKey;

    fn generate_key_pair(
        &self,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<KeyPair<SoftwarePublicKey, SoftwarePrivateKey>> {
        check_usages(usages, KeyUsages::SIGN, KeyKind::Private)?;
        let inner = P256::generate().map_err(Error::provider)?;
        tracing::debug!("generated P-256 key pair");

        Ok(KeyPair {
            public_key: SoftwarePublicKey {
                inner: inner.public_key(),
                extractable: true,
                usages: KeyUsages::VERIFY,
            },
            private_key: SoftwarePrivateKey {
                inner,
                extractable,
                usages,
            },
        })
    }

    fn import_pkcs8_der(
        &self,
        der: &[u8],
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<SoftwarePrivateKey> {
        check_usages(usages, KeyUsages::SIGN, KeyKind::Private)?;
        let inner = P256::from_pkcs8_der(der).map_err(Error::key_import)?;
        tracing::debug!(der_len = der.len(), "imported PKCS#8 private key");
        Ok(SoftwarePrivateKey {
            inner,
            extractable,
            usages,
        })
    }

    fn export_pkcs8_der(&self, key: &SoftwarePrivateKey) -> Result<Zeroizing<Vec<u8>>> {
        ensure_extractable(key.extractable)?;
        key.inner.to_pkcs8_der().map_err(Error::provider)
    }

    fn export_jwk(&self, key: &SoftwarePrivateKey) -> Result<EcJwk> {
        ensure_extractable(key.extractable)?;
        let mut jwk = key.inner.to_jwk().map_err(Error::provider)?;
        jwk.key_ops = Some(key.usages.key_ops());
        jwk.ext = Some(key.extractable);
        Ok(jwk)
    }

    fn import_public_jwk(
        &self,
        jwk: &EcJwk,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<SoftwarePublicKey> {
        check_usages(usages, KeyUsages::VERIFY, KeyKind::Public)?;
        if jwk.is_private() {
            return Err(Error::KeyImportError(
                "JWK carries a private scalar".to_string(),
            ));
        }
        if let Some(ops) = &jwk.key_ops {
            if let Some(missing) = usages.key_ops().into_iter().find(|op| !ops.contains(op)) {
                return Err(Error::KeyImportError(format!(
                    "usage `{missing}` not listed in key_ops"
                )));
            }
        }
        if extractable && jwk.ext == Some(false) {
            return Err(Error::KeyImportError(
                "JWK is marked non-extractable".to_string(),
            ));
        }

        let inner = ecdsa_p256::public_key_from_jwk(jwk).map_err(Error::key_import)?;
        Ok(SoftwarePublicKey {
            inner,
            extractable,
            usages,
        })
    }

    fn import_spki_der(
        &self,
        der: &[u8],
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<SoftwarePublicKey> {
        check_usages(usages, KeyUsages::VERIFY, KeyKind::Public)?;
        let inner = ecdsa_p256::public_key_from_spki_der(der).map_err(Error::key_import)?;
        Ok(SoftwarePublicKey {
            inner,
            extractable,
            usages,
        })
    }

    fn export_spki_der(&self, key: &SoftwarePublicKey) -> Result<Vec<u8>> {
        ensure_extractable(key.extractable)?;
        ecdsa_p256::public_key_to_spki_der(&key.inner).map_err(Error::provider)
    }

    fn derive_bits(
        &self,
        password: &[u8],
        params: &Pbkdf2Params<'_>,
        bit_len: u32,
    ) -> Result<Zeroizing<Vec<u8>>> {
        if bit_len % 8 != 0 {
            return Err(Error::ProviderError(format!(
                "PBKDF2 bit length {bit_len} is not a multiple of 8"
            )));
        }
        kdf::pbkdf2_sha256(password, params, (bit_len / 8) as usize).map_err(Error::provider)
    }

    fn sign(&self, key: &SoftwarePrivateKey, data: &[u8]) -> Result<Vec<u8>> {
        if !key.usages.can_sign() {
            return Err(Error::ProviderError("key does not permit sign".to_string()));
        }
        let signature = key.inner.sign(data).map_err(Error::provider)?;
        Ok(signature.to_vec())
    }

    fn verify(&self, key: &SoftwarePublicKey, data: &[u8], signature: &[u8]) -> Result<bool> {
        if !key.usages.can_verify() {
            return Err(Error::ProviderError("key does not permit verify".to_string()));
        }
        Ok(ecdsa_p256::verify(&key.inner, data, signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key_pair_usages() {
        let pair = SoftwareProvider
            .generate_key_pair(true, KeyUsages::SIGN)
            .unwrap();
        assert_eq!(pair.private_key.kind(), KeyKind::Private);
        assert_eq!(pair.private_key.usages(), KeyUsages::SIGN);
        assert_eq!(pair.public_key.kind(), KeyKind::Public);
        assert_eq!(pair.public_key.usages(), KeyUsages::VERIFY);
        assert!(pair.public_key.extractable());
        assert_eq!(pair.public_key.algorithm(), Algorithm::EcdsaP256);
    }

    #[test]
    fn test_private_key_rejects_verify_usage() {
        let err = SoftwareProvider
            .generate_key_pair(true, KeyUsages::VERIFY)
            .unwrap_err();
        assert!(matches!(err, Error::ProviderError(_)));
    }

    #[test]
    fn test_sign_verify() {
        let provider = SoftwareProvider;
        let pair = provider.generate_key_pair(true, KeyUsages::SIGN).unwrap();
        let signature = provider.sign(&pair.private_key, b"data").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(provider.verify(&pair.public_key, b"data", &signature).unwrap());
        assert!(!provider.verify(&pair.public_key, b"other", &signature).unwrap());
    }

    #[test]
    fn test_non_extractable_export_fails() {
        let provider = SoftwareProvider;
        let pair = provider.generate_key_pair(false, KeyUsages::SIGN).unwrap();
        assert!(provider.export_pkcs8_der(&pair.private_key).is_err());
        assert!(provider.export_jwk(&pair.private_key).is_err());
        // signing still works
        assert!(provider.sign(&pair.private_key, b"x").is_ok());
    }

    #[test]
    fn test_sign_requires_usage() {
        let provider = SoftwareProvider;
        let pair = provider.generate_key_pair(true, KeyUsages::SIGN).unwrap();
        let der = provider.export_pkcs8_der(&pair.private_key).unwrap();
        let no_usage = provider.import_pkcs8_der(&der, true, KeyUsages::NONE).unwrap();
        let err = provider.sign(&no_usage, b"x").unwrap_err();
        assert!(matches!(err, Error::ProviderError(_)));
    }

    #[test]
    fn test_import_garbage_is_key_import_error() {
        let err = SoftwareProvider
            .import_pkcs8_der(&[0x30, 0x82, 0x01], true, KeyUsages::SIGN)
            .unwrap_err();
        assert!(matches!(err, Error::KeyImportError(_)));
    }

    #[test]
    fn test_public_jwk_rules() {
        let provider = SoftwareProvider;
        let pair = provider.generate_key_pair(true, KeyUsages::SIGN).unwrap();
        let mut jwk = provider.export_jwk(&pair.private_key).unwrap();

        // still private
        assert!(provider
            .import_public_jwk(&jwk, true, KeyUsages::VERIFY)
            .is_err());

        jwk.d = None;
        // key_ops is ["sign"], which does not cover verify
        assert!(provider
            .import_public_jwk(&jwk, true, KeyUsages::VERIFY)
            .is_err());

        jwk.key_ops = Some(vec!["verify".to_string()]);
        let public_key = provider
            .import_public_jwk(&jwk, true, KeyUsages::VERIFY)
            .unwrap();
        assert_eq!(
            provider.export_spki_der(&public_key).unwrap(),
            provider.export_spki_der(&pair.public_key).unwrap()
        );
    }

    #[test]
    fn test_derive_bits_rejects_partial_bytes() {
        let params = Pbkdf2Params {
            salt: b"salt",
            iterations: 1,
        };
        assert!(SoftwareProvider.derive_bits(b"pw", &params, 12).is_err());
        assert_eq!(
            SoftwareProvider
                .derive_bits(b"pw", &params, 256)
                .unwrap()
                .len(),
            32
        );
    }

    #[test]
    fn test_debug_hides_material() {
        let pair = SoftwareProvider
            .generate_key_pair(true, KeyUsages::SIGN)
            .unwrap();
        let debug = format!("{:?}", pair.private_key);
        assert!(debug.contains("SoftwarePrivateKey"));
        assert!(!debug.contains("inner"));
    }
}
