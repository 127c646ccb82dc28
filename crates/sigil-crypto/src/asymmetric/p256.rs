use p256::{
    ecdsa::{signature::Signer, signature::Verifier, Signature, SigningKey, VerifyingKey},
    elliptic_curve::{
        rand_core::OsRng,
        sec1::{Coordinates, FromEncodedPoint, ToEncodedPoint},
    },
    EncodedPoint, FieldBytes, PublicKey, SecretKey,
};
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::{
    encoding::{
        base64,
        jwk::{EcJwk, CRV_P256, KTY_EC},
    },
    error::{Error, Result},
};

/// Length of a raw (IEEE P1363, `r || s`) P-256 signature
pub const SIGNATURE_LEN: usize = 64;

/// Length of a P-256 field element / scalar
pub const FIELD_LEN: usize = 32;

pub struct P256 {
    inner: SecretKey,
}

impl From<SecretKey> for P256 {
    fn from(value: SecretKey) -> Self {
        Self { inner: value }
    }
}

impl P256 {
    /// Generate a new P-256 key pair
    pub fn generate() -> Result<Self> {
        let secret_key = SecretKey::random(&mut OsRng);
        Ok(secret_key.into())
    }

    /// Create from raw scalar bytes
    pub fn from_raw_scalar(bytes: &[u8; 32]) -> Result<Self> {
        let secret_key = SecretKey::from_bytes(bytes.into())
            .map_err(|e| Error::Other(format!("Invalid P256 scalar: {}", e)))?;
        Ok(secret_key.into())
    }

    /// Import from PKCS8 DER format
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let secret_key = SecretKey::from_pkcs8_der(der)?;
        Ok(secret_key.into())
    }

    /// Import a private JWK; the public coordinates must match the scalar
    pub fn from_jwk(jwk: &EcJwk) -> Result<Self> {
        jwk.check_p256()?;
        let d = jwk
            .d
            .as_ref()
            .ok_or_else(|| Error::JwkError("missing private scalar `d`".to_string()))?;
        let scalar = Zeroizing::new(base64::decode_url_safe_no_pad(d)?);
        if scalar.len() != FIELD_LEN {
            return Err(Error::JwkError(format!(
                "scalar must be {FIELD_LEN} bytes, got {}",
                scalar.len()
            )));
        }
        let secret_key = SecretKey::from_bytes(FieldBytes::from_slice(&scalar))?;

        let claimed = public_key_from_jwk(jwk)?;
        if claimed != secret_key.public_key() {
            return Err(Error::JwkError(
                "public coordinates do not match private scalar".to_string(),
            ));
        }
        Ok(secret_key.into())
    }
}

impl P256 {
    /// Export private key to PKCS8 DER format
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let der = self.inner.to_pkcs8_der()?;
        Ok(Zeroizing::new(der.as_bytes().to_vec()))
    }

    /// Export public key to SPKI DER format
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        public_key_to_spki_der(&self.inner.public_key())
    }

    /// Export to JWK format, including the private scalar `d`
    pub fn to_jwk(&self) -> Result<EcJwk> {
        let mut jwk = public_key_to_jwk(&self.inner.public_key())?;
        jwk.d = Some(base64::encode_url_safe_no_pad(self.inner.to_bytes()));
        Ok(jwk)
    }

    /// Get raw scalar bytes
    pub fn to_scalar_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.inner.to_bytes().into())
    }
}

impl P256 {
    /// Get the public key for this keypair
    pub fn public_key(&self) -> PublicKey {
        self.inner.public_key()
    }

    /// Sign data using ECDSA with SHA-256
    ///
    /// Returns the fixed-size `r || s` encoding, not DER. Nonces follow
    /// RFC 6979 so the output is deterministic for a given key and message.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
        let signing_key = SigningKey::from(&self.inner);
        let signature: Signature = signing_key.try_sign(message)?;
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(&signature.to_bytes());
        Ok(out)
    }

    /// Generate SPKI SHA-256 fingerprint
    pub fn spki_sha256_fingerprint(&self) -> Result<[u8; 32]> {
        let spki = self.to_spki_der()?;
        Ok(Sha256::digest(&spki).into())
    }
}

/// Verify a raw `r || s` P-256 ECDSA/SHA-256 signature
///
/// Any malformed signature is reported as `false`.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
    let verifying_key = VerifyingKey::from(public_key);
    let signature = match Signature::from_slice(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    verifying_key.verify(message, &signature).is_ok()
}

/// Import public key from SPKI DER format
pub fn public_key_from_spki_der(der: &[u8]) -> Result<PublicKey> {
    PublicKey::from_public_key_der(der).map_err(Into::into)
}

/// Export public key to SPKI DER format
pub fn public_key_to_spki_der(public_key: &PublicKey) -> Result<Vec<u8>> {
    let der = public_key.to_public_key_der()?;
    Ok(der.as_bytes().to_vec())
}

/// SHA-256 over the SPKI DER encoding of a public key
pub fn public_key_fingerprint(public_key: &PublicKey) -> Result<[u8; 32]> {
    let spki = public_key_to_spki_der(public_key)?;
    Ok(Sha256::digest(&spki).into())
}

/// Export public key as a JWK (no `d`, no `key_ops`)
pub fn public_key_to_jwk(public_key: &PublicKey) -> Result<EcJwk> {
    let encoded_point = public_key.to_encoded_point(false);
    match encoded_point.coordinates() {
        Coordinates::Uncompressed { x, y } => Ok(EcJwk {
            kty: KTY_EC.to_string(),
            crv: CRV_P256.to_string(),
            x: base64::encode_url_safe_no_pad(x),
            y: base64::encode_url_safe_no_pad(y),
            d: None,
            key_ops: None,
            ext: None,
        }),
        _ => Err(Error::Other("Failed to extract coordinates".to_string())),
    }
}

/// Import the public half of a JWK from its `x`/`y` members
pub fn public_key_from_jwk(jwk: &EcJwk) -> Result<PublicKey> {
    jwk.check_p256()?;
    let x = base64::decode_url_safe_no_pad(&jwk.x)?;
    let y = base64::decode_url_safe_no_pad(&jwk.y)?;
    if x.len() != FIELD_LEN || y.len() != FIELD_LEN {
        return Err(Error::JwkError(format!(
            "coordinates must be {FIELD_LEN} bytes each"
        )));
    }

    let encoded_point = EncodedPoint::from_affine_coordinates(
        FieldBytes::from_slice(&x),
        FieldBytes::from_slice(&y),
        false,
    );
    let public_key: Option<PublicKey> = PublicKey::from_encoded_point(&encoded_point).into();
    public_key.ok_or_else(|| Error::JwkError("point is not on the P-256 curve".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_generation() {
        let key = P256::generate().unwrap();
        let public_key = key.public_key();

        // P-256 public keys are 65 bytes uncompressed (0x04 + 32 + 32)
        let encoded = public_key.to_encoded_point(false);
        assert_eq!(encoded.len(), 65);
    }

    #[test]
    fn test_sign_verify() {
        let key = P256::generate().unwrap();
        let message = b"Hello, P-256!";

        let signature = key.sign(message).unwrap();
        assert_eq!(signature.len(), SIGNATURE_LEN);

        let public_key = key.public_key();
        assert!(verify(&public_key, message, &signature));
        assert!(!verify(&public_key, b"Wrong message", &signature));
    }

    #[test]
    fn test_verify_malformed_signature() {
        let key = P256::generate().unwrap();
        let public_key = key.public_key();
        let signature = key.sign(b"msg").unwrap();

        assert!(!verify(&public_key, b"msg", &signature[.. 63]));
        assert!(!verify(&public_key, b"msg", &[0u8; 64]));

        let mut tampered = signature;
        tampered[10] ^= 0x01;
        assert!(!verify(&public_key, b"msg", &tampered));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let key = P256::from_raw_scalar(&[7u8; 32]).unwrap();
        let sig1 = key.sign(b"same message").unwrap();
        let sig2 = key.sign(b"same message").unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_der_export_import() {
        let key = P256::generate().unwrap();

        let der = key.to_pkcs8_der().unwrap();
        let imported = P256::from_pkcs8_der(&der).unwrap();
        assert_eq!(*key.to_scalar_bytes(), *imported.to_scalar_bytes());

        let public_der = key.to_spki_der().unwrap();
        let public_key = public_key_from_spki_der(&public_der).unwrap();
        assert_eq!(key.public_key(), public_key);
    }

    #[test]
    fn test_pkcs8_rejects_garbage() {
        assert!(P256::from_pkcs8_der(&[0x30, 0x03, 0x02, 0x01, 0x00]).is_err());
        assert!(P256::from_pkcs8_der(&[0xde, 0xad, 0xbe, 0xef]).is_err());
        assert!(P256::from_pkcs8_der(&[]).is_err());
    }

    #[test]
    fn test_jwk_roundtrip() {
        let key = P256::generate().unwrap();
        let jwk = key.to_jwk().unwrap();
        assert_eq!(jwk.kty, "EC");
        assert_eq!(jwk.crv, "P-256");
        assert!(jwk.is_private());

        let imported = P256::from_jwk(&jwk).unwrap();
        assert_eq!(*key.to_scalar_bytes(), *imported.to_scalar_bytes());

        let public_key = public_key_from_jwk(&jwk).unwrap();
        assert_eq!(public_key, key.public_key());
    }

    #[test]
    fn test_jwk_mismatched_coordinates() {
        let key = P256::generate().unwrap();
        let other = P256::generate().unwrap();
        let mut jwk = key.to_jwk().unwrap();
        let other_jwk = other.to_jwk().unwrap();
        jwk.x = other_jwk.x.clone();
        jwk.y = other_jwk.y.clone();
        assert!(P256::from_jwk(&jwk).is_err());
    }

    #[test]
    fn test_jwk_point_not_on_curve() {
        let key = P256::generate().unwrap();
        let mut jwk = public_key_to_jwk(&key.public_key()).unwrap();
        jwk.y = base64::encode_url_safe_no_pad([1u8; 32]);
        assert!(public_key_from_jwk(&jwk).is_err());
    }

    #[test]
    fn test_fingerprint() {
        let key = P256::generate().unwrap();
        let fingerprint = key.spki_sha256_fingerprint().unwrap();
        assert_eq!(fingerprint, public_key_fingerprint(&key.public_key()).unwrap());
    }
}
