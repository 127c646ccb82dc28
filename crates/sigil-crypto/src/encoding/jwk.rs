//! JSON Web Key (RFC 7517/7518) for EC keys
//!
//! Only the members WebCrypto emits for ECDSA keys are modelled. Coordinates
//! and the private scalar are base64url without padding.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{Error, Result};

pub const KTY_EC: &str = "EC";
pub const CRV_P256: &str = "P-256";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcJwk {
    pub kty: String,
    pub crv: String,
    pub x: String,
    pub y: String,
    /// 私钥标量，公钥 JWK 中不存在
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<bool>,
}

impl EcJwk {
    pub fn is_private(&self) -> bool {
        self.d.is_some()
    }

    /// Reject anything that is not an EC P-256 key
    pub fn check_p256(&self) -> Result<()> {
        if self.kty != KTY_EC {
            return Err(Error::JwkError(format!("unsupported kty: {}", self.kty)));
        }
        if self.crv != CRV_P256 {
            return Err(Error::JwkError(format!("unsupported crv: {}", self.crv)));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::JwkError(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::JwkError(e.to_string()))
    }
}

impl Drop for EcJwk {
    fn drop(&mut self) {
        if let Some(d) = self.d.as_mut() {
            d.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EcJwk {
        EcJwk {
            kty: KTY_EC.to_string(),
            crv: CRV_P256.to_string(),
            x: "x".to_string(),
            y: "y".to_string(),
            d: None,
            key_ops: Some(vec!["verify".to_string()]),
            ext: Some(true),
        }
    }

    #[test]
    fn test_public_jwk_omits_d() {
        let json = sample().to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("d").is_none());
        assert_eq!(parsed["key_ops"][0], "verify");
    }

    #[test]
    fn test_unknown_members_ignored() {
        let jwk = EcJwk::from_json(r#"{"kty":"EC","crv":"P-256","x":"a","y":"b","alg":"ES256"}"#)
            .unwrap();
        assert!(!jwk.is_private());
        assert!(jwk.key_ops.is_none());
        jwk.check_p256().unwrap();
    }

    #[test]
    fn test_check_p256_rejects_other_curves() {
        let mut jwk = sample();
        jwk.crv = "P-384".to_string();
        assert!(jwk.check_p256().is_err());

        let mut jwk = sample();
        jwk.kty = "RSA".to_string();
        assert!(jwk.check_p256().is_err());
    }
}
