//! Signed request envelope
//!
//! Calls to the key registry are authenticated by signing
//! `"{timestamp}||{uid}||{public_key_pem}||{action}"` with the caller's key.
//! The receiver accepts a request only when its timestamp is within
//! [`TOLERANCE_MS`] of its own clock and newer than the last one it accepted
//! for that user.

use std::{
    fmt,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    manager::{PrivateKeyOf, PublicKeyOf},
    provider::KeyProvider,
    signer::Signer,
};

/// Allowed clock skew between signer and receiver
pub const TOLERANCE_MS: u64 = 30_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Register a public key under a uid
    Register,
    /// Revoke the certificate issued for a uid
    Revoke,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Register => "POST:/user",
            Action::Revoke => "DELETE:/user",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form sent next to the request body
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SignedRequest {
    /// base64 `r || s`
    pub sig: String,
    /// Unix time in milliseconds
    pub timestamp: u64,
}

pub fn canonical_message(timestamp: u64, uid: &str, public_key_pem: &str, action: Action) -> String {
    format!("{timestamp}||{uid}||{public_key_pem}||{action}")
}

/// Who is asking for what; everything the signature covers except the time
#[derive(Clone, Copy, Debug)]
pub struct RequestScope<'a> {
    pub uid: &'a str,
    pub public_key_pem: &'a str,
    pub action: Action,
}

impl RequestScope<'_> {
    pub fn message(&self, timestamp: u64) -> String {
        canonical_message(timestamp, self.uid, self.public_key_pem, self.action)
    }
}

pub fn now_millis() -> Result<u64> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)?;
    to_millis(elapsed)
}

fn to_millis(elapsed: Duration) -> Result<u64> {
    let millis = elapsed.as_millis();
    u64::try_from(millis).map_err(|_| Error::TimestampOutOfRange(millis))
}

/// Sign `scope` at `timestamp` (Unix milliseconds)
pub fn sign_request<P: KeyProvider>(
    signer: &Signer<P>,
    key: &PrivateKeyOf<P>,
    scope: &RequestScope<'_>,
    timestamp: u64,
) -> Result<SignedRequest> {
    let sig = signer.sign_text(key, &scope.message(timestamp))?;
    tracing::debug!(uid = scope.uid, action = %scope.action, timestamp, "signed request");
    Ok(SignedRequest { sig, timestamp })
}

/// Check freshness, ordering and signature of a request received at `now_ms`
pub fn verify_request<P: KeyProvider>(
    signer: &Signer<P>,
    key: &PublicKeyOf<P>,
    scope: &RequestScope<'_>,
    request: &SignedRequest,
    now_ms: u64,
    last_accepted: Option<u64>,
) -> Result<()> {
    let skew_ms = now_ms.abs_diff(request.timestamp);
    if skew_ms > TOLERANCE_MS {
        return Err(Error::RequestExpired {
            timestamp: request.timestamp,
            skew_ms,
        });
    }
    if let Some(last_accepted) = last_accepted {
        if request.timestamp <= last_accepted {
            return Err(Error::StaleTimestamp {
                timestamp: request.timestamp,
                last_accepted,
            });
        }
    }

    if !signer.verify_text(key, &scope.message(request.timestamp), &request.sig)? {
        return Err(Error::InvalidSignature);
    }
    Ok(())
}
