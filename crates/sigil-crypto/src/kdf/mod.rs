//! Key Derivation Functions (KDF)
//!
//! Password based derivation with PBKDF2-HMAC-SHA256. The output length is
//! chosen by the caller, matching the `deriveBits` contract: any byte length
//! whose bit count fits in a `u32`.

use hmac::Hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Largest output accepted by [`pbkdf2_sha256`], in bytes.
///
/// The bit length handed to `deriveBits` is an unsigned 32-bit integer.
pub const MAX_OUTPUT_LEN: usize = (u32::MAX / 8) as usize;

/// PBKDF2 parameters (everything except the password and output length)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pbkdf2Params<'a> {
    pub salt: &'a [u8],
    pub iterations: u32,
}

/// Derive `len` bytes from `password` with PBKDF2-HMAC-SHA256
///
/// # Arguments
/// - `password`: raw password bytes (UTF-8 for text passwords)
/// - `params`: salt and iteration count
/// - `len`: number of output bytes, zero allowed
pub fn pbkdf2_sha256(
    password: &[u8],
    params: &Pbkdf2Params<'_>,
    len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if params.iterations == 0 {
        return Err(Error::KdfError("iteration count must be positive".to_string()));
    }
    if len > MAX_OUTPUT_LEN {
        return Err(Error::KdfError(format!(
            "requested {len} bytes, maximum is {MAX_OUTPUT_LEN}"
        )));
    }

    let mut okm = Zeroizing::new(vec![0u8; len]);
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, params.salt, params.iterations, &mut okm)
        .map_err(|e| Error::KdfError(format!("PBKDF2-HMAC-SHA256 failed: {e}")))?;
    Ok(okm)
}
