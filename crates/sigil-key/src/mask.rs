//! Password-derived key masks
//!
//! A mask is PBKDF2-HMAC-SHA256 output over the UTF-8 password with a fixed
//! salt and iteration count, truncated to the length of the data it covers.
//! XOR with the same mask is self-inverse, so one routine masks and unmasks.
//!
//! The salt is shared by every installation. That allows precomputation
//! across users, but changing it would orphan every key exported so far.

use std::fmt;

use sigil_crypto::Pbkdf2Params;
use zeroize::Zeroizing;

use crate::{
    error::{Error, Result},
    provider::KeyProvider,
};

/// Fixed derivation salt, `8D 6F 53 6C 13 68 15 42 32 16 8D 2E AC 2D 4F 96`
pub const MASK_SALT: [u8; 16] = [
    0x8d, 0x6f, 0x53, 0x6c, 0x13, 0x68, 0x15, 0x42, 0x32, 0x16, 0x8d, 0x2e, 0xac, 0x2d, 0x4f, 0x96,
];

pub const MASK_ITERATIONS: u32 = 1926;

pub const MASK_PARAMS: Pbkdf2Params<'static> = Pbkdf2Params {
    salt: &MASK_SALT,
    iterations: MASK_ITERATIONS,
};

pub struct Mask(Zeroizing<Vec<u8>>);

impl Mask {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// XOR `data` with the mask in place; lengths must match exactly
    pub fn apply(&self, data: &mut [u8]) -> Result<()> {
        if data.len() != self.0.len() {
            return Err(Error::ProviderError(format!(
                "mask is {} bytes but data is {} bytes",
                self.0.len(),
                data.len()
            )));
        }
        data.iter_mut().zip(self.0.iter()).for_each(|(d, m)| *d ^= m);
        Ok(())
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({} bytes)", self.0.len())
    }
}

/// Derive a `len`-byte mask from `password`
pub fn derive_mask<P: KeyProvider + ?Sized>(provider: &P, password: &str, len: usize) -> Result<Mask> {
    let bit_len = len
        .checked_mul(8)
        .and_then(|bits| u32::try_from(bits).ok())
        .ok_or_else(|| Error::ProviderError(format!("mask length {len} exceeds derivation limit")))?;

    tracing::trace!(len, "deriving key mask");
    let mut bits = provider.derive_bits(password.as_bytes(), &MASK_PARAMS, bit_len)?;
    bits.truncate(len);
    Ok(Mask(bits))
}
