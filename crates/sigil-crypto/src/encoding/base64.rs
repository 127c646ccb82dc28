//! Base64 utilities
//!
//! - `encode()` / `decode()` - standard RFC 4648 alphabet with padding
//! - `decode_forgiving()` - the lenient decoder browsers expose as `atob`:
//!   ASCII whitespace is skipped, padding is optional and non-zero trailing
//!   bits are accepted
//! - `encode_url_safe_no_pad()` / `decode_url_safe_no_pad()` - JWK members
//!
//! ## Examples
//! ```
//! use sigil_crypto::encoding::base64;
//!
//! let encoded = base64::encode(b"Hello, World!");
//! assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");
//!
//! let decoded = base64::decode_forgiving("SGVsbG8s\nIFdvcmxkIQ").unwrap();
//! assert_eq!(decoded, b"Hello, World!");
//! ```

use base64::{
    alphabet,
    engine::{
        general_purpose::{STANDARD, URL_SAFE_NO_PAD},
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig,
    },
    Engine,
};

use crate::error::{Error, Result};

const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode bytes to standard base64 string with padding
pub fn encode<T: AsRef<[u8]>>(data: T) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64 string to bytes
pub fn decode<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .map_err(|e| Error::EncodingError(format!("Base64 decode error: {}", e)))
}

/// Decode base64 the way `atob` does
///
/// Whitespace (space, tab, CR, LF, FF) anywhere in the input is ignored
/// before decoding, so wrapped PEM bodies decode directly.
pub fn decode_forgiving<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>> {
    let compact: Vec<u8> = encoded
        .as_ref()
        .iter()
        .copied()
        .filter(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0c))
        .collect();
    FORGIVING
        .decode(compact)
        .map_err(|e| Error::EncodingError(format!("Base64 decode error: {}", e)))
}

/// Encode bytes to URL-safe base64 without padding
pub fn encode_url_safe_no_pad<T: AsRef<[u8]>>(data: T) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode URL-safe base64 without padding
pub fn decode_url_safe_no_pad<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| Error::EncodingError(format!("Base64url decode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_roundtrip() {
        let data = b"Hello, World!";
        let encoded = encode(data);
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_standard_rejects_missing_padding() {
        assert!(decode("SGVsbG8sIFdvcmxkIQ").is_err());
    }

    #[test]
    fn test_forgiving_skips_whitespace() {
        let decoded = decode_forgiving(" SGVs\r\nbG8s\tIFdv\ncmxk IQ== ").unwrap();
        assert_eq!(decoded, b"Hello, World!");
    }

    #[test]
    fn test_forgiving_accepts_unpadded() {
        assert_eq!(decode_forgiving("SGVsbG8").unwrap(), b"Hello");
    }

    #[test]
    fn test_forgiving_accepts_trailing_bits() {
        // "QR==" has non-zero bits after the last full byte
        assert_eq!(decode_forgiving("QR==").unwrap(), b"A");
    }

    #[test]
    fn test_forgiving_rejects_garbage() {
        assert!(decode_forgiving("not*base64!").is_err());
        assert!(decode_forgiving("A").is_err());
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(b""), "");
        assert!(decode_forgiving("").unwrap().is_empty());
    }

    #[test]
    fn test_url_safe_no_pad() {
        let data = [0xfb, 0xff, 0xfe];
        let encoded = encode_url_safe_no_pad(data);
        assert_eq!(encoded, "-__-");
        assert_eq!(decode_url_safe_no_pad(&encoded).unwrap(), data);
    }
}
