//! PEM armor codec
//!
//! Armor is `-----BEGIN <LABEL>-----\n<base64>\n-----END <LABEL>-----` with the
//! body hard-wrapped at 64 characters. [`decode`] strips header and footer by
//! length and never checks the label text; [`decode_strict`] does.

use sigil_crypto::encoding::base64;

use crate::error::{Error, Result};

/// Characters per body line
pub const LINE_WIDTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PemLabel {
    PrivateKey,
    PublicKey,
}

impl PemLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PemLabel::PrivateKey => "PRIVATE KEY",
            PemLabel::PublicKey => "PUBLIC KEY",
        }
    }

    /// Header line including its trailing newline
    pub fn header(&self) -> String {
        format!("-----BEGIN {}-----\n", self.as_str())
    }

    /// Footer line including its leading newline
    pub fn footer(&self) -> String {
        format!("\n-----END {}-----", self.as_str())
    }

    /// Guess the label from the armor's first line
    pub fn detect(armor: &str) -> Option<Self> {
        let first = armor.trim_start().lines().next()?;
        [PemLabel::PrivateKey, PemLabel::PublicKey]
            .into_iter()
            .find(|label| first == label.header().trim_end())
    }
}

impl std::fmt::Display for PemLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remove `header` and `footer` by length and base64-decode what is left
///
/// The armor is trimmed first. Whitespace inside the body is ignored. A
/// header or footer with the right length but the wrong text is not
/// detected and yields corrupt bytes or a `FormatError`.
pub fn decode(armor: &str, header: &str, footer: &str) -> Result<Vec<u8>> {
    let armor = armor.trim();
    let end = armor
        .len()
        .checked_sub(footer.len())
        .filter(|end| *end >= header.len())
        .ok_or_else(|| {
            Error::FormatError(format!(
                "armor is {} bytes, shorter than header and footer",
                armor.len()
            ))
        })?;
    let body = armor
        .get(header.len() .. end)
        .ok_or_else(|| Error::FormatError("header/footer split a character".to_string()))?;

    base64::decode_forgiving(body).map_err(|e| Error::FormatError(e.to_string()))
}

/// [`decode`] with the header/footer of `label`
pub fn decode_label(armor: &str, label: PemLabel) -> Result<Vec<u8>> {
    decode(armor, &label.header(), &label.footer())
}

/// Label-aware decode: fails unless the armor starts and ends with `label`'s lines
pub fn decode_strict(armor: &str, label: PemLabel) -> Result<Vec<u8>> {
    let trimmed = armor.trim();
    let header = label.header();
    let footer = label.footer();
    let (header, footer) = (header.trim_end(), footer.trim_start());

    if trimmed.len() < header.len() + footer.len() {
        return Err(Error::FormatError(format!("armor too short for {}", label)));
    }
    let body = trimmed
        .strip_prefix(header)
        .ok_or_else(|| Error::FormatError(format!("expected {} header", label)))?
        .strip_suffix(footer)
        .ok_or_else(|| Error::FormatError(format!("expected {} footer", label)))?;

    base64::decode_forgiving(body).map_err(|e| Error::FormatError(e.to_string()))
}

/// Base64-encode `raw`, wrap at [`LINE_WIDTH`] and add `label`'s header/footer
pub fn encode(raw: &[u8], label: PemLabel) -> String {
    let encoded = base64::encode(raw);
    format!("{}{}{}", label.header(), wrap(&encoded), label.footer())
}

/// Every complete line gets a trailing newline, so a body that fills its
/// last line leaves a blank line before the footer
fn wrap(encoded: &str) -> String {
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH);
    // base64 output is ASCII, so byte chunks are char chunks
    for line in encoded.as_bytes().chunks(LINE_WIDTH) {
        wrapped.push_str(std::str::from_utf8(line).unwrap_or_default());
        if line.len() == LINE_WIDTH {
            wrapped.push('\n');
        }
    }
    wrapped
}
