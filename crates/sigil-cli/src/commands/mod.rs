pub mod export;
pub mod generate;
pub mod info;
pub mod sign;
pub mod unmask;
pub mod verify;

use std::{
    fs,
    path::{Path, PathBuf},
};

use sigil_crypto::ecdsa_p256;
use sigil_key::{pem, PemLabel};

use crate::{
    error::{CliError, CliResult},
    MessageArgs,
};

pub(crate) fn read_text(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

pub(crate) fn require_password(password: Option<String>) -> CliResult<String> {
    password.ok_or_else(|| {
        CliError::InvalidInput("需要口令: 使用 --password 或设置 SIGIL_PASSWORD".to_string())
    })
}

/// Bytes covered by the signature
///
/// Text goes through the same lossy encoding the signer applies; files are
/// signed byte for byte.
pub(crate) fn message_input(input: &MessageArgs) -> CliResult<Vec<u8>> {
    match (&input.message, &input.file) {
        (Some(text), _) => Ok(sigil_key::message_bytes(text)),
        (None, Some(path)) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            Ok(fs::read(path)?)
        }
        (None, None) => Err(CliError::InvalidInput(
            "需要 --message 或 --file".to_string(),
        )),
    }
}

/// SHA-256 of the SPKI DER inside "PUBLIC KEY" armor, hex encoded
pub(crate) fn public_key_fingerprint(armor: &str) -> CliResult<String> {
    let der = pem::decode_strict(armor, PemLabel::PublicKey)?;
    let public_key = ecdsa_p256::public_key_from_spki_der(&der)?;
    Ok(hex::encode(ecdsa_p256::public_key_fingerprint(&public_key)?))
}

/// `alice_private.pem` -> `alice_<suffix>.pem`, anything else -> `<path>.<suffix>.pem`
pub(crate) fn sibling_path(key: &Path, suffix: &str) -> PathBuf {
    let file_name = key
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix("_private.pem") {
        Some(stem) => key.with_file_name(format!("{stem}_{suffix}.pem")),
        None => key.with_file_name(format!("{file_name}.{suffix}.pem")),
    }
}
