use std::{fs, path::Path, path::PathBuf};

use colored::Colorize;
use sigil_key::{KeyManager, SoftwareProvider};

use super::{public_key_fingerprint, read_text, require_password, sibling_path};
use crate::error::CliResult;

pub fn handle(key: &Path, output: Option<PathBuf>, password: Option<String>) -> CliResult<()> {
    let password = require_password(password)?;
    println!("{}", format!("导出公钥: {}", key.display()).cyan());

    let armor = read_text(key)?;
    let km = KeyManager::new(SoftwareProvider);
    let private_key = km.import_private_key(&armor, &password)?;
    let public_key = km.derive_public_key(&private_key)?;
    let public_armor = km.export_public_key(&public_key)?;

    let output = output.unwrap_or_else(|| sibling_path(key, "public"));
    fs::write(&output, public_armor.as_bytes())?;

    println!("{} 公钥已保存到: {}", "✓".green(), output.display());
    println!("  公钥指纹: {}", public_key_fingerprint(&public_armor)?);

    Ok(())
}
