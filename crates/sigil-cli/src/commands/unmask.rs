use std::{fs, path::Path, path::PathBuf};

use colored::Colorize;
use sigil_key::{KeyManager, SoftwareProvider};

use super::{read_text, require_password, sibling_path};
use crate::error::CliResult;

pub fn handle(key: &Path, output: Option<PathBuf>, password: Option<String>) -> CliResult<()> {
    let password = require_password(password)?;
    println!("{}", format!("去除口令掩码: {}", key.display()).cyan());

    let armor = read_text(key)?;
    let km = KeyManager::new(SoftwareProvider);
    // 先确认口令正确，避免写出无效的私钥
    km.import_private_key(&armor, &password)?;
    let plain = km.unmask_private_key(&armor, &password)?;

    let output = output.unwrap_or_else(|| sibling_path(key, "plain"));
    fs::write(&output, plain.as_bytes())?;

    println!("{} 标准 PKCS#8 私钥已保存到: {}", "✓".green(), output.display());
    println!("{}", "⚠ 该文件未受口令保护，请妥善保管！".yellow().bold());

    Ok(())
}
