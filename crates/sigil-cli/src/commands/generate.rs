use std::{fs, path::Path};

use colored::Colorize;
use sigil_key::{KeyManager, SoftwareProvider};

use super::{public_key_fingerprint, require_password};
use crate::error::CliResult;

pub fn handle(name: &str, output_dir: &Path, password: Option<String>) -> CliResult<()> {
    let password = require_password(password)?;

    println!("{}", "生成 ECDSA P-256 密钥对...".cyan());

    let km = KeyManager::new(SoftwareProvider);
    let pair = km.generate_key_pair()?;

    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }

    // 私钥以口令掩码形式保存
    let private_key_path = output_dir.join(format!("{name}_private.pem"));
    let private_armor = km.export_private_key(&pair.private_key, &password)?;
    fs::write(&private_key_path, private_armor.as_bytes())?;
    println!("{} 私钥已保存到: {}", "✓".green(), private_key_path.display());

    let public_key_path = output_dir.join(format!("{name}_public.pem"));
    let public_armor = km.export_public_key(&pair.public_key)?;
    fs::write(&public_key_path, public_armor.as_bytes())?;
    println!("{} 公钥已保存到: {}", "✓".green(), public_key_path.display());

    println!();
    println!("{}", "密钥信息:".cyan());
    println!("  算法: ECDSA P-256");
    println!("  公钥指纹: {}", public_key_fingerprint(&public_armor)?);
    println!();
    println!("{}", "⚠ 忘记口令将无法恢复私钥".yellow().bold());

    Ok(())
}
