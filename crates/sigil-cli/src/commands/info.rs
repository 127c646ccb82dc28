use std::{fs, path::Path, time::UNIX_EPOCH};

use colored::Colorize;
use sigil_key::{pem, KeyManager, PemLabel, SoftwareProvider};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::{public_key_fingerprint, read_text};
use crate::error::{CliError, CliResult};

pub fn handle(key: &Path, password: Option<String>) -> CliResult<()> {
    println!("{}", format!("密钥信息: {}", key.display()).cyan().bold());
    println!();

    let armor = read_text(key)?;
    let label = PemLabel::detect(&armor)
        .ok_or_else(|| CliError::InvalidInput("无法识别的密钥格式".to_string()))?;
    let der = pem::decode_strict(&armor, label)?;

    match label {
        PemLabel::PrivateKey => {
            println!("{}", "密钥类型: 私钥 (口令掩码)".yellow());
            println!("算法: ECDSA P-256");
            println!("格式: 掩码 PKCS#8 PEM");
            println!("数据长度: {} 字节", der.len());

            println!();
            match password {
                Some(password) => {
                    let km = KeyManager::new(SoftwareProvider);
                    let private_key = km.import_private_key(&armor, &password)?;
                    let public_armor = km.export_public_key(&km.derive_public_key(&private_key)?)?;
                    println!("{}", "对应的公钥信息:".cyan());
                    println!("  公钥指纹: {}", public_key_fingerprint(&public_armor)?);
                }
                None => {
                    println!("提供 --password 以显示公钥指纹");
                }
            }

            println!();
            println!("{}", "⚠ 注意: 请妥善保管私钥文件！".yellow().bold());
        }
        PemLabel::PublicKey => {
            println!("{}", "密钥类型: 公钥".green());
            println!("算法: ECDSA P-256");
            println!("格式: SPKI PEM");
            println!("公钥指纹: {}", public_key_fingerprint(&armor)?);

            println!();
            println!("{}", "注意: 公钥可以安全地分享给他人。".green());
        }
    }

    let metadata = fs::metadata(key)?;
    println!();
    println!("{}", "文件信息:".cyan());
    println!("  文件大小: {} 字节", metadata.len());
    if let Some(modified) = metadata
        .modified()
        .ok()
        .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
        .and_then(|since| OffsetDateTime::from_unix_timestamp(since.as_secs() as i64).ok())
        .and_then(|datetime| datetime.format(&Rfc3339).ok())
    {
        println!("  修改时间: {}", modified);
    }

    Ok(())
}
