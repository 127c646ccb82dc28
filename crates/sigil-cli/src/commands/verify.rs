use std::path::Path;

use colored::Colorize;
use sigil_key::{KeyManager, Signer, SoftwareProvider};

use super::{message_input, read_text};
use crate::{error::CliResult, MessageArgs};

/// Returns whether the signature is valid; a malformed signature counts as invalid
pub fn handle(public: &Path, input: &MessageArgs, signature: &str) -> CliResult<bool> {
    println!("{}", format!("验证签名: {}", public.display()).cyan());

    let data = message_input(input)?;
    println!("  消息长度: {} 字节", data.len());

    let armor = read_text(public)?;
    let public_key = KeyManager::new(SoftwareProvider).import_public_key(&armor)?;
    let is_valid = Signer::new(SoftwareProvider).verify(&public_key, &data, signature)?;

    if is_valid {
        println!("{} {}", "✓".green(), "签名验证通过！".green().bold());
    } else {
        println!("{} {}", "✗".red(), "签名验证失败！".red().bold());
        println!("{}", "可能的原因:".yellow());
        println!("  - 消息已被修改");
        println!("  - 签名损坏");
        println!("  - 使用了错误的公钥");
    }

    Ok(is_valid)
}
