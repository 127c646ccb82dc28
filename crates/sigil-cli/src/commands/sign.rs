use std::path::Path;

use colored::Colorize;
use sigil_key::{KeyManager, Signer, SoftwareProvider};

use super::{message_input, read_text, require_password};
use crate::{error::CliResult, MessageArgs};

/// Prints the base64 signature alone on stdout; progress goes to stderr
pub fn handle(key: &Path, input: &MessageArgs, password: Option<String>) -> CliResult<()> {
    let signature = sign(key, input, password)?;
    eprintln!("{} 签名完成", "✓".green());
    println!("{signature}");
    Ok(())
}

pub(crate) fn sign(key: &Path, input: &MessageArgs, password: Option<String>) -> CliResult<String> {
    let password = require_password(password)?;
    let data = message_input(input)?;
    eprintln!("  消息长度: {} 字节", data.len());

    let armor = read_text(key)?;
    let private_key = KeyManager::new(SoftwareProvider).import_private_key(&armor, &password)?;
    eprintln!("  使用私钥: {}", key.display());

    Ok(Signer::new(SoftwareProvider).sign(&private_key, &data)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use sigil_crypto::encoding::base64;

    use super::*;

    #[test]
    fn test_sign_text_matches_library() {
        let dir = tempfile::tempdir().unwrap();
        let km = KeyManager::new(SoftwareProvider);
        let pair = km.generate_key_pair().unwrap();
        let path = dir.path().join("erin_private.pem");
        fs::write(&path, km.export_private_key(&pair.private_key, "pw").unwrap()).unwrap();

        let input = MessageArgs {
            message: Some("transfer:100".to_string()),
            file: None,
        };
        let sig = sign(&path, &input, Some("pw".to_string())).unwrap();
        assert_eq!(base64::decode(&sig).unwrap().len(), 64);

        let signer = Signer::new(SoftwareProvider);
        assert!(signer
            .verify_text(&pair.public_key, "transfer:100", &sig)
            .unwrap());
    }
}
