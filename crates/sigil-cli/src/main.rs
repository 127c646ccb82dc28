//! Sigil 密钥管理命令行工具

mod commands;
mod error;
mod settings;

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use error::CliResult;
use settings::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sigil")]
#[command(about = "Sigil 密钥管理工具 - 口令保护的 P-256 密钥与签名")]
#[command(version)]
struct Cli {
    /// 配置文件路径 (默认读取当前目录的 sigil.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 私钥口令
    #[arg(long, global = true, env = "SIGIL_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// 待签名或验证的消息来源
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct MessageArgs {
    /// 文本消息 (每个 UTF-16 码元取低 8 位)
    #[arg(short, long)]
    pub message: Option<String>,

    /// 文件内容 (原始字节)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成新的密钥对
    Generate {
        /// 密钥标识
        #[arg(short, long)]
        name: Option<String>,

        /// 输出目录
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 从私钥导出公钥
    Export {
        /// 私钥文件路径
        #[arg(short, long)]
        key: PathBuf,

        /// 公钥输出路径
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 签名消息或文件
    Sign {
        /// 私钥文件路径
        #[arg(short, long)]
        key: PathBuf,

        #[command(flatten)]
        input: MessageArgs,
    },

    /// 验证签名
    Verify {
        /// 公钥文件路径
        #[arg(short, long)]
        public: PathBuf,

        #[command(flatten)]
        input: MessageArgs,

        /// Base64 签名
        #[arg(short, long)]
        signature: String,
    },

    /// 去除口令掩码，输出标准 PKCS#8 私钥
    Unmask {
        /// 私钥文件路径
        #[arg(short, long)]
        key: PathBuf,

        /// 输出路径
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 显示密钥信息
    Info {
        /// 密钥文件路径
        #[arg(short, long)]
        key: PathBuf,
    },
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, settings: &Settings) -> CliResult<bool> {
    let password = cli.password;
    match cli.command {
        Commands::Generate { name, output } => {
            let name = name.unwrap_or_else(|| settings.key_name.clone());
            let output = output.unwrap_or_else(|| settings.output_dir.clone());
            commands::generate::handle(&name, &output, password)?;
        }
        Commands::Export { key, output } => {
            commands::export::handle(&key, output, password)?;
        }
        Commands::Sign { key, input } => {
            commands::sign::handle(&key, &input, password)?;
        }
        Commands::Verify {
            public,
            input,
            signature,
        } => {
            return commands::verify::handle(&public, &input, &signature);
        }
        Commands::Unmask { key, output } => {
            commands::unmask::handle(&key, output, password)?;
        }
        Commands::Info { key } => {
            commands::info::handle(&key, password)?;
        }
    }
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings.log_level);
    tracing::debug!(?settings, "loaded settings");

    match run(cli, &settings) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_message_and_file_are_exclusive() {
        let parsed = Cli::try_parse_from([
            "sigil", "sign", "--key", "k.pem", "--message", "hi", "--file", "data.bin",
        ]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["sigil", "sign", "--key", "k.pem"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_password_flag() {
        let cli = Cli::try_parse_from([
            "sigil",
            "export",
            "--key",
            "k.pem",
            "--password",
            "correct-horse",
        ])
        .unwrap();
        assert_eq!(cli.password.as_deref(), Some("correct-horse"));
        assert!(matches!(cli.command, Commands::Export { .. }));
    }
}
