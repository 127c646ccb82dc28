use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// 默认配置文件名，在当前目录查找
pub const DEFAULT_CONFIG_FILE: &str = "sigil.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory `generate` writes key files into
    pub output_dir: PathBuf,
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Default key name for `generate`
    pub key_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            log_level: "warn".to_string(),
            key_name: "sigil".to_string(),
        }
    }
}

impl Settings {
    /// Load `path`, or `sigil.toml` from the working directory when no path is
    /// given. A missing default file yields the defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::FileNotFound(path.display().to_string()));
                }
                Self::from_toml_str(&fs::read_to_string(path)?)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_toml_str(&fs::read_to_string(path)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_toml_str(content: &str) -> CliResult<Self> {
        Ok(toml::from_str(content)?)
    }
}
