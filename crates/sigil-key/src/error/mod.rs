use thiserror::Error;

/// 密钥管理模块的错误类型
///
/// A wrong password and a corrupt key both surface as an import failure;
/// use [`Error::is_import_failure`] rather than matching on the variant.
#[derive(Error, Debug)]
pub enum Error {
    /// PEM 格式或 Base64 错误
    #[error("Format error: {0}")]
    FormatError(String),

    /// 密钥字节被拒绝（通常是密码错误）
    #[error("Key import error: {0}")]
    KeyImportError(String),

    /// 底层密码操作失败
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// 请求时间戳超出容忍窗口
    #[error("Request expired: timestamp {timestamp} is {skew_ms} ms away from now")]
    RequestExpired { timestamp: u64, skew_ms: u64 },

    /// 请求时间戳未递增
    #[error("Stale timestamp: {timestamp} is not after {last_accepted}")]
    StaleTimestamp { timestamp: u64, last_accepted: u64 },

    /// 无效的签名
    #[error("Invalid signature")]
    InvalidSignature,

    /// 时间戳超出 u64 毫秒范围
    #[error("Timestamp out of range: {0} ms")]
    TimestampOutOfRange(u128),

    /// 系统时间错误
    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),
}

impl Error {
    /// True for every failure a caller should answer with "re-enter password or key"
    pub fn is_import_failure(&self) -> bool {
        matches!(self, Error::FormatError(_) | Error::KeyImportError(_))
    }

    pub(crate) fn provider(err: impl std::fmt::Display) -> Self {
        Error::ProviderError(err.to_string())
    }

    pub(crate) fn key_import(err: impl std::fmt::Display) -> Self {
        Error::KeyImportError(err.to_string())
    }
}

/// Result类型别名
pub type Result<T> = std::result::Result<T, Error>;
