use thiserror::Error;

/// Crypto模块的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Getrandom error: {0}")]
    GetrandomError(String),

    #[error("PKCS8 error: {0}")]
    Pkcs8Error(#[from] pkcs8::Error),

    #[error("SPKI error: {0}")]
    SpkiError(#[from] pkcs8::spki::Error),

    #[error("ECDSA error: {0}")]
    EcdsaError(#[from] p256::ecdsa::Error),

    #[error("Elliptic curve error: {0}")]
    CurveError(#[from] p256::elliptic_curve::Error),

    /// 编码/解码错误
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// JWK 格式错误
    #[error("JWK error: {0}")]
    JwkError(String),

    /// 密钥派生错误
    #[error("KDF error: {0}")]
    KdfError(String),

    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// Result类型别名
pub type Result<T> = std::result::Result<T, Error>;
