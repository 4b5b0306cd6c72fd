use thiserror::Error;

/// 圧縮操作の統合エラー型
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("daily free limit reached ({limit} compressions)")]
    LimitReached { limit: u32 },

    #[error("no file selected")]
    NoFileSelected,

    #[error("quota error: {0}")]
    Quota(#[from] QuotaError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 利用回数ストアのエラー
#[derive(Debug, Error)]
pub enum QuotaError {
    #[error("quota store error: {0}")]
    Store(String),

    #[error("quota store is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 画像変換エラー
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("decode failed: {0}")]
    DecodeFailed(String),

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
