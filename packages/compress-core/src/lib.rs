pub mod constants;
pub mod download;
pub mod errors;
pub mod metrics;
pub mod pipeline;
pub mod quota;
pub mod session;
pub mod transform;
pub mod validation;

// 公開API
pub use constants::{
    DAILY_FREE_LIMIT, DOWNLOAD_PREFIX, MAX_HEIGHT, MAX_INPUT_SIZE, MAX_PIXELS, MAX_WIDTH, QUALITY,
};
pub use download::{download_file_name, save_result};
pub use errors::{CompressError, QuotaError, TransformError};
pub use metrics::{format_size, reduction_percent};
pub use pipeline::{recompress, CompressionResult, CompressionState, ImageAsset};
pub use quota::{
    Clock, FileQuotaStore, FixedClock, MemoryQuotaStore, QuotaStore, QuotaTracker, SystemClock,
    UsageRecord,
};
pub use session::CompressionSession;
pub use transform::{fit_within, CompressionOptions};
pub use validation::{validate_asset, validate_options};
