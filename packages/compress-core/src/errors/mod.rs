mod types;

pub use types::{CompressError, QuotaError, TransformError};
