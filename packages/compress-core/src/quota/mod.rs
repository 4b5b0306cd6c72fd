//! 1日あたりの無料利用回数の管理

pub mod clock;
pub mod record;
pub mod store;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use record::{day_string, UsageRecord};
pub use store::{FileQuotaStore, MemoryQuotaStore, QuotaStore, COUNT_KEY, DATE_KEY};
pub use tracker::QuotaTracker;
