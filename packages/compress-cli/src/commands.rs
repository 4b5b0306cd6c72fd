use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compress_core::{
    save_result, Clock, CompressError, CompressionSession, FileQuotaStore,
    ImageAsset, QuotaStore, QuotaTracker, SystemClock,
};

use crate::checkout::start_checkout;

pub type LocalTracker = QuotaTracker<FileQuotaStore, SystemClock>;

/// 既定のストア位置 `<data dir>/imagecompress/quota.json`
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("imagecompress")
        .join("quota.json")
}

pub fn open_tracker(store: Option<PathBuf>) -> LocalTracker {
    let path = store.unwrap_or_else(default_store_path);
    tracing::debug!(path = %path.display(), "using quota store");
    QuotaTracker::new(FileQuotaStore::new(path), SystemClock)
}

pub async fn compress<S: QuotaStore, C: Clock>(
    tracker: QuotaTracker<S, C>,
    file: &Path,
    out_dir: Option<PathBuf>,
    no_save: bool,
) -> Result<()> {
    let asset = ImageAsset::from_path(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut session = CompressionSession::new(tracker);
    session.select(asset)?;

    let result = match session.compress().await {
        Ok(result) => result,
        Err(CompressError::LimitReached { limit }) => {
            println!("Daily free limit reached ({limit}/{limit}).");
            println!("Run `imagecompress subscribe` to go premium for unlimited compressions.");
            return Ok(());
        }
        // 回数の記録だけ失敗した場合は圧縮結果を保存する
        Err(CompressError::Quota(err)) => match session.state().result() {
            Some(result) => {
                tracing::warn!(error = %err, "compression succeeded but usage was not recorded");
                eprintln!("Warning: could not record today's usage: {err}");
                result.clone()
            }
            None => {
                return Err(anyhow::Error::from(CompressError::Quota(err))
                    .context(format!("could not compress {}", file.display())));
            }
        },
        Err(err) => {
            return Err(anyhow::Error::from(err)
                .context(format!("could not compress {}", file.display())));
        }
    };

    println!("Size:       {}", result.summary());
    if result.was_resized() {
        println!(
            "Resized:    {}x{} → {}x{}",
            result.source_width, result.source_height, result.width, result.height
        );
    }

    if !no_save {
        let dir = out_dir.unwrap_or_else(|| {
            file.parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        });
        let path = save_result(&result, &dir)
            .with_context(|| format!("failed to save into {}", dir.display()))?;
        println!("Saved:      {}", path.display());
    }

    print_quota(session.tracker_mut())
}

pub fn status<S: QuotaStore, C: Clock>(mut tracker: QuotaTracker<S, C>) -> Result<()> {
    print_quota(&mut tracker)
}

fn print_quota<S: QuotaStore, C: Clock>(tracker: &mut QuotaTracker<S, C>) -> Result<()> {
    let record = tracker.today()?;
    let remaining = tracker.remaining()?;
    println!(
        "Free compressions today: {} / {} ({remaining} remaining)",
        record.count,
        tracker.limit()
    );
    Ok(())
}

pub async fn subscribe(endpoint: &str) -> Result<()> {
    match start_checkout(endpoint).await {
        Ok(redirect) => {
            tracing::info!(session_id = %redirect.session_id, "checkout session created");
            println!("Complete your subscription at:");
            println!("{}", redirect.url);
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "checkout failed");
            Err(err.context("could not connect to the payment system"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compress_core::{FixedClock, MemoryQuotaStore, QuotaError, UsageRecord};

    fn work_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("imagecompress-cli-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn today() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    #[tokio::test]
    async fn test_compress_saves_next_to_source() {
        let dir = work_dir("save");
        let src = dir.join("holiday.png");
        image::DynamicImage::new_rgb8(2400, 1200).save(&src).unwrap();

        let clock = FixedClock::new(today());
        let tracker = QuotaTracker::new(MemoryQuotaStore::new(), &clock);
        compress(tracker, &src, None, false).await.unwrap();

        let saved = dir.join("compressed_holiday.jpg");
        let img = image::open(&saved).unwrap();
        assert_eq!((img.width(), img.height()), (1920, 960));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_compress_no_save_writes_nothing() {
        let dir = work_dir("nosave");
        let src = dir.join("small.png");
        image::DynamicImage::new_rgb8(10, 10).save(&src).unwrap();

        let clock = FixedClock::new(today());
        let tracker = QuotaTracker::new(MemoryQuotaStore::new(), &clock);
        compress(tracker, &src, None, true).await.unwrap();

        assert!(!dir.join("compressed_small.jpg").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_compress_limit_reached() {
        let dir = work_dir("limit");
        let src = dir.join("small.png");
        image::DynamicImage::new_rgb8(10, 10).save(&src).unwrap();

        let store_path = dir.join("quota.json");
        let full = UsageRecord {
            count: 5,
            ..UsageRecord::fresh(today())
        };
        FileQuotaStore::new(&store_path).write(&full).unwrap();

        // 案内を表示して正常終了する
        let clock = FixedClock::new(today());
        let tracker = QuotaTracker::new(FileQuotaStore::new(&store_path), &clock);
        compress(tracker, &src, None, false).await.unwrap();

        assert_eq!(FileQuotaStore::new(&store_path).read().unwrap(), full);
        assert!(!dir.join("compressed_small.jpg").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    /// 読み込みはできるが書き込みに失敗するストア
    struct ReadOnlyStore(UsageRecord);

    impl QuotaStore for ReadOnlyStore {
        fn read(&self) -> Result<UsageRecord, QuotaError> {
            Ok(self.0.clone())
        }

        fn write(&mut self, _record: &UsageRecord) -> Result<(), QuotaError> {
            Err(QuotaError::Store("storage is read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn test_compress_saves_when_usage_not_recorded() {
        let dir = work_dir("readonly");
        let src = dir.join("keep.png");
        image::DynamicImage::new_rgb8(12, 8).save(&src).unwrap();

        let clock = FixedClock::new(today());
        let store = ReadOnlyStore(UsageRecord::fresh(today()));
        compress(QuotaTracker::new(store, &clock), &src, None, false)
            .await
            .unwrap();

        let img = image::open(dir.join("compressed_keep.jpg")).unwrap();
        assert_eq!((img.width(), img.height()), (12, 8));
        std::fs::remove_dir_all(&dir).ok();
    }
}
