use crate::errors::QuotaError;
use crate::quota::record::UsageRecord;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 日付を保存するキー
pub const DATE_KEY: &str = "compressionDate";

/// 回数（10進文字列）を保存するキー
pub const COUNT_KEY: &str = "compressionCount";

type Entries = BTreeMap<String, String>;

/// 利用回数の永続化先
pub trait QuotaStore {
    fn read(&self) -> Result<UsageRecord, QuotaError>;
    fn write(&mut self, record: &UsageRecord) -> Result<(), QuotaError>;
}

fn record_from_entries(entries: &Entries) -> UsageRecord {
    let date = entries.get(DATE_KEY).cloned().unwrap_or_default();
    let count = match entries.get(COUNT_KEY) {
        None => 0,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "malformed compression count, treating as 0");
            0
        }),
    };
    UsageRecord { date, count }
}

fn write_entries(entries: &mut Entries, record: &UsageRecord) {
    entries.insert(DATE_KEY.to_string(), record.date.clone());
    entries.insert(COUNT_KEY.to_string(), record.count.to_string());
}

/// メモリ上の文字列 key/value ストア
#[derive(Debug, Clone, Default)]
pub struct MemoryQuotaStore {
    entries: Entries,
}

impl MemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生の key/value から作成する
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl QuotaStore for MemoryQuotaStore {
    fn read(&self) -> Result<UsageRecord, QuotaError> {
        Ok(record_from_entries(&self.entries))
    }

    fn write(&mut self, record: &UsageRecord) -> Result<(), QuotaError> {
        write_entries(&mut self.entries, record);
        Ok(())
    }
}

/// JSON ファイルに保存する key/value ストア
///
/// 値はすべて文字列。ファイルがなければ空として扱う
#[derive(Debug, Clone)]
pub struct FileQuotaStore {
    path: PathBuf,
}

impl FileQuotaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, QuotaError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(QuotaError::Store(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }
}

impl QuotaStore for FileQuotaStore {
    fn read(&self) -> Result<UsageRecord, QuotaError> {
        Ok(record_from_entries(&self.load()?))
    }

    fn write(&mut self, record: &UsageRecord) -> Result<(), QuotaError> {
        // 他のキーは保持する
        let mut entries = self.load()?;
        write_entries(&mut entries, record);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                QuotaError::Store(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json).map_err(|e| {
            QuotaError::Store(format!("failed to write {}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), count = record.count, "quota record persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_path(name: &str) -> PathBuf {
        static SEQ: AtomicUsize = AtomicUsize::new(0);
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("compress-core-{}-{seq}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_memory_store_empty() {
        let store = MemoryQuotaStore::new();
        assert_eq!(store.read().unwrap(), UsageRecord::default());
    }

    #[test]
    fn test_memory_store_string_values() {
        let mut store = MemoryQuotaStore::new();
        store
            .write(&UsageRecord {
                date: "Wed Oct 14 2026".to_string(),
                count: 3,
            })
            .unwrap();

        assert_eq!(store.get(DATE_KEY), Some("Wed Oct 14 2026"));
        assert_eq!(store.get(COUNT_KEY), Some("3"));
    }

    #[test]
    fn test_malformed_count_reads_as_zero() {
        let store = MemoryQuotaStore::with_entries([
            (DATE_KEY, "Wed Oct 14 2026"),
            (COUNT_KEY, "abc"),
        ]);
        assert_eq!(store.read().unwrap().count, 0);
    }

    #[test]
    fn test_file_store_missing_file() {
        let store = FileQuotaStore::new(temp_path("missing.json"));
        assert_eq!(store.read().unwrap(), UsageRecord::default());
    }

    #[test]
    fn test_file_store_persists_and_keeps_other_keys() {
        let path = temp_path("quota.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let mut store = FileQuotaStore::new(&path);
        let record = UsageRecord {
            date: "Wed Oct 14 2026".to_string(),
            count: 2,
        };
        store.write(&record).unwrap();

        let reopened = FileQuotaStore::new(&path);
        assert_eq!(reopened.read().unwrap(), record);

        let raw: Entries = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(raw.get(COUNT_KEY).map(String::as_str), Some("2"));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_file_store_corrupt_json() {
        let path = temp_path("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let store = FileQuotaStore::new(&path);
        assert!(matches!(store.read(), Err(QuotaError::Serialization(_))));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
