use crate::constants::DAILY_FREE_LIMIT;
use crate::errors::QuotaError;
use crate::quota::clock::Clock;
use crate::quota::record::UsageRecord;
use crate::quota::store::QuotaStore;

/// 1日あたりの無料利用回数を管理する
///
/// 日付の比較は読み込み時に行い、日付が変わっていれば回数を 0 に戻して保存する
pub struct QuotaTracker<S, C> {
    store: S,
    clock: C,
    limit: u32,
}

impl<S: QuotaStore, C: Clock> QuotaTracker<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_limit(store, clock, DAILY_FREE_LIMIT)
    }

    pub fn with_limit(store: S, clock: C, limit: u32) -> Self {
        Self {
            store,
            clock,
            limit,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 今日のレコードを返す。日付が古ければリセットして保存する
    pub fn today(&mut self) -> Result<UsageRecord, QuotaError> {
        let today = self.clock.today();
        let record = self.store.read()?;
        if record.is_for(today) {
            return Ok(record);
        }

        let fresh = UsageRecord::fresh(today);
        tracing::info!(
            previous_date = %record.date,
            previous_count = record.count,
            date = %fresh.date,
            "new day, resetting compression count"
        );
        self.store.write(&fresh)?;
        Ok(fresh)
    }

    /// 今日の回数が上限未満なら true
    pub fn check_and_gate(&mut self) -> Result<bool, QuotaError> {
        let record = self.today()?;
        Ok(record.count < self.limit)
    }

    /// 残り回数
    pub fn remaining(&mut self) -> Result<u32, QuotaError> {
        let record = self.today()?;
        Ok(self.limit.saturating_sub(record.count))
    }

    /// 成功した圧縮を1回記録する。圧縮が成功した後にのみ呼ぶこと
    pub fn record_use(&mut self) -> Result<UsageRecord, QuotaError> {
        let mut record = self.today()?;
        record.count = record.count.saturating_add(1);
        self.store.write(&record)?;

        tracing::info!(date = %record.date, count = record.count, limit = self.limit, "compression recorded");
        Ok(record)
    }
}
