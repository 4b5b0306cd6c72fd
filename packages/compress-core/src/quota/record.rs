use chrono::NaiveDate;

/// 永続化される (日付, 回数) の組
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageRecord {
    /// 暦日の文字列表現（`day_string` 参照）
    pub date: String,
    pub count: u32,
}

impl UsageRecord {
    /// 指定日の 0 回レコード
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            date: day_string(today),
            count: 0,
        }
    }

    pub fn is_for(&self, today: NaiveDate) -> bool {
        self.date == day_string(today)
    }
}

/// 暦日を `Wed Oct 14 2026` 形式で表す
pub fn day_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}
