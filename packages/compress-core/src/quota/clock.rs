use chrono::{Local, NaiveDate};
use std::cell::Cell;

/// 現在の暦日を返す時刻ソース
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// ホストのローカル日付
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 任意の日付を返す時刻ソース（テスト用）
#[derive(Debug)]
pub struct FixedClock {
    date: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Cell::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    /// 日付を1日進める
    pub fn advance_day(&self) {
        if let Some(next) = self.date.get().succ_opt() {
            self.date.set(next);
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}
