use chrono::{NaiveDate, Utc};

/// 可注入的日期來源，作為生成區間的錨點
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 系統時鐘（UTC 日期）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// 固定日期，用於測試
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
