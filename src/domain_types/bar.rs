use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 單日 OHLC 報價（不含成交量）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcQuote {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcQuote {
    /// 檢查 `low <= min(open, close) <= max(open, close) <= high`
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }
}

/// 日線數據點結構
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// 僅預測產生的尾端數據點會帶有此值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted: Option<f64>,
}

impl Bar {
    /// 由報價與成交量建立一般（非預測）數據點
    pub fn from_quote(date: NaiveDate, quote: OhlcQuote, volume: u64) -> Self {
        Self {
            date,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume,
            predicted: None,
        }
    }

    /// 取出 OHLC 報價部分
    pub fn quote(&self) -> OhlcQuote {
        OhlcQuote {
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        }
    }

    pub fn is_predicted(&self) -> bool {
        self.predicted.is_some()
    }

    /// 當日振幅百分比 `(high - low) / low * 100`
    pub fn range_percent(&self) -> f64 {
        (self.high - self.low) / self.low * 100.0
    }
}
