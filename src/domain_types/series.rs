use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain_types::bar::Bar;

/// 單一標的的日線時間序列
///
/// 序列建立後視為不可變值：任何轉換（例如附加預測）都會產生新的序列，
/// 原序列內容維持不變。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
}

impl Series {
    /// 創建空的時間序列
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    /// 以既有數據點建立序列，不做排序或驗證（見 `validator::SeriesValidator`）
    pub fn from_bars(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// 預留容量的空序列
    pub(crate) fn with_capacity(symbol: impl Into<String>, capacity: usize) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::with_capacity(capacity),
        }
    }

    /// 生成過程中追加數據點 (內部輔助函數)
    pub(crate) fn push(&mut self, bar: Bar) {
        self.bars.push(bar);
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    /// 獲取數據點數量
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 檢查是否為空
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// 最多取最後 `n` 個數據點
    pub fn trailing(&self, n: usize) -> &[Bar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.first().map(|bar| bar.date)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.last().map(|bar| bar.date)
    }

    /// 尾端預測值（若最後一個數據點為預測）
    pub fn prediction(&self) -> Option<f64> {
        self.last().and_then(|bar| bar.predicted)
    }

    /// 回傳附加了 `bar` 的新序列，原序列不受影響
    pub fn with_bar(&self, bar: Bar) -> Series {
        let mut bars = Vec::with_capacity(self.bars.len() + 1);
        bars.extend_from_slice(&self.bars);
        bars.push(bar);
        Series {
            symbol: self.symbol.clone(),
            bars,
        }
    }

    /// 獲取收盤價數組
    pub fn close_prices(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
            predicted: None,
        }
    }

    #[test]
    fn test_series_accessors() {
        let series = Series::from_bars("AAPL", vec![bar(2, 100.0), bar(3, 101.0), bar(4, 102.0)]);

        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.close_prices(), vec![100.0, 101.0, 102.0]);
        assert_eq!(series.start_date(), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(series.end_date(), NaiveDate::from_ymd_opt(2024, 1, 4));
        assert_eq!(series.prediction(), None);
    }

    #[test]
    fn test_trailing_window() {
        let series = Series::from_bars("AAPL", (2..=10).map(|d| bar(d, d as f64)).collect());
        let window = series.trailing(5);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].close, 6.0);

        let short = Series::from_bars("AAPL", vec![bar(2, 1.0), bar(3, 2.0)]);
        assert_eq!(short.trailing(5).len(), 2);
        assert!(Series::new("AAPL").trailing(5).is_empty());
    }

    #[test]
    fn test_with_bar_leaves_original_untouched() {
        let original = Series::from_bars("MSFT", vec![bar(2, 100.0)]);
        let snapshot = original.clone();

        let extended = original.with_bar(bar(3, 101.0));

        assert_eq!(original, snapshot);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.symbol(), "MSFT");
    }
}
