use chrono::NaiveDate;
use serde::Serialize;

use crate::domain_types::{Accuracy, Series};
use crate::utils::{next_trading_day, percent_change, round_currency};

/// 準確率低於此值時，預測僅供參考
pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f64 = 85.0;

/// 預期區間相對預測值的寬度
const EXPECTED_BAND: f64 = 0.02;

/// 預測結果的展示資訊
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutlook {
    pub target_date: NaiveDate,
    pub predicted_close: f64,
    pub last_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub expected_low: f64,
    pub expected_high: f64,
    pub accuracy: Accuracy,
    pub low_confidence: bool,
}

impl PredictionOutlook {
    /// 依最後一筆數據建立展示資訊；空序列回傳 None
    pub fn new(series: &Series, prediction: f64, accuracy: Accuracy) -> Option<Self> {
        let last = series.last()?;
        Some(Self {
            target_date: next_trading_day(last.date),
            predicted_close: prediction,
            last_close: last.close,
            change: round_currency(prediction - last.close),
            change_percent: percent_change(last.close, prediction),
            expected_low: round_currency(prediction * (1.0 - EXPECTED_BAND)),
            expected_high: round_currency(prediction * (1.0 + EXPECTED_BAND)),
            accuracy,
            low_confidence: accuracy.percent() < DEFAULT_LOW_CONFIDENCE_THRESHOLD,
        })
    }

    /// 以自訂門檻重新判斷信心程度
    pub fn with_low_confidence_threshold(mut self, threshold: f64) -> Self {
        self.low_confidence = self.accuracy.percent() < threshold;
        self
    }

    pub fn is_up(&self) -> bool {
        self.change > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::Bar;

    fn friday_series() -> Series {
        Series::from_bars(
            "AAPL",
            vec![Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                open: 99.0,
                high: 101.0,
                low: 98.0,
                close: 100.0,
                volume: 1_000,
                predicted: None,
            }],
        )
    }

    #[test]
    fn test_outlook_values() {
        let outlook =
            PredictionOutlook::new(&friday_series(), 110.0, Accuracy::new(90.0).unwrap()).unwrap();

        assert_eq!(outlook.target_date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(outlook.change, 10.0);
        assert!((outlook.change_percent - 10.0).abs() < 1e-9);
        assert_eq!(outlook.expected_low, 107.8);
        assert_eq!(outlook.expected_high, 112.2);
        assert!(outlook.is_up());
        assert!(!outlook.low_confidence);
    }

    #[test]
    fn test_low_confidence() {
        let outlook =
            PredictionOutlook::new(&friday_series(), 95.0, Accuracy::new(72.5).unwrap()).unwrap();
        assert!(outlook.low_confidence);
        assert!(!outlook.is_up());

        let relaxed = outlook.with_low_confidence_threshold(70.0);
        assert!(!relaxed.low_confidence);
    }

    #[test]
    fn test_empty_series() {
        assert!(PredictionOutlook::new(&Series::new("AAPL"), 100.0, Accuracy::PERFECT).is_none());
    }
}
