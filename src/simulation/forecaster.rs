use tracing::debug;

use crate::domain_types::{Accuracy, Bar, Series};
use crate::simulation::random::RandomSource;
use crate::utils::{next_trading_day, round_currency};

/// 移動平均視窗預設長度
pub const DEFAULT_TREND_WINDOW: usize = 5;

/// 預測數據點的開高低相對預測收盤的比例
const PREDICTED_OPEN_RATIO: f64 = 0.998;
const PREDICTED_HIGH_RATIO: f64 = 1.01;
const PREDICTED_LOW_RATIO: f64 = 0.99;

/// 預測數據點成交量相對前一日的隨機比例
const PREDICTED_VOLUME_MIN: f64 = 0.8;
const PREDICTED_VOLUME_MAX: f64 = 1.2;

/// 趨勢外推預測器
///
/// `prediction = last + (last - avg(trailing window)) + noise`，
/// 雜訊在 `±last * (100 - accuracy) / 100` 內均勻分布。
#[derive(Debug, Clone, Copy)]
pub struct Forecaster {
    window: usize,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self {
            window: DEFAULT_TREND_WINDOW,
        }
    }
}

impl Forecaster {
    /// 自訂移動平均視窗，最小為 1
    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// 不含雜訊的外推值；空序列回傳 None
    pub fn perfect_prediction(&self, series: &Series) -> Option<f64> {
        let last = series.last()?;
        let window = series.trailing(self.window);
        let avg_close = window.iter().map(|bar| bar.close).sum::<f64>() / window.len() as f64;
        let trend = last.close - avg_close;
        Some(last.close + trend)
    }

    /// 預測下一交易日收盤價
    ///
    /// 空序列回傳 None（無可用預測），不抽取亂數。
    pub fn predict<R>(&self, series: &Series, accuracy: Accuracy, rng: &mut R) -> Option<f64>
    where
        R: RandomSource + ?Sized,
    {
        let perfect = self.perfect_prediction(series)?;
        let last_close = series.last()?.close;

        let error_range = last_close * accuracy.error_fraction();
        let error = rng.uniform(-error_range, error_range);
        let prediction = round_currency(perfect + error);

        debug!(
            symbol = series.symbol(),
            last_close,
            perfect,
            error_range,
            prediction,
            "已產生預測"
        );

        Some(prediction)
    }

    /// 回傳附加預測數據點的新序列
    ///
    /// 預測日期為最後一筆之後的下一個交易日。空序列原樣複製返回。
    pub fn append_prediction<R>(&self, series: &Series, prediction: f64, rng: &mut R) -> Series
    where
        R: RandomSource + ?Sized,
    {
        let Some(last) = series.last() else {
            return series.clone();
        };

        let volume_ratio = rng.uniform(PREDICTED_VOLUME_MIN, PREDICTED_VOLUME_MAX);
        let bar = Bar {
            date: next_trading_day(last.date),
            open: prediction * PREDICTED_OPEN_RATIO,
            high: prediction * PREDICTED_HIGH_RATIO,
            low: prediction * PREDICTED_LOW_RATIO,
            close: prediction,
            volume: (last.volume as f64 * volume_ratio).round() as u64,
            predicted: Some(prediction),
        };

        series.with_bar(bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::random::ScriptedSource;
    use chrono::NaiveDate;

    fn series_from_closes(closes: &[f64]) -> Series {
        // 2024-01-01 為週一
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = crate::utils::trading_days_between(start, start + chrono::Duration::days(60))
            .zip(closes)
            .map(|(date, &close)| Bar {
                date,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000_000,
                predicted: None,
            })
            .collect();
        Series::from_bars("AAPL", bars)
    }

    #[test]
    fn test_empty_series_has_no_prediction() {
        let mut rng = ScriptedSource::constant(0.3);
        let empty = Series::new("AAPL");
        assert_eq!(
            Forecaster::default().predict(&empty, Accuracy::new(85.0).unwrap(), &mut rng),
            None
        );
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_perfect_accuracy_is_pure_extrapolation() {
        // 最後 5 筆平均 = 104，趨勢 = +2
        let series = series_from_closes(&[50.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
        let mut rng = ScriptedSource::constant(0.9);
        let prediction = Forecaster::default().predict(&series, Accuracy::PERFECT, &mut rng);
        assert_eq!(prediction, Some(108.0));
    }

    #[test]
    fn test_short_series_uses_available_bars() {
        let series = series_from_closes(&[100.0, 110.0]);
        assert_eq!(Forecaster::default().perfect_prediction(&series), Some(115.0));
    }

    #[test]
    fn test_error_envelope() {
        let series = series_from_closes(&[100.0, 100.0, 100.0]);
        let accuracy = Accuracy::new(90.0).unwrap();
        let forecaster = Forecaster::default();

        let low = forecaster.predict(&series, accuracy, &mut ScriptedSource::constant(0.0));
        let high = forecaster.predict(&series, accuracy, &mut ScriptedSource::constant(1.0));
        assert_eq!(low, Some(90.0));
        assert_eq!(high, Some(110.0));
    }

    #[test]
    fn test_append_prediction() {
        // 最後一筆為 2024-01-05 (五)
        let series = series_from_closes(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        let snapshot = series.clone();
        let mut rng = ScriptedSource::constant(0.5);

        let extended = Forecaster::default().append_prediction(&series, 110.0, &mut rng);

        assert_eq!(series, snapshot);
        assert_eq!(extended.len(), series.len() + 1);

        let bar = extended.last().unwrap();
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(bar.close, 110.0);
        assert_eq!(bar.predicted, Some(110.0));
        assert_eq!(bar.open, 110.0 * 0.998);
        assert_eq!(bar.high, 110.0 * 1.01);
        assert_eq!(bar.low, 110.0 * 0.99);
        assert_eq!(bar.volume, 1_000_000);
        assert_eq!(extended.prediction(), Some(110.0));
    }

    #[test]
    fn test_predicted_bar_prices_are_not_rounded() {
        let series = series_from_closes(&[100.0, 100.0]);
        let extended =
            Forecaster::default().append_prediction(&series, 100.05, &mut ScriptedSource::constant(0.5));

        let bar = extended.last().unwrap();
        assert_eq!(bar.open, 100.05 * 0.998);
        assert_eq!(bar.high, 100.05 * 1.01);
        assert_eq!(bar.low, 100.05 * 0.99);
        assert_eq!(bar.close, 100.05);
        assert!(bar.low <= bar.open && bar.open <= bar.high);
    }

    #[test]
    fn test_append_to_empty_series() {
        let empty = Series::new("AAPL");
        let mut rng = ScriptedSource::constant(0.5);
        let result = Forecaster::default().append_prediction(&empty, 100.0, &mut rng);
        assert!(result.is_empty());
    }
}
