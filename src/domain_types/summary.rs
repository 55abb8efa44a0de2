use serde::Serialize;

use crate::domain_types::series::Series;
use crate::utils::percent_change;

/// 時間序列的區間統計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub bar_count: usize,
    /// 最新收盤價
    pub latest_close: f64,
    /// 相對前一日收盤的漲跌
    pub change: f64,
    pub percent_change: f64,
    pub period_high: f64,
    pub period_low: f64,
    /// `(high - low) / low * 100`
    pub range_percent: f64,
    pub average_close: f64,
    pub average_volume: f64,
    pub highest_volume: u64,
    pub total_volume: u64,
    /// 每日振幅百分比的平均
    pub average_daily_range_percent: f64,
    /// 首日收盤至最後收盤的報酬率
    pub period_return_percent: f64,
}

impl SeriesSummary {
    /// 計算統計值；空序列回傳 None
    pub fn from_series(series: &Series) -> Option<Self> {
        let first = series.first()?;
        let latest = series.last()?;
        let bars = series.bars();
        let count = bars.len() as f64;

        // 只有一筆時以自身作為前一日
        let previous = if bars.len() > 1 { &bars[bars.len() - 2] } else { latest };
        let change = latest.close - previous.close;

        let period_high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let period_low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);

        let total_volume: u64 = bars.iter().map(|b| b.volume).sum();
        let highest_volume = bars.iter().map(|b| b.volume).max().unwrap_or(0);

        Some(Self {
            bar_count: bars.len(),
            latest_close: latest.close,
            change,
            percent_change: percent_change(previous.close, latest.close),
            period_high,
            period_low,
            range_percent: percent_change(period_low, period_high),
            average_close: bars.iter().map(|b| b.close).sum::<f64>() / count,
            average_volume: total_volume as f64 / count,
            highest_volume,
            total_volume,
            average_daily_range_percent: bars.iter().map(|b| b.range_percent()).sum::<f64>() / count,
            period_return_percent: percent_change(first.close, latest.close),
        })
    }
}
