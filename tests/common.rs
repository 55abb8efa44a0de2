#![allow(dead_code)]

use chrono::NaiveDate;
use market_simulator::domain_types::{Bar, Series};
use market_simulator::simulation::{FixedClock, RngSource, SeriesGenerator};

/// 2024-03-16 為週六
pub fn saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()
}

/// 2024-03-13 為週三
pub fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
}

pub fn generator_at(date: NaiveDate) -> SeriesGenerator<FixedClock> {
    SeriesGenerator::new(FixedClock(date))
}

pub fn seeded(seed: u64) -> RngSource {
    RngSource::seeded(seed)
}

/// 以指定收盤價建立連續交易日的測試序列
pub fn series_with_closes(symbol: &str, start: NaiveDate, closes: &[f64]) -> Series {
    let mut date = start;
    let bars = closes
        .iter()
        .map(|&close| {
            while !market_simulator::utils::is_trading_day(date) {
                date = date.succ_opt().unwrap();
            }
            let bar = Bar {
                date,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000_000,
                predicted: None,
            };
            date = date.succ_opt().unwrap();
            bar
        })
        .collect();
    Series::from_bars(symbol, bars)
}
