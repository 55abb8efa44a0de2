use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain_types::{Bar, Series, SymbolProfile, SymbolTable};
use crate::simulation::clock::Clock;
use crate::simulation::price_walker::PriceWalker;
use crate::simulation::random::RandomSource;
use crate::utils::{trading_days_between, window_start};

/// 成交量對價格變動幅度的放大倍數
const VOLUME_VARIATION_FACTOR: f64 = 10.0;

/// 預先配置的數據點上限，更長的區間由 Vec 自行擴充
const MAX_PREALLOCATED_BARS: usize = 4096;

/// 日線序列生成器
///
/// 以 `clock` 提供的日期為終點，回溯指定天數，對每個交易日呼叫 [`PriceWalker`]，
/// 前一日收盤價作為下一日的起點。
#[derive(Debug, Clone)]
pub struct SeriesGenerator<C> {
    clock: C,
    walker: PriceWalker,
}

impl<C: Clock> SeriesGenerator<C> {
    /// 使用預設漫步參數
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            walker: PriceWalker::default(),
        }
    }

    pub fn with_walker(mut self, walker: PriceWalker) -> Self {
        self.walker = walker;
        self
    }

    /// 生成 `[today - days, today]` 區間內每個交易日的數據
    ///
    /// `days == 0` 或起始日期超出日曆範圍時回傳空序列。
    pub fn generate<R>(&self, days: u32, symbol: &str, rng: &mut R) -> Series
    where
        R: RandomSource + ?Sized,
    {
        if days == 0 {
            debug!(symbol, "天數為 0，回傳空序列");
            return Series::new(symbol);
        }

        let end = self.clock.today();
        let Some(start) = window_start(end, days) else {
            warn!(symbol, days, "回溯天數超出日曆範圍，回傳空序列");
            return Series::new(symbol);
        };
        self.generate_between(start, end, symbol, rng)
    }

    /// 生成 `[start, end]` 閉區間內每個交易日的數據
    pub fn generate_between<R>(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        symbol: &str,
        rng: &mut R,
    ) -> Series
    where
        R: RandomSource + ?Sized,
    {
        let profile = self.resolve(symbol);
        let volume_base = profile.liquidity.volume_base();

        let capacity = usize::try_from((end - start).num_days().max(0) + 1)
            .unwrap_or_default()
            .min(MAX_PREALLOCATED_BARS);
        let mut series = Series::with_capacity(symbol, capacity);
        let mut prev_close = profile.base_price;

        for date in trading_days_between(start, end) {
            let quote = self.walker.next_bar(prev_close, rng);

            let variation = (quote.close - prev_close).abs() / prev_close;
            let volume = (volume_base * (1.0 + variation * VOLUME_VARIATION_FACTOR)).round() as u64;

            series.push(Bar::from_quote(date, quote, volume));
            prev_close = quote.close;
        }

        debug!(
            symbol,
            bars = series.len(),
            start = %start,
            end = %end,
            "已生成模擬日線序列"
        );

        series
    }

    fn resolve(&self, symbol: &str) -> &'static SymbolProfile {
        let symbols = SymbolTable::builtin();
        if !symbols.is_known(symbol) {
            debug!(symbol, base_price = symbols.fallback().base_price, "未知標的，使用預設起始價格");
        }
        symbols.resolve(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::clock::FixedClock;
    use crate::simulation::price_walker::WalkParameters;
    use crate::simulation::random::{RngSource, ScriptedSource};
    use chrono::Datelike;

    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()
    }

    #[test]
    fn test_zero_days_is_empty() {
        let generator = SeriesGenerator::new(FixedClock(saturday()));
        let series = generator.generate(0, "AAPL", &mut RngSource::seeded(1));
        assert!(series.is_empty());
        assert_eq!(series.symbol(), "AAPL");
    }

    #[test]
    fn test_days_beyond_calendar_is_empty() {
        let generator = SeriesGenerator::new(FixedClock(saturday()));
        let mut rng = ScriptedSource::constant(0.5);
        let series = generator.generate(u32::MAX, "AAPL", &mut rng);

        assert!(series.is_empty());
        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_custom_walker() {
        let flat = WalkParameters {
            max_daily_change_pct: 0.0,
            max_open_gap_pct: 0.0,
            min_volatility_pct: 0.0,
            max_volatility_pct: 0.0,
        };
        let generator = SeriesGenerator::new(FixedClock(saturday())).with_walker(PriceWalker::new(flat));
        let series = generator.generate(14, "TSLA", &mut RngSource::seeded(4));

        assert_eq!(series.len(), 10);
        for bar in &series {
            assert_eq!((bar.open, bar.high, bar.low, bar.close), (220.0, 220.0, 220.0, 220.0));
            assert_eq!(bar.volume, 40_000_000);
        }
    }

    #[test]
    fn test_week_anchored_on_saturday() {
        // 2024-03-09 (六) 至 2024-03-16 (六)：週一至週五共 5 天
        let generator = SeriesGenerator::new(FixedClock(saturday()));
        let series = generator.generate(7, "AAPL", &mut RngSource::seeded(1));

        assert_eq!(series.len(), 5);
        assert_eq!(series.start_date(), NaiveDate::from_ymd_opt(2024, 3, 11));
        assert_eq!(series.end_date(), NaiveDate::from_ymd_opt(2024, 3, 15));
    }

    #[test]
    fn test_flat_walk_volume() {
        // 中點抽樣使價格不變，成交量等於基數
        let generator = SeriesGenerator::new(FixedClock(saturday()));
        let mut rng = ScriptedSource::constant(0.5);

        let aapl = generator.generate(7, "AAPL", &mut rng);
        assert!(aapl.iter().all(|bar| bar.close == 180.0 && bar.volume == 80_000_000));

        let msft = generator.generate(7, "MSFT", &mut rng);
        assert!(msft.iter().all(|bar| bar.close == 350.0 && bar.volume == 40_000_000));
    }

    #[test]
    fn test_volume_scales_with_move() {
        // 每日 +3%：成交量 = 基數 * (1 + 0.03 * 10)
        let generator = SeriesGenerator::new(FixedClock(saturday()));
        let mut rng = ScriptedSource::new(vec![1.0, 0.5, 0.5]);
        let series = generator.generate(1, "UNKNOWN", &mut rng);

        // 區間 2024-03-15 (五) 至 03-16 (六)，僅一個交易日
        assert_eq!(series.len(), 1);
        let bar = &series.bars()[0];
        assert_eq!(bar.close, 103.0);
        assert_eq!(bar.volume, 52_000_000);
    }

    #[test]
    fn test_random_walk_chains_closes() {
        let generator = SeriesGenerator::new(FixedClock(saturday()));
        let series = generator.generate(90, "TCS", &mut RngSource::seeded(3));

        for pair in series.bars().windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            assert!(curr.date > prev.date);
            assert!(curr.close >= prev.close * 0.97 - 0.01);
            assert!(curr.close <= prev.close * 1.03 + 0.01);
            assert!(curr.date.weekday().num_days_from_monday() < 5);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = SeriesGenerator::new(FixedClock(saturday()));
        let a = generator.generate(30, "INFY", &mut RngSource::seeded(11));
        let b = generator.generate(30, "INFY", &mut RngSource::seeded(11));
        assert_eq!(a, b);
    }
}
