use serde::{Deserialize, Serialize};

use crate::domain_types::OhlcQuote;
use crate::simulation::random::RandomSource;
use crate::utils::round_currency;

/// 隨機漫步參數（百分比）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkParameters {
    /// 收盤相對前收的最大漲跌幅
    pub max_daily_change_pct: f64,
    /// 開盤相對前收的最大跳空
    pub max_open_gap_pct: f64,
    /// 高低點延伸幅度下限
    pub min_volatility_pct: f64,
    /// 高低點延伸幅度上限
    pub max_volatility_pct: f64,
}

impl Default for WalkParameters {
    fn default() -> Self {
        Self {
            max_daily_change_pct: 3.0,
            max_open_gap_pct: 1.0,
            min_volatility_pct: 1.0,
            max_volatility_pct: 2.0,
        }
    }
}

/// 由前一日收盤價產生下一日 OHLC 報價
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceWalker {
    params: WalkParameters,
}

impl PriceWalker {
    pub fn new(params: WalkParameters) -> Self {
        Self { params }
    }

    /// 產生下一日報價
    ///
    /// `prev_close` 必須為正數，否則結果為 NaN 或負價格。
    /// 亂數依序抽取：漲跌幅、開盤跳空、波動幅度。
    pub fn next_bar<R>(&self, prev_close: f64, rng: &mut R) -> OhlcQuote
    where
        R: RandomSource + ?Sized,
    {
        let p = &self.params;

        let daily_change = rng.uniform(-p.max_daily_change_pct, p.max_daily_change_pct) / 100.0;
        let open = prev_close * (1.0 + rng.uniform(-p.max_open_gap_pct, p.max_open_gap_pct) / 100.0);
        let close = prev_close * (1.0 + daily_change);

        let volatility = rng.uniform(p.min_volatility_pct, p.max_volatility_pct) / 100.0;
        let high = open.max(close) * (1.0 + volatility);
        let low = open.min(close) * (1.0 - volatility);

        // 捨入為單調函數，不會破壞高低點與開收盤的大小關係
        OhlcQuote {
            open: round_currency(open),
            high: round_currency(high),
            low: round_currency(low),
            close: round_currency(close),
        }
    }
}
