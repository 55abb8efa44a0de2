pub mod accuracy;
pub mod bar;
pub mod prediction;
pub mod series;
pub mod summary;
pub mod symbol;
pub mod time_range;

pub use accuracy::Accuracy;
pub use bar::{Bar, OhlcQuote};
pub use prediction::PredictionOutlook;
pub use series::Series;
pub use summary::SeriesSummary;
pub use symbol::{Liquidity, Market, SymbolProfile, SymbolTable};
pub use time_range::TimeRange;

/// 領域類型建構錯誤
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// 模型準確率必須落在 (0, 100]
    #[error("無效的準確率: {0}，必須介於 (0, 100]")]
    InvalidAccuracy(f64),

    /// 時間範圍天數必須為正整數
    #[error("無效的時間範圍: {0} 天")]
    InvalidTimeRange(u32),

    /// 無法解析的時間範圍字串
    #[error("無法解析時間範圍: {0}")]
    UnparsableTimeRange(String),
}
