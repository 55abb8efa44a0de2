//! 合成行情模擬模組
//!
//! 以隨機漫步生成日線數據，並以簡單的趨勢外推產生下一交易日的預測。
//!
//! # 主要組件
//!
//! - **PriceWalker**：由前一日收盤價產生單日 OHLC 報價
//! - **SeriesGenerator**：在日曆區間上驅動 PriceWalker，跳過週末並推算成交量
//! - **Forecaster**：趨勢外推加上依準確率縮放的雜訊，並可附加預測數據點
//! - **ModelTrainer**：模擬模型訓練，延遲後給出隨機準確率
//!
//! 所有組件都透過 [`RandomSource`] 與 [`Clock`] 注入隨機來源與當前日期，
//! 測試時可使用固定種子或腳本化序列重現結果。
//!
//! # 使用範例
//!
//! ```rust,ignore
//! use market_simulator::simulation::{Forecaster, RngSource, SeriesGenerator, SystemClock};
//! use market_simulator::domain_types::Accuracy;
//!
//! let mut rng = RngSource::seeded(42);
//! let generator = SeriesGenerator::new(SystemClock);
//! let series = generator.generate(30, "AAPL", &mut rng);
//!
//! let forecaster = Forecaster::default();
//! if let Some(prediction) = forecaster.predict(&series, Accuracy::new(85.0)?, &mut rng) {
//!     let with_prediction = forecaster.append_prediction(&series, prediction, &mut rng);
//! }
//! ```

pub mod clock;
pub mod forecaster;
pub mod price_walker;
pub mod random;
pub mod series_generator;
pub mod trainer;

// 重新導出常用類型
pub use clock::{Clock, FixedClock, SystemClock};
pub use forecaster::Forecaster;
pub use price_walker::{PriceWalker, WalkParameters};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use series_generator::SeriesGenerator;
pub use trainer::ModelTrainer;
