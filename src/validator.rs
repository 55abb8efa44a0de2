//! 資料驗證器模組
//!
//! 確保生成或外部提供的日線序列符合不變量。
//!
//! # 主要功能
//!
//! - **價格一致性**：`low <= min(open, close) <= max(open, close) <= high`
//! - **數值檢查**：價格須為正的有限數值
//! - **交易日曆**：不得出現週末日期，日期嚴格遞增
//! - **預測標記**：只有尾端數據點可帶預測值，且收盤價等於預測值
//!
//! # 使用範例
//!
//! ```rust,ignore
//! use market_simulator::validator::SeriesValidator;
//!
//! let report = SeriesValidator::new().validate(&series);
//! assert!(report.is_valid(), "{}", report.format_text());
//! ```

pub mod bar_validator;
pub mod error;
pub mod report;
pub mod series_validator;
pub mod traits;

// 重新導出常用類型
pub use bar_validator::BarValidator;
pub use error::{ValidationError, ValidationResult};
pub use report::{DetailedError, ValidationReport};
pub use series_validator::SeriesValidator;
pub use traits::Validator;
