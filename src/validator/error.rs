use chrono::NaiveDate;
use thiserror::Error;

/// 數據驗證錯誤
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{date} 價格不一致: {description}")]
    InconsistentPrices { date: NaiveDate, description: String },

    #[error("{date} 的{field}必須為正數，實際為 {value}")]
    NonPositivePrice {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },

    #[error("{date} 的{field}為無效數值（NaN 或無限大）")]
    InvalidNumber { date: NaiveDate, field: &'static str },

    #[error("{date} 為週末，不是交易日")]
    WeekendDate { date: NaiveDate },

    #[error("時間順序錯誤: {previous} 之後出現 {current}")]
    OutOfOrder {
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("{date} 帶有預測值，但不是序列最後一筆")]
    MisplacedPrediction { date: NaiveDate },

    #[error("{date} 的預測值 {predicted} 與收盤價 {close} 不一致")]
    PredictionMismatch {
        date: NaiveDate,
        predicted: f64,
        close: f64,
    },
}

impl ValidationError {
    /// 錯誤類型名稱，用於報告彙總
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InconsistentPrices { .. } => "InconsistentPrices",
            ValidationError::NonPositivePrice { .. } => "NonPositivePrice",
            ValidationError::InvalidNumber { .. } => "InvalidNumber",
            ValidationError::WeekendDate { .. } => "WeekendDate",
            ValidationError::OutOfOrder { .. } => "OutOfOrder",
            ValidationError::MisplacedPrediction { .. } => "MisplacedPrediction",
            ValidationError::PredictionMismatch { .. } => "PredictionMismatch",
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
