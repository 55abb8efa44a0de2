use super::error::{ValidationError, ValidationResult};
use super::traits::Validator;
use crate::domain_types::Bar;
use crate::utils::is_trading_day;

/// 單筆日線驗證器
#[derive(Debug, Clone, Copy)]
pub struct BarValidator {
    /// 是否拒絕週末日期
    require_trading_day: bool,
}

impl Default for BarValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl BarValidator {
    /// 創建新的驗證器（預設檢查交易日）
    pub fn new() -> Self {
        Self {
            require_trading_day: true,
        }
    }

    pub fn allow_weekends(mut self) -> Self {
        self.require_trading_day = false;
        self
    }

    /// 驗證價格為正的有限數值
    fn validate_numbers(&self, bar: &Bar) -> ValidationResult<()> {
        let prices = [
            ("開盤價", bar.open),
            ("最高價", bar.high),
            ("最低價", bar.low),
            ("收盤價", bar.close),
        ];

        for (field, value) in prices {
            if !value.is_finite() {
                return Err(ValidationError::InvalidNumber {
                    date: bar.date,
                    field,
                });
            }
            if value <= 0.0 {
                return Err(ValidationError::NonPositivePrice {
                    date: bar.date,
                    field,
                    value,
                });
            }
        }

        Ok(())
    }

    /// 驗證價格一致性
    fn validate_price_consistency(&self, bar: &Bar) -> ValidationResult<()> {
        if bar.high < bar.low {
            return Err(ValidationError::InconsistentPrices {
                date: bar.date,
                description: format!("最高價 ({}) 低於最低價 ({})", bar.high, bar.low),
            });
        }

        if bar.high < bar.open || bar.high < bar.close {
            return Err(ValidationError::InconsistentPrices {
                date: bar.date,
                description: format!(
                    "最高價 ({}) 必須大於等於開盤價 ({}) 和收盤價 ({})",
                    bar.high, bar.open, bar.close
                ),
            });
        }

        if bar.low > bar.open || bar.low > bar.close {
            return Err(ValidationError::InconsistentPrices {
                date: bar.date,
                description: format!(
                    "最低價 ({}) 必須小於等於開盤價 ({}) 和收盤價 ({})",
                    bar.low, bar.open, bar.close
                ),
            });
        }

        Ok(())
    }
}

impl Validator for BarValidator {
    type Data = Bar;

    fn name(&self) -> &str {
        "BarValidator"
    }

    fn validate_record(&self, bar: &Bar) -> ValidationResult<()> {
        self.validate_numbers(bar)?;
        self.validate_price_consistency(bar)?;

        if self.require_trading_day && !is_trading_day(bar.date) {
            return Err(ValidationError::WeekendDate { date: bar.date });
        }

        Ok(())
    }
}
