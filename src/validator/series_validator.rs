use super::bar_validator::BarValidator;
use super::error::ValidationError;
use super::report::ValidationReport;
use super::traits::Validator;
use crate::domain_types::Series;

/// 時間序列驗證器
///
/// 逐筆套用 [`BarValidator`]，並檢查日期嚴格遞增與預測標記的位置。
#[derive(Debug, Clone, Default)]
pub struct SeriesValidator {
    bar_validator: BarValidator,
}

impl SeriesValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bar_validator(mut self, bar_validator: BarValidator) -> Self {
        self.bar_validator = bar_validator;
        self
    }

    /// 驗證整個序列並產生報告
    pub fn validate(&self, series: &Series) -> ValidationReport {
        let bars = series.bars();
        let mut report = ValidationReport::new(format!("SeriesValidator({})", series.symbol()), bars.len());

        if let Err(errors) = self.bar_validator.validate_batch(bars) {
            for (index, error) in &errors {
                report.add_error(*index, error);
            }
        }

        for (index, pair) in bars.windows(2).enumerate() {
            let (prev, curr) = (&pair[0], &pair[1]);
            if curr.date <= prev.date {
                report.add_error(
                    index + 1,
                    &ValidationError::OutOfOrder {
                        previous: prev.date,
                        current: curr.date,
                    },
                );
            }
        }

        let last_index = bars.len().saturating_sub(1);
        for (index, bar) in bars.iter().enumerate() {
            let Some(predicted) = bar.predicted else {
                continue;
            };
            if index != last_index {
                report.add_error(index, &ValidationError::MisplacedPrediction { date: bar.date });
            }
            if predicted != bar.close {
                report.add_error(
                    index,
                    &ValidationError::PredictionMismatch {
                        date: bar.date,
                        predicted,
                        close: bar.close,
                    },
                );
            }
        }

        report
    }
}
