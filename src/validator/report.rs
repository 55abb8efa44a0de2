use super::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 驗證報告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// 驗證器名稱
    pub validator_name: String,
    /// 總記錄數
    pub total_records: usize,
    /// 有效記錄數
    pub valid_records: usize,
    /// 無效記錄數
    pub invalid_records: usize,
    /// 各類型錯誤計數
    pub error_counts: BTreeMap<String, usize>,
    /// 詳細錯誤
    pub errors: Vec<DetailedError>,
}

/// 詳細錯誤資訊
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedError {
    /// 數據點索引
    pub index: usize,
    /// 錯誤類型
    pub error_type: String,
    /// 錯誤訊息
    pub message: String,
}

impl ValidationReport {
    /// 創建新的驗證報告
    pub fn new(validator_name: impl Into<String>, total_records: usize) -> Self {
        Self {
            validator_name: validator_name.into(),
            total_records,
            valid_records: total_records,
            invalid_records: 0,
            error_counts: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    /// 添加錯誤；同一索引的多個錯誤只計為一筆無效記錄
    pub fn add_error(&mut self, index: usize, error: &ValidationError) {
        if !self.errors.iter().any(|e| e.index == index) {
            self.invalid_records += 1;
            self.valid_records = self.valid_records.saturating_sub(1);
        }
        *self.error_counts.entry(error.kind().to_string()).or_insert(0) += 1;
        self.errors.push(DetailedError {
            index,
            error_type: error.kind().to_string(),
            message: error.to_string(),
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// 獲取成功率
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.valid_records as f64 / self.total_records as f64
        }
    }

    /// 格式化為人類可讀的文字
    pub fn format_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== 驗證報告: {} ===\n", self.validator_name));
        output.push_str(&format!("  總記錄數: {}\n", self.total_records));
        output.push_str(&format!(
            "  有效記錄: {} ({:.2}%)\n",
            self.valid_records,
            self.success_rate() * 100.0
        ));
        output.push_str(&format!("  無效記錄: {}\n", self.invalid_records));

        if !self.errors.is_empty() {
            output.push_str("錯誤:\n");
            for error in &self.errors {
                output.push_str(&format!("  [{}] {}\n", error.index, error.message));
            }
        }

        output
    }

    /// 格式化為JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_report_counts() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let mut report = ValidationReport::new("test", 4);
        assert!(report.is_valid());
        assert_eq!(report.success_rate(), 1.0);

        report.add_error(1, &ValidationError::WeekendDate { date });
        report.add_error(1, &ValidationError::MisplacedPrediction { date });
        report.add_error(3, &ValidationError::WeekendDate { date });

        assert!(!report.is_valid());
        assert_eq!(report.invalid_records, 2);
        assert_eq!(report.valid_records, 2);
        assert_eq!(report.error_counts.get("WeekendDate"), Some(&2));
        assert_eq!(report.errors.len(), 3);
        assert!(report.format_text().contains("無效記錄: 2"));
        assert!(report.format_json().unwrap().contains("\"MisplacedPrediction\""));
    }

    #[test]
    fn test_empty_report() {
        let report = ValidationReport::new("empty", 0);
        assert!(report.is_valid());
        assert_eq!(report.success_rate(), 0.0);
    }
}
