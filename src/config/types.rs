use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::domain_types::{Accuracy, TimeRange};
use crate::simulation::{Forecaster, ModelTrainer, PriceWalker, WalkParameters};

/// 應用程序配置結構
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub log: LogConfig,
    pub generator: GeneratorConfig,
    pub forecast: ForecastConfig,
    pub export: ExportConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.log.validate()?;
        self.generator.validate()?;
        self.forecast.validate()?;
        self.export.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level,
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(&self.format, &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 數據生成配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub default_symbol: String,
    pub default_days: u32,
    pub max_days: u32,
    /// 模擬載入延遲（毫秒）
    pub load_latency_ms: u64,
    /// 固定亂數種子；未設定時每次結果不同
    pub seed: Option<u64>,
    /// 隨機漫步參數（百分比）
    pub walk: WalkParameters,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_symbol: "AAPL".to_string(),
            default_days: 30,
            max_days: 3650,
            load_latency_ms: 500,
            seed: None,
            walk: WalkParameters::default(),
        }
    }
}

impl Validator for GeneratorConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.default_symbol, "generator.default_symbol")?;
        ValidationUtils::in_range(self.max_days, 1, 36_500, "generator.max_days")?;
        ValidationUtils::in_range(self.default_days, 1, self.max_days, "generator.default_days")?;
        ValidationUtils::in_range(self.load_latency_ms, 0, 60_000, "generator.load_latency_ms")?;

        // 漲跌與跳空須小於 100%，否則價格可能歸零或為負
        let walk = &self.walk;
        ValidationUtils::in_range(walk.max_daily_change_pct, 0.0, 50.0, "generator.walk.max_daily_change_pct")?;
        ValidationUtils::in_range(walk.max_open_gap_pct, 0.0, 50.0, "generator.walk.max_open_gap_pct")?;
        ValidationUtils::in_range(walk.min_volatility_pct, 0.0, 50.0, "generator.walk.min_volatility_pct")?;
        ValidationUtils::in_range(walk.max_volatility_pct, 0.0, 50.0, "generator.walk.max_volatility_pct")?;
        ValidationUtils::ordered(walk.min_volatility_pct, walk.max_volatility_pct, "generator.walk.volatility")?;

        Ok(())
    }
}

impl GeneratorConfig {
    /// 獲取載入延遲持續時間
    pub fn load_latency(&self) -> Duration {
        Duration::from_millis(self.load_latency_ms)
    }

    /// 預設時間範圍
    pub fn default_range(&self) -> TimeRange {
        TimeRange::new(self.default_days).unwrap_or_default()
    }

    pub fn walker(&self) -> PriceWalker {
        PriceWalker::new(self.walk)
    }
}

/// 預測配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub default_accuracy: f64,
    pub trainer_min_accuracy: f64,
    pub trainer_max_accuracy: f64,
    /// 模擬訓練延遲（毫秒）
    pub training_latency_ms: u64,
    pub low_confidence_threshold: f64,
    /// 趨勢外推的移動平均視窗
    pub trend_window: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_accuracy: 85.0,
            trainer_min_accuracy: 70.0,
            trainer_max_accuracy: 95.0,
            training_latency_ms: 2000,
            low_confidence_threshold: 85.0,
            trend_window: 5,
        }
    }
}

impl Validator for ForecastConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if Accuracy::new(self.default_accuracy).is_err() {
            return Err(ValidationError::RangeError {
                field: "forecast.default_accuracy".to_string(),
                value: self.default_accuracy.to_string(),
                min: "0 (不含)".to_string(),
                max: "100".to_string(),
            });
        }
        ValidationUtils::in_range(self.trainer_min_accuracy, 1.0, 100.0, "forecast.trainer_min_accuracy")?;
        ValidationUtils::in_range(self.trainer_max_accuracy, 1.0, 100.0, "forecast.trainer_max_accuracy")?;
        ValidationUtils::ordered(
            self.trainer_min_accuracy,
            self.trainer_max_accuracy,
            "forecast.trainer_accuracy",
        )?;
        ValidationUtils::in_range(self.low_confidence_threshold, 0.0, 100.0, "forecast.low_confidence_threshold")?;
        ValidationUtils::in_range(self.training_latency_ms, 0, 60_000, "forecast.training_latency_ms")?;
        ValidationUtils::in_range(self.trend_window, 1, 250, "forecast.trend_window")?;

        Ok(())
    }
}

impl ForecastConfig {
    /// 獲取訓練延遲持續時間
    pub fn training_latency(&self) -> Duration {
        Duration::from_millis(self.training_latency_ms)
    }

    /// 預設準確率；設定無效時退回 100%
    pub fn default_accuracy(&self) -> Accuracy {
        Accuracy::new(self.default_accuracy).unwrap_or(Accuracy::PERFECT)
    }

    pub fn forecaster(&self) -> Forecaster {
        Forecaster::with_window(self.trend_window)
    }

    /// 依設定建立訓練器
    pub fn trainer(&self) -> ModelTrainer {
        ModelTrainer::new(
            self.trainer_min_accuracy,
            self.trainer_max_accuracy,
            self.training_latency(),
        )
    }
}

/// 匯出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
    pub include_predicted: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "exports".to_string(),
            include_predicted: true,
        }
    }
}

impl Validator for ExportConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.output_dir, "export.output_dir")?;

        Ok(())
    }
}

impl ExportConfig {
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}
