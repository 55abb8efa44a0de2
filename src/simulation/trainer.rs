use parking_lot::Mutex;
use std::time::Duration;
use tracing::info;

use crate::domain_types::Accuracy;
use crate::simulation::random::RandomSource;

/// 模擬的模型訓練器
///
/// 沒有真正的模型：等待固定延遲後，在 `[min_accuracy, max_accuracy]` 內隨機給出準確率。
#[derive(Debug, Clone)]
pub struct ModelTrainer {
    min_accuracy: f64,
    max_accuracy: f64,
    latency: Duration,
}

impl Default for ModelTrainer {
    fn default() -> Self {
        Self {
            min_accuracy: 70.0,
            max_accuracy: 95.0,
            latency: Duration::from_millis(2000),
        }
    }
}

impl ModelTrainer {
    /// 區間需落在 (0, 100]，由設定驗證保證
    pub fn new(min_accuracy: f64, max_accuracy: f64, latency: Duration) -> Self {
        Self {
            min_accuracy,
            max_accuracy,
            latency,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// 不經延遲直接抽取準確率
    pub fn draw_accuracy<R>(&self, rng: &mut R) -> Accuracy
    where
        R: RandomSource + ?Sized,
    {
        let percent = rng
            .uniform(self.min_accuracy, self.max_accuracy)
            .clamp(f64::MIN_POSITIVE, 100.0);
        Accuracy::new(percent).unwrap_or(Accuracy::PERFECT)
    }

    /// 模擬訓練：等待延遲後抽取準確率
    ///
    /// 亂數來源只在延遲結束後短暫鎖定，等待期間其他呼叫者仍可使用。
    pub async fn train<R>(&self, rng: &Mutex<R>) -> Accuracy
    where
        R: RandomSource + Send + ?Sized,
    {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let accuracy = self.draw_accuracy(&mut *rng.lock());
        info!(%accuracy, "模型訓練完成");
        accuracy
    }
}
