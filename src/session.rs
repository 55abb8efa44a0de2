//! 儀表板會話
//!
//! 模擬前端的載入流程：每次載入或訓練都帶有一個遞增的票號，
//! 人工延遲結束後若票號已過期，結果直接丟棄，不會覆蓋較新的狀態。

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain_types::{Accuracy, PredictionOutlook, Series, TimeRange};
use crate::simulation::{Clock, Forecaster, ModelTrainer, RandomSource, SeriesGenerator};

/// 會話當前狀態
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub symbol: String,
    pub range: TimeRange,
    pub series: Option<Arc<Series>>,
    pub accuracy: Option<Accuracy>,
    pub prediction: Option<f64>,
    /// 附加預測數據點後的序列
    pub predicted_series: Option<Arc<Series>>,
}

impl SessionState {
    fn new(symbol: impl Into<String>, range: TimeRange) -> Self {
        Self {
            symbol: symbol.into(),
            range,
            series: None,
            accuracy: None,
            prediction: None,
            predicted_series: None,
        }
    }

    fn clear_model(&mut self) {
        self.accuracy = None;
        self.prediction = None;
        self.predicted_series = None;
    }
}

/// 儀表板會話
pub struct DashboardSession<C> {
    generator: SeriesGenerator<C>,
    forecaster: Forecaster,
    trainer: ModelTrainer,
    rng: Mutex<Box<dyn RandomSource + Send>>,
    load_latency: Duration,
    /// 數據載入票號（載入與刷新共用）
    data_epoch: AtomicU64,
    /// 最近一次 `load` 取得的票號
    load_epoch: AtomicU64,
    /// 已寫入狀態的數據票號，只在持有狀態寫鎖時更新
    committed_epoch: AtomicU64,
    /// 模型訓練票號
    model_epoch: AtomicU64,
    state: RwLock<SessionState>,
}

impl<C: Clock> DashboardSession<C> {
    /// 創建會話，預設標的 AAPL、30 天、無延遲
    pub fn new(generator: SeriesGenerator<C>, rng: impl RandomSource + Send + 'static) -> Self {
        Self {
            generator,
            forecaster: Forecaster::default(),
            trainer: ModelTrainer::default().with_latency(Duration::ZERO),
            rng: Mutex::new(Box::new(rng)),
            load_latency: Duration::ZERO,
            data_epoch: AtomicU64::new(0),
            load_epoch: AtomicU64::new(0),
            committed_epoch: AtomicU64::new(0),
            model_epoch: AtomicU64::new(0),
            state: RwLock::new(SessionState::new("AAPL", TimeRange::default())),
        }
    }

    pub fn with_defaults(self, symbol: impl Into<String>, range: TimeRange) -> Self {
        Self {
            state: RwLock::new(SessionState::new(symbol, range)),
            ..self
        }
    }

    pub fn with_load_latency(mut self, latency: Duration) -> Self {
        self.load_latency = latency;
        self
    }

    pub fn with_trainer(mut self, trainer: ModelTrainer) -> Self {
        self.trainer = trainer;
        self
    }

    pub fn with_forecaster(mut self, forecaster: Forecaster) -> Self {
        self.forecaster = forecaster;
        self
    }

    /// 切換標的或時間範圍並重新生成數據，同時清除既有模型
    ///
    /// 若等待期間已有更新的載入請求，回傳 None。
    pub async fn load(&self, symbol: &str, range: TimeRange) -> Option<Arc<Series>> {
        let ticket = self.data_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.load_epoch.fetch_max(ticket, Ordering::SeqCst);
        self.simulate_latency(self.load_latency).await;

        let series = Arc::new(self.generate(range, symbol));

        let mut state = self.state.write().await;
        if !self.is_current_load(ticket) {
            debug!(symbol, ticket, "載入結果已過期，丟棄");
            return None;
        }

        state.symbol = symbol.to_string();
        state.range = range;
        state.series = Some(Arc::clone(&series));
        state.clear_model();
        self.committed_epoch.store(ticket, Ordering::SeqCst);
        info!(symbol, range = %range, bars = series.len(), "已載入數據");

        Some(series)
    }

    /// 以目前標的與範圍重新生成數據；已有模型時一併重新預測
    pub async fn refresh(&self) -> Option<Arc<Series>> {
        let (symbol, range) = {
            let state = self.state.read().await;
            (state.symbol.clone(), state.range)
        };

        let ticket = self.data_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.simulate_latency(self.load_latency).await;

        let series = Arc::new(self.generate(range, &symbol));

        let mut state = self.state.write().await;
        if !self.is_current_load(ticket) {
            debug!(symbol = %symbol, ticket, "刷新結果已過期，丟棄");
            return None;
        }

        state.series = Some(Arc::clone(&series));
        self.committed_epoch.store(ticket, Ordering::SeqCst);
        match state.accuracy {
            Some(accuracy) => self.apply_prediction(&mut state, accuracy),
            None => state.clear_model(),
        }
        info!(symbol = %symbol, bars = series.len(), "已刷新數據");

        Some(series)
    }

    /// 模擬訓練並以所得準確率產生預測
    ///
    /// 等待期間若有新的訓練、重設、數據載入或刷新，結果丟棄並回傳 None。
    /// 完成時仍有尚未寫入的 `load`（其寫入會清除模型）也視為過期。
    pub async fn train_model(&self) -> Option<Accuracy> {
        let data_ticket = self.data_epoch.load(Ordering::SeqCst);
        let model_ticket = self.model_epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let accuracy = self.trainer.train(&self.rng).await;

        let mut state = self.state.write().await;
        let load_pending =
            self.load_epoch.load(Ordering::SeqCst) > self.committed_epoch.load(Ordering::SeqCst);
        let stale = self.model_epoch.load(Ordering::SeqCst) != model_ticket
            || self.data_epoch.load(Ordering::SeqCst) != data_ticket
            || load_pending;
        if stale {
            debug!(model_ticket, "訓練結果已過期，丟棄");
            return None;
        }

        self.apply_prediction(&mut state, accuracy);
        info!(%accuracy, prediction = ?state.prediction, "模型已就緒");
        Some(accuracy)
    }

    /// 直接使用外部提供的準確率預測，回傳預測值
    pub async fn apply_accuracy(&self, accuracy: Accuracy) -> Option<f64> {
        self.model_epoch.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        self.apply_prediction(&mut state, accuracy);
        state.prediction
    }

    /// 清除模型與預測
    pub async fn reset_model(&self) {
        self.model_epoch.fetch_add(1, Ordering::SeqCst);
        self.state.write().await.clear_model();
        debug!("模型已重設");
    }

    /// 目前狀態的快照
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// 目前預測的展示資訊
    pub async fn outlook(&self) -> Option<PredictionOutlook> {
        let state = self.state.read().await;
        let series = state.series.as_ref()?;
        PredictionOutlook::new(series, state.prediction?, state.accuracy?)
    }

    fn generate(&self, range: TimeRange, symbol: &str) -> Series {
        let mut rng = self.rng.lock();
        self.generator.generate(range.days(), symbol, &mut *rng)
    }

    /// 以準確率計算預測並寫入狀態；序列為空時僅保留準確率
    fn apply_prediction(&self, state: &mut SessionState, accuracy: Accuracy) {
        state.accuracy = Some(accuracy);
        state.prediction = None;
        state.predicted_series = None;

        let Some(series) = state.series.clone() else {
            return;
        };

        let mut rng = self.rng.lock();
        if let Some(prediction) = self.forecaster.predict(&series, accuracy, &mut *rng) {
            let extended = self.forecaster.append_prediction(&series, prediction, &mut *rng);
            state.prediction = Some(prediction);
            state.predicted_series = Some(Arc::new(extended));
        }
    }

    fn is_current_load(&self, ticket: u64) -> bool {
        self.data_epoch.load(Ordering::SeqCst) == ticket
    }

    async fn simulate_latency(&self, latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}
