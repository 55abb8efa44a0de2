use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain_types::DomainError;

/// 模型準確率（百分比），範圍 (0, 100]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Accuracy(f64);

impl Accuracy {
    pub const PERFECT: Accuracy = Accuracy(100.0);

    pub fn new(percent: f64) -> Result<Self, DomainError> {
        if !(percent > 0.0 && percent <= 100.0) {
            return Err(DomainError::InvalidAccuracy(percent));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// 誤差比例 `(100 - accuracy) / 100`
    pub fn error_fraction(&self) -> f64 {
        (100.0 - self.0) / 100.0
    }
}

impl TryFrom<f64> for Accuracy {
    type Error = DomainError;

    fn try_from(percent: f64) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<Accuracy> for f64 {
    fn from(accuracy: Accuracy) -> Self {
        accuracy.0
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}
