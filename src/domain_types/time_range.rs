use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain_types::DomainError;

/// 回溯的日曆天數
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimeRange(u32);

impl TimeRange {
    pub const WEEK: TimeRange = TimeRange(7);
    pub const TWO_WEEKS: TimeRange = TimeRange(14);
    pub const MONTH: TimeRange = TimeRange(30);
    pub const QUARTER: TimeRange = TimeRange(90);

    /// 介面上提供的預設選項
    pub const PRESETS: [TimeRange; 4] = [Self::WEEK, Self::TWO_WEEKS, Self::MONTH, Self::QUARTER];

    pub fn new(days: u32) -> Result<Self, DomainError> {
        if days == 0 {
            return Err(DomainError::InvalidTimeRange(days));
        }
        Ok(Self(days))
    }

    pub fn days(&self) -> u32 {
        self.0
    }

    pub fn is_preset(&self) -> bool {
        Self::PRESETS.contains(self)
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::MONTH
    }
}

impl TryFrom<u32> for TimeRange {
    type Error = DomainError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<TimeRange> for u32 {
    fn from(range: TimeRange) -> Self {
        range.0
    }
}

impl FromStr for TimeRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days = s
            .trim()
            .parse::<u32>()
            .map_err(|_| DomainError::UnparsableTimeRange(s.to_string()))?;
        Self::new(days)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Days", self.0)
    }
}
