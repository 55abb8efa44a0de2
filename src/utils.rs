// utils.rs - 公共工具模組
//
// 提供交易日曆與價格精度相關的工具函數，供模擬器與匯出層共用。

pub mod price_utils;
pub mod time_utils;

// 重新導出常用工具函數，使其可以通過 utils::function_name 直接訪問
pub use price_utils::{percent_change, round_currency};
pub use time_utils::{
    // 交易日判斷
    is_trading_day,
    next_trading_day,
    // 區間展開
    trading_days_between,
    window_start,
};
