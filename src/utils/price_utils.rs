// price_utils.rs - 價格精度工具
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// 將價格四捨五入至貨幣精度（小數點後兩位）
///
/// 透過 `Decimal` 進行十進位捨入，避免 `x * 100.0` 的二進位誤差。
/// 無法表示的數值（NaN、無限大）原樣返回。
pub fn round_currency(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// 計算由 `from` 變動到 `to` 的百分比
pub fn percent_change(from: f64, to: f64) -> f64 {
    (to - from) / from * 100.0
}
