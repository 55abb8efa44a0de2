// time_utils.rs
//
// 提供交易日曆相關的工具函數。
// 主要功能：
// 1. 判斷日期是否為交易日（週一至週五）
// 2. 推算下一個交易日
// 3. 展開日期區間內的所有交易日

use chrono::{Datelike, Duration, NaiveDate, Weekday};

//
// 交易日判斷
//

/// 判斷指定日期是否為交易日（不含週六、週日）
pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 從指定日期往後逐日推進，直到落在交易日為止
///
/// 結果永遠嚴格晚於 `date`。
pub fn next_trading_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while !is_trading_day(next) {
        next += Duration::days(1);
    }
    next
}

//
// 區間展開
//

/// 計算回溯窗口的起始日期 (`today - days`)；超出日曆範圍時回傳 None
pub fn window_start(today: NaiveDate, days: u32) -> Option<NaiveDate> {
    today.checked_sub_signed(Duration::days(i64::from(days)))
}

/// 列出 `[start, end]` 閉區間內所有交易日，依時間遞增
pub fn trading_days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |date| *date <= end)
        .filter(|date| is_trading_day(*date))
}
