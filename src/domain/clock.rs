use chrono::{Datelike, NaiveDate, Timelike};

const MONTH_KANJI: [&str; 12] = [
    "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月", "十二月",
];

const DIGIT_KANJI: [&str; 10] = ["", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// `HH:MM:SS`
pub fn format_time<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())
}

/// Kanji numeral for 1..=31
fn day_kanji(day: u32) -> String {
    let tens = day / 10;
    let ones = (day % 10) as usize;
    let prefix = match tens {
        0 => "",
        1 => "十",
        2 => "二十",
        _ => "三十",
    };
    format!("{}{}", prefix, DIGIT_KANJI[ones])
}

/// e.g. `十六日 十月 2026年`
pub fn format_kanji_date(date: &NaiveDate) -> String {
    format!(
        "{}日 {} {}年",
        day_kanji(date.day()),
        MONTH_KANJI[date.month0() as usize],
        date.year()
    )
}
