// src/listing/format.rs

use chrono::NaiveDate;

pub const PLACEHOLDER: &str = "-";

/// ru-RU groups thousands with a no-break space.
const GROUP_SEPARATOR: char = '\u{a0}';

/// Normalizes Russian phone numbers to `+7 (DDD) DDD-DD-DD`.
/// Anything that is not a 10-digit or an 11-digit `7`/`8`-prefixed
/// number is returned as it came.
pub fn format_phone(phone: Option<&str>) -> String {
    let Some(raw) = phone else {
        return PLACEHOLDER.to_string();
    };

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let national = match digits.len() {
        11 if digits.starts_with('7') || digits.starts_with('8') => &digits[1..],
        10 => digits.as_str(),
        _ => return raw.to_string(),
    };

    format!(
        "+7 ({}) {}-{}-{}",
        &national[0..3],
        &national[3..6],
        &national[6..8],
        &national[8..10]
    )
}

/// Owner of a building's spec account. Unknown codes, like `REGOP`, fall
/// through to the regional operator.
pub fn account_type_label(owner_type: Option<&str>) -> &'static str {
    match owner_type {
        Some("UK") => "Управляющая компания",
        Some("TSJ") => "ТСЖ",
        Some("JSK") => "ЖСК",
        _ => "Региональный оператор",
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Rounds to a whole number and groups thousands.
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round() as i64;
    let grouped = group_digits(&rounded.unsigned_abs().to_string());
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_count(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Missing balance is shown as zero.
pub fn format_balance(balance: Option<f64>) -> String {
    format_grouped(balance.unwrap_or(0.0))
}

/// Area keeps one decimal (ru-RU comma); missing or zero area is unknown.
pub fn format_area(area: Option<f64>) -> String {
    match area {
        Some(v) if v != 0.0 => {
            let tenths = (v * 10.0).round() as i64;
            let whole = group_digits(&(tenths.abs() / 10).to_string());
            let sign = if tenths < 0 { "-" } else { "" };
            match tenths.abs() % 10 {
                0 => format!("{sign}{whole} м²"),
                frac => format!("{sign}{whole},{frac} м²"),
            }
        }
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(PLACEHOLDER)
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
