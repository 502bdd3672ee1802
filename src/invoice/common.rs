//! Shared helpers for invoice rendering: date arithmetic, date and currency
//! formatting, and HTML escaping.

use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Calendar days between the issue date and the due date.
pub const DUE_DATE_OFFSET_DAYS: u64 = 20;

const CURRENCY_SYMBOL: &str = "Rs";

/// Keeps the symbol on the same line as the amount.
const NO_BREAK_SPACE: char = '\u{a0}';

/// Issue date plus [`DUE_DATE_OFFSET_DAYS`], rolling over month and year ends.
pub fn due_date(issue_date: NaiveDate) -> NaiveDate {
    issue_date
        .checked_add_days(Days::new(DUE_DATE_OFFSET_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Format a date as `DD/MM/YYYY` (e.g. "30/09/2025").
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format an amount in Pakistani Rupees (e.g. "Rs 1,500.00", with a
/// no-break space after the symbol).
///
/// Rounds half away from zero to two decimal places and groups the integer
/// part in thousands.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!(
        "{}{}{}{}.{}",
        sign,
        CURRENCY_SYMBOL,
        NO_BREAK_SPACE,
        group_thousands(int_part),
        frac_part
    )
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Escape text for insertion into HTML element content or a quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
