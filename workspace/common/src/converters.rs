//! Formatting helpers shared by the pipeline and its consumers.
//!
//! The pipeline computes proportions and money totals; the renderer and the
//! CLI need them as display strings in the dashboard's conventions.

use rust_decimal::{Decimal, RoundingStrategy};

/// Returns `count / total` as a fraction, `0.0` when `total` is zero.
pub fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Formats an amount in Brazilian reais with thousands separators,
/// e.g. `R$ 13,591,643.70`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("R$ {}{}.{}", sign, group_thousands(whole), fraction)
}

/// Formats a fraction as a percentage with one decimal, e.g. `0.9123` as `91.2%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
