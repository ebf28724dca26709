//! Row matching for the schedule search box.
//!
//! Users search what they see, so principal and interest are matched against
//! the whole-dollar text a table shows (`$4,840`), not the raw decimal.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::amortization::YearlyEntry;
use crate::types::Money;

/// Lower-cased needle; an empty needle matches every row.
pub fn normalize_term(term: &str) -> String {
    term.to_lowercase()
}

/// Whether `entry` matches an already-normalized search term.
pub fn row_matches(entry: &YearlyEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    entry.year.to_string().contains(needle)
        || currency_match_text(entry.principal_paid).contains(needle)
        || currency_match_text(entry.interest_paid).contains(needle)
}

/// `$` followed by the amount rounded to whole units with comma grouping.
pub fn currency_match_text(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < Decimal::ZERO {
        format!("$-{grouped}")
    } else {
        format!("${grouped}")
    }
}
