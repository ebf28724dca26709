//! Fixed-rate, fully-amortizing mortgage math.
//!
//! Derives the level monthly payment for a loan, the year-by-year split of
//! that payment into principal and interest, and the headline totals shown
//! next to the schedule. All math in `rust_decimal::Decimal`; integer powers
//! are computed by iterative multiplication rather than `powd`.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: u32 = 12;

/// Loan amount the calculator starts from and resets to.
pub const DEFAULT_PRINCIPAL: Money = dec!(300000);

/// Annual rate (percent) the calculator starts from and resets to.
pub const DEFAULT_ANNUAL_RATE_PERCENT: Percent = dec!(4.5);

/// Term in years the calculator starts from and resets to.
pub const DEFAULT_TERM_YEARS: u32 = 30;

/// Longest term accepted; bounds the schedule at 1200 months.
pub const MAX_TERM_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// The three inputs of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual rate in percent (4.5 = 4.5%)
    pub annual_rate_percent: Percent,
    /// Loan term in whole years
    pub term_years: u32,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            principal: DEFAULT_PRINCIPAL,
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            term_years: DEFAULT_TERM_YEARS,
        }
    }
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    pub fn validate(&self) -> MortgageResult<()> {
        validate_loan(self.principal, self.annual_rate_percent, self.term_years)
    }

    /// Periodic rate applied each month.
    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate_percent)
    }

    /// Total scheduled payments over the term.
    pub fn number_of_payments(&self) -> MortgageResult<u32> {
        number_of_payments(self.term_years)
    }
}

/// One row of the amortization schedule, covering a single loan year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyEntry {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub remaining_balance: Money,
    pub cumulative_interest: Money,
}

/// Headline figures for the results panel and the principal/interest chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    pub total_payment: Money,
    pub total_interest: Money,
    /// Principal as a whole percentage of total payments
    pub principal_share_pct: Decimal,
    /// Interest as a whole percentage of total payments
    pub interest_share_pct: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub parameters: LoanParameters,
    pub summary: LoanSummary,
    pub schedule: Vec<YearlyEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run a full calculation: payment, yearly schedule and totals.
pub fn calculate_mortgage(
    params: &LoanParameters,
) -> MortgageResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let monthly_payment = compute_monthly_payment(
        params.principal,
        params.annual_rate_percent,
        params.term_years,
    )?;

    if params.annual_rate_percent.is_zero() {
        log::warn!("zero interest rate; using linear principal / n payment");
        warnings.push(
            "Zero interest rate: payment is principal divided evenly over the term".into(),
        );
    }

    let schedule = build_schedule(
        params.principal,
        params.annual_rate_percent,
        params.term_years,
        monthly_payment,
    )?;
    let summary = summarize(params, monthly_payment)?;

    log::debug!(
        "amortized {} at {}% over {} years: payment {}, {} schedule rows",
        params.principal,
        params.annual_rate_percent,
        params.term_years,
        monthly_payment,
        schedule.len()
    );

    let output = MortgageOutput {
        parameters: params.clone(),
        summary,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Level-Payment Amortization",
        params,
        warnings,
        elapsed,
        output,
    ))
}

/// Level monthly payment that retires `principal` over `term_years`.
///
/// M = P * r(1+r)^n / ((1+r)^n - 1), with r the monthly rate and n the
/// number of payments. At a zero rate the annuity formula is undefined and
/// the payment is simply P / n.
pub fn compute_monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageResult<Money> {
    validate_loan(principal, annual_rate_percent, term_years)?;

    let rate = monthly_rate(annual_rate_percent);
    let n = number_of_payments(term_years)?;

    if rate.is_zero() {
        return Ok(principal / Decimal::from(n));
    }

    // Equivalent to r(1+r)^n / ((1+r)^n - 1) without growing the numerator.
    let growth = iterative_pow(Decimal::ONE + rate, n).ok_or_else(|| {
        MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: format!(
                "Compounding {annual_rate_percent}% over {n} payments exceeds decimal range"
            ),
        }
    })?;
    let denom = Decimal::ONE - Decimal::ONE / growth;
    if denom <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Rate is too small to amortize at decimal precision".into(),
        });
    }

    principal
        .checked_mul(rate)
        .map(|interest| interest / denom)
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Principal exceeds decimal range".into(),
        })
}

/// Build the year-by-year schedule for a loan paid with `monthly_payment`.
///
/// Months stop as soon as the balance is retired, so a payment above the
/// level payment yields a shorter schedule. A final payment that would
/// overshoot the balance only counts the balance actually owed, and the last
/// scheduled payment clears any residual left by rounding.
pub fn build_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
    monthly_payment: Money,
) -> MortgageResult<Vec<YearlyEntry>> {
    validate_loan(principal, annual_rate_percent, term_years)?;

    let rate = monthly_rate(annual_rate_percent);
    let total_months = number_of_payments(term_years)?;

    let first_interest = principal.checked_mul(rate).ok_or_else(|| out_of_range("principal"))?;
    if monthly_payment <= first_interest {
        return Err(MortgageError::InvalidInput {
            field: "monthly_payment".into(),
            reason: format!(
                "Payment {monthly_payment} does not cover the first month's interest"
            ),
        });
    }

    let mut schedule = Vec::with_capacity(term_years as usize);
    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut month_index = 0u32;

    for year in 1..=term_years {
        let mut year_principal = Decimal::ZERO;
        let mut year_interest = Decimal::ZERO;

        for _ in 0..MONTHS_PER_YEAR {
            if balance <= Decimal::ZERO {
                break;
            }
            month_index += 1;

            let interest = balance.checked_mul(rate).ok_or_else(|| out_of_range("principal"))?;
            let scheduled_principal = monthly_payment
                .checked_sub(interest)
                .ok_or_else(|| out_of_range("monthly_payment"))?;
            let principal_portion =
                if scheduled_principal >= balance || month_index == total_months {
                    balance
                } else {
                    scheduled_principal
                };

            year_interest = checked_total(year_interest, interest)?;
            cumulative_interest = checked_total(cumulative_interest, interest)?;
            year_principal = checked_total(year_principal, principal_portion)?;
            balance -= principal_portion;
        }

        schedule.push(YearlyEntry {
            year,
            principal_paid: year_principal,
            interest_paid: year_interest,
            remaining_balance: balance,
            cumulative_interest,
        });

        if balance.is_zero() {
            break;
        }
    }

    Ok(schedule)
}

/// Totals derived from the level payment (not from the schedule rows).
pub fn summarize(params: &LoanParameters, monthly_payment: Money) -> MortgageResult<LoanSummary> {
    params.validate()?;
    let n = params.number_of_payments()?;

    let total_payment = monthly_payment
        .checked_mul(Decimal::from(n))
        .ok_or_else(|| out_of_range("principal"))?;
    let total_interest = total_payment - params.principal;

    let (principal_share_pct, interest_share_pct) = if total_payment > Decimal::ZERO {
        (
            whole_percent(params.principal, total_payment),
            whole_percent(total_interest, total_payment),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    Ok(LoanSummary {
        monthly_payment,
        number_of_payments: n,
        total_payment,
        total_interest,
        principal_share_pct,
        interest_share_pct,
    })
}

/// Convert an annual percentage into the monthly periodic rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_loan(principal: Money, annual_rate_percent: Percent, term_years: u32) -> MortgageResult<()> {
    if principal <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate must be non-negative".into(),
        });
    }
    if term_years == 0 {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    if term_years > MAX_TERM_YEARS {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term must be at most {MAX_TERM_YEARS} years"),
        });
    }
    Ok(())
}

fn out_of_range(field: &str) -> MortgageError {
    MortgageError::InvalidInput {
        field: field.into(),
        reason: "Loan totals exceed decimal range".into(),
    }
}

fn checked_total(total: Money, amount: Money) -> MortgageResult<Money> {
    total
        .checked_add(amount)
        .ok_or_else(|| out_of_range("principal"))
}

fn number_of_payments(term_years: u32) -> MortgageResult<u32> {
    term_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term of {term_years} years is too long"),
        })
}

/// Compute base^n for a positive integer exponent via iterative multiplication.
/// Returns `None` once the result leaves the Decimal range.
fn iterative_pow(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

fn whole_percent(part: Money, total: Money) -> Decimal {
    (part / total * dec!(100)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
