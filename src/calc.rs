// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly expense derivation for liabilities.
//!
//! Short-term liabilities already carry a monthly figure. Long-term ones are
//! spread over `max(1, days / 30)` months, either straight-line or with the
//! standard amortizing-loan payment when an interest rate is present.

use crate::error::ValidationError;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Days per month used when converting a liability's duration to periods.
pub const DAYS_PER_MONTH: i64 = 30;

/// How a save treats long-term liabilities with missing or inverted dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Missing end date leaves the expense unset; inverted dates floor to one month.
    #[default]
    Lenient,
    /// Both conditions are rejected before anything is written.
    Strict,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Lenient => "lenient",
            ValidationMode::Strict => "strict",
        }
    }
}

impl FromStr for ValidationMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(ValidationMode::Lenient),
            "strict" => Ok(ValidationMode::Strict),
            other => Err(ValidationError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The inputs the calculation reads from a liability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiabilityTerms {
    pub amount: f64,
    pub date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub interest_rate: Option<f64>,
    pub long_term: bool,
}

/// Number of 30-day periods between two dates, never less than one.
pub fn months_between(date: NaiveDate, end_date: NaiveDate) -> i64 {
    let duration_days = (end_date - date).num_days();
    (duration_days / DAYS_PER_MONTH).max(1)
}

/// Round to two decimals, ties to even on the exact binary value.
pub fn round2(v: f64) -> f64 {
    match Decimal::from_f64_retain(v) {
        Some(d) => {
            let r = d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
            r.to_f64().unwrap_or(v)
        }
        // NaN, infinities and magnitudes beyond Decimal's range
        None => (v * 100.0).round() / 100.0,
    }
}

fn straight_line(amount: f64, months: i64) -> f64 {
    round2(amount / months as f64)
}

/// Amortizing payment, or `None` where the formula would divide by zero.
fn amortized(amount: f64, annual_rate_pct: f64, months: i64) -> Option<f64> {
    let monthly_rate = annual_rate_pct / 12.0 / 100.0;
    let growth = 1.0 + monthly_rate;
    if growth == 0.0 {
        return None;
    }
    let denominator = 1.0 - growth.powf(-(months as f64));
    if denominator == 0.0 {
        return None;
    }
    Some(round2(amount * monthly_rate / denominator))
}

/// Monthly expense for the given terms. Never fails: a long-term liability
/// without an end date yields `None`.
pub fn monthly_expense(terms: &LiabilityTerms) -> Option<f64> {
    if !terms.long_term {
        return Some(terms.amount);
    }
    let end_date = terms.end_date?;
    let months = months_between(terms.date, end_date);
    match terms.interest_rate {
        Some(rate) if rate != 0.0 => {
            Some(amortized(terms.amount, rate, months).unwrap_or_else(|| {
                straight_line(terms.amount, months)
            }))
        }
        _ => Some(straight_line(terms.amount, months)),
    }
}

/// Like [`monthly_expense`], but strict mode rejects a missing end date and an
/// end date before the start date on long-term liabilities.
pub fn checked_monthly_expense(
    terms: &LiabilityTerms,
    mode: ValidationMode,
) -> Result<Option<f64>, ValidationError> {
    if mode == ValidationMode::Strict && terms.long_term {
        match terms.end_date {
            None => return Err(ValidationError::MissingEndDate),
            Some(end_date) if end_date < terms.date => {
                return Err(ValidationError::EndBeforeStart {
                    date: terms.date,
                    end_date,
                });
            }
            Some(_) => {}
        }
    }
    Ok(monthly_expense(terms))
}
