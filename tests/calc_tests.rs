// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finmanager::calc::{
    checked_monthly_expense, monthly_expense, months_between, round2, LiabilityTerms,
    ValidationMode,
};
use finmanager::error::ValidationError;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn long_term(amount: f64, end: Option<NaiveDate>, rate: Option<f64>) -> LiabilityTerms {
    LiabilityTerms {
        amount,
        date: d(2024, 1, 1),
        end_date: end,
        interest_rate: rate,
        long_term: true,
    }
}

#[test]
fn short_term_expense_is_amount_regardless_of_other_fields() {
    for (end, rate) in [
        (None, None),
        (Some(d(2025, 1, 1)), Some(12.0)),
        (Some(d(2020, 1, 1)), Some(0.0)),
    ] {
        let t = LiabilityTerms {
            amount: 1200.0,
            date: d(2024, 1, 1),
            end_date: end,
            interest_rate: rate,
            long_term: false,
        };
        assert_eq!(monthly_expense(&t), Some(1200.0));
    }
}

#[test]
fn short_term_amount_is_not_rounded() {
    let t = LiabilityTerms {
        amount: 19.999,
        date: d(2024, 1, 1),
        end_date: None,
        interest_rate: None,
        long_term: false,
    };
    assert_eq!(monthly_expense(&t), Some(19.999));
}

#[test]
fn straight_line_without_interest() {
    // 366 days -> 12 months
    let end = Some(d(2025, 1, 1));
    assert_eq!(monthly_expense(&long_term(1200.0, end, Some(0.0))), Some(100.0));
    assert_eq!(monthly_expense(&long_term(1200.0, end, None)), Some(100.0));
    assert_eq!(monthly_expense(&long_term(500.0, end, None)), Some(41.67));
}

#[test]
fn straight_line_rounds_to_two_decimals() {
    // 210 days -> 7 months
    let t = long_term(1000.0, Some(d(2024, 7, 29)), None);
    assert_eq!(monthly_expense(&t), Some(142.86));
}

#[test]
fn amortized_payment_with_interest() {
    let t = long_term(1200.0, Some(d(2025, 1, 1)), Some(12.0));
    // 1200 * 0.01 / (1 - 1.01^-12) = 106.6185...
    assert_eq!(monthly_expense(&t), Some(106.62));

    // 1826 days -> 60 months at 5%
    let t = long_term(25000.0, Some(d(2029, 1, 1)), Some(5.0));
    assert_eq!(monthly_expense(&t), Some(471.78));
}

#[test]
fn missing_end_date_leaves_expense_unset() {
    assert_eq!(monthly_expense(&long_term(500.0, None, None)), None);
    assert_eq!(monthly_expense(&long_term(500.0, None, Some(7.5))), None);
}

#[test]
fn short_or_inverted_durations_floor_to_one_month() {
    assert_eq!(months_between(d(2024, 1, 1), d(2024, 1, 20)), 1);
    assert_eq!(months_between(d(2024, 6, 1), d(2024, 1, 1)), 1);
    assert_eq!(months_between(d(2024, 1, 1), d(2024, 1, 1)), 1);
    assert_eq!(months_between(d(2024, 1, 1), d(2024, 3, 1)), 2);

    let inverted = LiabilityTerms {
        date: d(2024, 6, 1),
        ..long_term(1200.0, Some(d(2024, 1, 1)), None)
    };
    assert_eq!(monthly_expense(&inverted), Some(1200.0));

    let inverted_with_rate = LiabilityTerms {
        interest_rate: Some(12.0),
        ..inverted
    };
    assert_eq!(monthly_expense(&inverted_with_rate), Some(1212.0));
}

#[test]
fn thirty_day_months_not_calendar_months() {
    // 59 days is under two 30-day months even though it spans two calendar months
    assert_eq!(months_between(d(2024, 1, 1), d(2024, 2, 29)), 1);
}

#[test]
fn degenerate_rates_fall_back_to_straight_line() {
    // 1 + rate/1200 rounds to exactly 1.0, so the denominator is zero
    let t = long_term(1200.0, Some(d(2025, 1, 1)), Some(1e-20));
    assert_eq!(monthly_expense(&t), Some(100.0));

    // monthly rate of -100% makes the growth base zero
    let t = long_term(1200.0, Some(d(2025, 1, 1)), Some(-1200.0));
    assert_eq!(monthly_expense(&t), Some(100.0));
}

#[test]
fn tiny_negative_rate_falls_back_to_straight_line() {
    // (1 + r)^-1 is exactly 1.0 here, so the amortizing denominator vanishes
    let t = long_term(96.0, Some(d(2023, 3, 16)), Some(-1e-13));
    assert_eq!(monthly_expense(&t), Some(96.0));
}

#[test]
fn round2_uses_exact_binary_value_and_ties_to_even() {
    assert_eq!(round2(2.675), 2.67);
    assert_eq!(round2(-2.675), -2.67);
    assert_eq!(round2(0.125), 0.12);
    assert_eq!(round2(0.375), 0.38);
    assert_eq!(round2(106.61854641400993), 106.62);
    assert!(round2(f64::NAN).is_nan());
    assert_eq!(round2(f64::INFINITY), f64::INFINITY);
}

#[test]
fn calculation_is_deterministic() {
    let t = long_term(1200.0, Some(d(2025, 1, 1)), Some(12.0));
    assert_eq!(monthly_expense(&t), monthly_expense(&t));
}

#[test]
fn lenient_mode_matches_plain_calculation() {
    for t in [
        long_term(500.0, None, None),
        long_term(1200.0, Some(d(2023, 1, 1)), Some(3.0)),
        long_term(1200.0, Some(d(2025, 1, 1)), Some(12.0)),
    ] {
        assert_eq!(
            checked_monthly_expense(&t, ValidationMode::Lenient).unwrap(),
            monthly_expense(&t)
        );
    }
}

#[test]
fn strict_mode_rejects_missing_or_inverted_dates() {
    let err = checked_monthly_expense(&long_term(500.0, None, None), ValidationMode::Strict)
        .unwrap_err();
    assert_eq!(err, ValidationError::MissingEndDate);

    let err = checked_monthly_expense(
        &long_term(500.0, Some(d(2023, 12, 1)), None),
        ValidationMode::Strict,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ValidationError::EndBeforeStart {
            date: d(2024, 1, 1),
            end_date: d(2023, 12, 1)
        }
    );

    let ok = checked_monthly_expense(
        &long_term(1200.0, Some(d(2025, 1, 1)), None),
        ValidationMode::Strict,
    )
    .unwrap();
    assert_eq!(ok, Some(100.0));
}

#[test]
fn strict_mode_ignores_short_term_liabilities() {
    let t = LiabilityTerms {
        long_term: false,
        ..long_term(75.0, None, None)
    };
    assert_eq!(
        checked_monthly_expense(&t, ValidationMode::Strict).unwrap(),
        Some(75.0)
    );
}

#[test]
fn validation_mode_parses_case_insensitively() {
    assert_eq!(" Strict ".parse::<ValidationMode>().unwrap(), ValidationMode::Strict);
    assert_eq!("lenient".parse::<ValidationMode>().unwrap(), ValidationMode::Lenient);
    assert!(matches!(
        "paranoid".parse::<ValidationMode>(),
        Err(ValidationError::UnknownMode(_))
    ));
    assert_eq!(ValidationMode::default(), ValidationMode::Lenient);
}
