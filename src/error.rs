// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

/// Raised only in strict mode; lenient saves never fail on liability terms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("long-term liability requires an end date")]
    MissingEndDate,

    #[error("end date {end_date} is before start date {date}")]
    EndBeforeStart { date: NaiveDate, end_date: NaiveDate },

    #[error("unknown validation mode '{0}', expected 'lenient' or 'strict'")]
    UnknownMode(String),
}
