// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::LiabilityTerms;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Option<i64>,
    pub name: String,
    pub balance: f64,
    pub income: f64,
    pub expense: f64,
    pub saving_goal: f64,
    pub salary: f64,
    pub user_id: i64,
    pub liability_ids: Vec<i64>,
}

impl Account {
    pub fn new(name: impl Into<String>, user_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            balance: 0.0,
            income: 0.0,
            expense: 0.0,
            saving_goal: 0.0,
            salary: 0.0,
            user_id,
            liability_ids: Vec::new(),
        }
    }

    /// "<name> (<username>)"
    pub fn label(&self, owner: &User) -> String {
        format!("{} ({})", self.name, owner.username)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    pub id: Option<i64>,
    pub name: String,
    /// Principal when long-term, otherwise the monthly figure itself.
    pub amount: f64,
    pub date: NaiveDate,
    pub long_term: bool,
    /// Nominal annual percentage.
    pub interest_rate: Option<f64>,
    pub end_date: Option<NaiveDate>,
    /// Derived on every save; see `repo::BeforeSave`.
    pub(crate) monthly_expense: Option<f64>,
    pub user_id: i64,
}

impl Liability {
    pub fn new(name: impl Into<String>, amount: f64, user_id: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            amount,
            date: Utc::now().date_naive(),
            long_term: false,
            interest_rate: None,
            end_date: None,
            monthly_expense: None,
            user_id,
        }
    }

    pub fn monthly_expense(&self) -> Option<f64> {
        self.monthly_expense
    }

    pub fn terms(&self) -> LiabilityTerms {
        LiabilityTerms {
            amount: self.amount,
            date: self.date,
            end_date: self.end_date,
            interest_rate: self.interest_rate,
            long_term: self.long_term,
        }
    }
}

impl fmt::Display for Liability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.amount)
    }
}
