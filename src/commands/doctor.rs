// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::monthly_expense;
use crate::repo;
use crate::utils::{fmt_opt_amount, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// (issue, detail) pairs for every liability row that needs attention.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for l in repo::list_liabilities(conn, None)? {
        let id = l.id.unwrap_or_default();

        // 1) Long-term without an end date: expense can't be derived
        if l.long_term && l.end_date.is_none() {
            rows.push(vec!["missing_end_date".into(), format!("#{} {}", id, l.name)]);
        }

        // 2) End date before start date: duration floors to one month
        if let Some(end) = l.end_date {
            if end < l.date {
                rows.push(vec![
                    "end_before_start".into(),
                    format!("#{} {} ({} > {})", id, l.name, l.date, end),
                ]);
            }
        }

        // 3) Stored expense no longer matches the row's terms
        let fresh = monthly_expense(&l.terms());
        if fresh != l.monthly_expense() {
            rows.push(vec![
                "stale_monthly_expense".into(),
                format!(
                    "#{} {} (stored {}, expected {})",
                    id,
                    l.name,
                    fmt_opt_amount(l.monthly_expense()),
                    fmt_opt_amount(fresh)
                ),
            ]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        for r in &rows {
            let (issue, detail) = (&r[0], &r[1]);
            tracing::warn!(%issue, %detail, "doctor");
        }
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
