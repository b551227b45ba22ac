// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo;
use anyhow::{bail, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("liabilities", sub)) => export_liabilities(conn, sub),
        Some(("accounts", sub)) => export_accounts(conn, sub),
        _ => Ok(()),
    }
}

fn opt_to_string<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn export_liabilities(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let items = repo::list_liabilities(conn, None)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "name",
                "amount",
                "date",
                "long_term",
                "interest_rate",
                "end_date",
                "monthly_expense",
                "user_id",
            ])?;
            for l in &items {
                wtr.write_record([
                    opt_to_string(l.id),
                    l.name.clone(),
                    l.amount.to_string(),
                    l.date.to_string(),
                    l.long_term.to_string(),
                    opt_to_string(l.interest_rate),
                    opt_to_string(l.end_date),
                    opt_to_string(l.monthly_expense()),
                    l.user_id.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    tracing::info!(count = items.len(), out = %out, "exported liabilities");
    println!("Exported {} liabilities to {}", items.len(), out);
    Ok(())
}

fn export_accounts(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let items = repo::list_accounts(conn, None)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "name",
                "balance",
                "income",
                "expense",
                "saving_goal",
                "salary",
                "user_id",
                "liabilities",
            ])?;
            for a in &items {
                let links = a
                    .liability_ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(";");
                wtr.write_record([
                    opt_to_string(a.id),
                    a.name.clone(),
                    a.balance.to_string(),
                    a.income.to_string(),
                    a.expense.to_string(),
                    a.saving_goal.to_string(),
                    a.salary.to_string(),
                    a.user_id.to_string(),
                    links,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let rows: Vec<_> = items
                .iter()
                .map(|a| {
                    json!({
                        "id": a.id, "name": a.name, "balance": a.balance, "income": a.income,
                        "expense": a.expense, "saving_goal": a.saving_goal, "salary": a.salary,
                        "user_id": a.user_id, "liabilities": a.liability_ids
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    tracing::info!(count = items.len(), out = %out, "exported accounts");
    println!("Exported {} accounts to {}", items.len(), out);
    Ok(())
}
