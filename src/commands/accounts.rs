// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, User};
use crate::repo;
use crate::utils::{fmt_amount, id_for_user, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::collections::HashMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("link", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let lid = *sub.get_one::<i64>("liability").unwrap();
            require_account(conn, id)?;
            repo::get_liability(conn, lid)?
                .with_context(|| format!("Liability {} not found", lid))?;
            repo::link_liability(conn, id, lid)?;
            println!("Linked liability {} to account {}", lid, id);
        }
        Some(("unlink", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let lid = *sub.get_one::<i64>("liability").unwrap();
            if repo::unlink_liability(conn, id, lid)? {
                println!("Unlinked liability {} from account {}", lid, id);
            } else {
                println!("Liability {} was not linked to account {}", lid, id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if !repo::delete_account(conn, id)? {
                anyhow::bail!("Account {} not found", id);
            }
            println!("Removed account {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn require_account(conn: &Connection, id: i64) -> Result<Account> {
    repo::get_account(conn, id)?.with_context(|| format!("Account {} not found", id))
}

/// Applies any of the aggregate flags present on `sub`.
fn apply_fields(acct: &mut Account, sub: &clap::ArgMatches) -> Result<()> {
    let fields: [(&str, &mut f64); 5] = [
        ("balance", &mut acct.balance),
        ("income", &mut acct.income),
        ("expense", &mut acct.expense),
        ("saving-goal", &mut acct.saving_goal),
        ("salary", &mut acct.salary),
    ];
    for (flag, slot) in fields {
        if let Some(v) = sub.get_one::<String>(flag) {
            *slot = parse_amount(v)?;
        }
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let name = sub.get_one::<String>("name").unwrap().trim();
    let user_id = id_for_user(conn, user)?;
    let mut acct = Account::new(name, user_id);
    apply_fields(&mut acct, sub)?;
    let id = repo::save_account(conn, &mut acct)?;
    println!("Added account '{}' (id {})", name, id);
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut acct = require_account(conn, id)?;
    if let Some(name) = sub.get_one::<String>("name") {
        acct.name = name.trim().to_string();
    }
    apply_fields(&mut acct, sub)?;
    repo::save_account(conn, &mut acct)?;
    println!("Updated account {}", id);
    Ok(())
}

fn account_row(a: &Account, owners: &HashMap<i64, User>) -> Vec<String> {
    let label = match owners.get(&a.user_id) {
        Some(u) => a.label(u),
        None => a.name.clone(),
    };
    let links = a
        .liability_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    vec![
        a.id.map(|id| id.to_string()).unwrap_or_default(),
        label,
        fmt_amount(a.balance),
        fmt_amount(a.income),
        fmt_amount(a.expense),
        fmt_amount(a.saving_goal),
        fmt_amount(a.salary),
        links,
    ]
}

const HEADERS: [&str; 8] = [
    "Id",
    "Account",
    "Balance",
    "Income",
    "Expense",
    "Saving goal",
    "Salary",
    "Liabilities",
];

fn owners_by_id(conn: &Connection) -> Result<HashMap<i64, User>> {
    Ok(repo::list_users(conn)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = match sub.get_one::<String>("user") {
        Some(u) => Some(id_for_user(conn, u)?),
        None => None,
    };
    let accounts = repo::list_accounts(conn, user_id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
        let owners = owners_by_id(conn)?;
        let data = accounts.iter().map(|a| account_row(a, &owners)).collect();
        println!("{}", pretty_table(&HEADERS, data));
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let acct = require_account(conn, id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &acct)? {
        let owners = owners_by_id(conn)?;
        println!(
            "{}",
            pretty_table(&HEADERS, vec![account_row(&acct, &owners)])
        );
    }
    Ok(())
}
