// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Liability;
use crate::repo;
use crate::utils::{
    effective_mode, fmt_opt_amount, id_for_user, maybe_print_json, parse_amount, parse_date,
    pretty_table,
};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("recompute", sub)) => {
            let mode = effective_mode(conn, sub)?;
            let n = repo::recompute_all(conn, mode)?;
            println!("Recomputed monthly expense for {} liabilities", n);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if !repo::delete_liability(conn, id)? {
                anyhow::bail!("Liability {} not found", id);
            }
            println!("Removed liability {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// Reads the date and rate flags shared by `add` and `set`.
fn apply_terms(l: &mut Liability, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(d) = sub.get_one::<String>("date") {
        l.date = parse_date(d)?;
    }
    if let Some(r) = sub.get_one::<String>("interest-rate") {
        l.interest_rate = Some(parse_amount(r)?);
    }
    if let Some(d) = sub.get_one::<String>("end-date") {
        l.end_date = Some(parse_date(d)?);
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let name = sub.get_one::<String>("name").unwrap().trim();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let user_id = id_for_user(conn, user)?;

    let mut l = Liability::new(name, amount, user_id);
    l.long_term = sub.get_flag("long-term");
    apply_terms(&mut l, sub)?;

    let mode = effective_mode(conn, sub)?;
    let id = repo::save_liability(conn, &mut l, mode)?;
    if l.long_term && l.monthly_expense().is_none() {
        tracing::warn!(liability_id = id, "long-term liability saved without end date");
    }
    println!(
        "Added liability '{}' (id {}), monthly expense {}",
        l,
        id,
        fmt_opt_amount(l.monthly_expense())
    );
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut l = repo::get_liability(conn, id)?
        .with_context(|| format!("Liability {} not found", id))?;

    if let Some(name) = sub.get_one::<String>("name") {
        l.name = name.trim().to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        l.amount = parse_amount(a)?;
    }
    if let Some(lt) = sub.get_one::<bool>("long-term") {
        l.long_term = *lt;
    }
    if sub.get_flag("clear-interest-rate") {
        l.interest_rate = None;
    }
    if sub.get_flag("clear-end-date") {
        l.end_date = None;
    }
    apply_terms(&mut l, sub)?;

    let mode = effective_mode(conn, sub)?;
    repo::save_liability(conn, &mut l, mode)?;
    println!(
        "Updated liability {}, monthly expense {}",
        id,
        fmt_opt_amount(l.monthly_expense())
    );
    Ok(())
}

fn liability_row(l: &Liability) -> Vec<String> {
    vec![
        l.id.map(|id| id.to_string()).unwrap_or_default(),
        l.to_string(),
        l.date.to_string(),
        l.end_date.map(|d| d.to_string()).unwrap_or_default(),
        if l.long_term { "yes" } else { "no" }.to_string(),
        l.interest_rate.map(|r| format!("{}%", r)).unwrap_or_default(),
        fmt_opt_amount(l.monthly_expense()),
    ]
}

const HEADERS: [&str; 7] = [
    "Id",
    "Liability",
    "Start",
    "End",
    "Long-term",
    "Rate",
    "Monthly",
];

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = match sub.get_one::<String>("user") {
        Some(u) => Some(id_for_user(conn, u)?),
        None => None,
    };
    let items = repo::list_liabilities(conn, user_id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let data = items.iter().map(liability_row).collect();
        println!("{}", pretty_table(&HEADERS, data));
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let l = repo::get_liability(conn, id)?
        .with_context(|| format!("Liability {} not found", id))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &l)? {
        println!("{}", pretty_table(&HEADERS, vec![liability_row(&l)]));
    }
    Ok(())
}
