// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::ValidationMode;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_amount(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid amount '{}'", s))
}

pub fn fmt_amount(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn fmt_opt_amount(v: Option<f64>) -> String {
    v.map(fmt_amount).unwrap_or_else(|| "-".to_string())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_user(conn: &Connection, username: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE username=?1")?;
    let id: i64 = stmt
        .query_row(params![username.trim()], |r| r.get(0))
        .with_context(|| format!("User '{}' not found", username))?;
    Ok(id)
}

// Validation mode settings
pub fn get_validation_mode(conn: &Connection) -> Result<ValidationMode> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='validation_mode'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => Ok(s.parse::<ValidationMode>()?),
        None => Ok(ValidationMode::default()),
    }
}

pub fn set_validation_mode(conn: &Connection, mode: ValidationMode) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('validation_mode', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![mode.as_str()],
    )?;
    Ok(())
}

/// Stored mode, unless `--strict` was passed for this invocation.
pub fn effective_mode(conn: &Connection, m: &clap::ArgMatches) -> Result<ValidationMode> {
    let forced = m
        .try_get_one::<bool>("strict")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false);
    if forced {
        Ok(ValidationMode::Strict)
    } else {
        get_validation_mode(conn)
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
