// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reads and writes users, accounts and liabilities.
//!
//! Every liability write goes through [`save_liability`], which runs the
//! [`BeforeSave`] hook first so the stored `monthly_expense` always matches the
//! row's terms at commit time.

use crate::calc::{checked_monthly_expense, ValidationMode};
use crate::error::ValidationError;
use crate::models::{Account, Liability, User};
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Derivation step run immediately before a record is written.
pub trait BeforeSave {
    fn before_save(&mut self, mode: ValidationMode) -> Result<(), ValidationError>;
}

impl BeforeSave for Liability {
    fn before_save(&mut self, mode: ValidationMode) -> Result<(), ValidationError> {
        self.monthly_expense = checked_monthly_expense(&self.terms(), mode)?;
        Ok(())
    }
}

// Users

pub fn create_user(conn: &Connection, username: &str) -> Result<i64> {
    conn.execute("INSERT INTO users(username) VALUES (?1)", params![username])
        .with_context(|| format!("Could not add user '{}'", username))?;
    let id = conn.last_insert_rowid();
    tracing::debug!(user_id = id, "user created");
    Ok(id)
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    let u = conn
        .query_row(
            "SELECT id, username FROM users WHERE id=?1",
            params![id],
            |r| {
                Ok(User {
                    id: r.get(0)?,
                    username: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(u)
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, username FROM users ORDER BY username")?;
    let rows = stmt.query_map([], |r| {
        Ok(User {
            id: r.get(0)?,
            username: r.get(1)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Removes the user together with every account and liability they own.
pub fn delete_user(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM users WHERE id=?1", params![id])?;
    tracing::debug!(user_id = id, removed = n, "user deleted");
    Ok(n > 0)
}

// Liabilities

const LIABILITY_COLUMNS: &str =
    "id, name, amount, date, long_term, interest_rate, end_date, monthly_expense, user_id";

fn liability_from_row(r: &Row<'_>) -> rusqlite::Result<Liability> {
    Ok(Liability {
        id: r.get(0)?,
        name: r.get(1)?,
        amount: r.get(2)?,
        date: r.get(3)?,
        long_term: r.get(4)?,
        interest_rate: r.get(5)?,
        end_date: r.get(6)?,
        monthly_expense: r.get(7)?,
        user_id: r.get(8)?,
    })
}

/// Recomputes `monthly_expense`, then inserts (no id yet) or updates the row.
pub fn save_liability(
    conn: &Connection,
    liability: &mut Liability,
    mode: ValidationMode,
) -> Result<i64> {
    liability
        .before_save(mode)
        .with_context(|| format!("Liability '{}' rejected", liability.name))?;

    let id = match liability.id {
        None => {
            conn.execute(
                "INSERT INTO liabilities(name, amount, date, long_term, interest_rate, end_date, monthly_expense, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    liability.name,
                    liability.amount,
                    liability.date,
                    liability.long_term,
                    liability.interest_rate,
                    liability.end_date,
                    liability.monthly_expense,
                    liability.user_id
                ],
            )?;
            let id = conn.last_insert_rowid();
            liability.id = Some(id);
            id
        }
        Some(id) => {
            let n = conn.execute(
                "UPDATE liabilities SET name=?1, amount=?2, date=?3, long_term=?4, interest_rate=?5,
                 end_date=?6, monthly_expense=?7, user_id=?8 WHERE id=?9",
                params![
                    liability.name,
                    liability.amount,
                    liability.date,
                    liability.long_term,
                    liability.interest_rate,
                    liability.end_date,
                    liability.monthly_expense,
                    liability.user_id,
                    id
                ],
            )?;
            if n == 0 {
                bail!("Liability {} not found", id);
            }
            id
        }
    };
    tracing::debug!(
        liability_id = id,
        monthly_expense = ?liability.monthly_expense,
        "liability saved"
    );
    Ok(id)
}

pub fn get_liability(conn: &Connection, id: i64) -> Result<Option<Liability>> {
    let sql = format!("SELECT {} FROM liabilities WHERE id=?1", LIABILITY_COLUMNS);
    let l = conn
        .query_row(&sql, params![id], liability_from_row)
        .optional()?;
    Ok(l)
}

pub fn list_liabilities(conn: &Connection, user_id: Option<i64>) -> Result<Vec<Liability>> {
    let mut sql = format!("SELECT {} FROM liabilities", LIABILITY_COLUMNS);
    if user_id.is_some() {
        sql.push_str(" WHERE user_id=?1");
    }
    sql.push_str(" ORDER BY date, id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = match user_id {
        Some(uid) => stmt.query_map(params![uid], liability_from_row)?,
        None => stmt.query_map([], liability_from_row)?,
    };
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn delete_liability(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM liabilities WHERE id=?1", params![id])?;
    tracing::debug!(liability_id = id, removed = n, "liability deleted");
    Ok(n > 0)
}

/// Re-saves every liability so stored expenses match their current terms.
/// Runs in one transaction; in strict mode the first rejection rolls back all.
pub fn recompute_all(conn: &Connection, mode: ValidationMode) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut all = list_liabilities(&tx, None)?;
    for l in all.iter_mut() {
        save_liability(&tx, l, mode)?;
    }
    tx.commit()?;
    Ok(all.len())
}

// Accounts

const ACCOUNT_COLUMNS: &str =
    "id, name, balance, income, expense, saving_goal, salary, user_id";

fn account_from_row(r: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        balance: r.get(2)?,
        income: r.get(3)?,
        expense: r.get(4)?,
        saving_goal: r.get(5)?,
        salary: r.get(6)?,
        user_id: r.get(7)?,
        liability_ids: Vec::new(),
    })
}

fn linked_liability_ids(conn: &Connection, account_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare_cached(
        "SELECT liability_id FROM account_liabilities WHERE account_id=?1 ORDER BY liability_id",
    )?;
    let rows = stmt.query_map(params![account_id], |r| r.get::<_, i64>(0))?;
    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

/// Writes the account row and makes its links match `liability_ids`.
pub fn save_account(conn: &Connection, account: &mut Account) -> Result<i64> {
    let tx = conn.unchecked_transaction()?;
    let id = match account.id {
        None => {
            tx.execute(
                "INSERT INTO accounts(name, balance, income, expense, saving_goal, salary, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    account.name,
                    account.balance,
                    account.income,
                    account.expense,
                    account.saving_goal,
                    account.salary,
                    account.user_id
                ],
            )?;
            tx.last_insert_rowid()
        }
        Some(id) => {
            let n = tx.execute(
                "UPDATE accounts SET name=?1, balance=?2, income=?3, expense=?4, saving_goal=?5,
                 salary=?6, user_id=?7 WHERE id=?8",
                params![
                    account.name,
                    account.balance,
                    account.income,
                    account.expense,
                    account.saving_goal,
                    account.salary,
                    account.user_id,
                    id
                ],
            )?;
            if n == 0 {
                bail!("Account {} not found", id);
            }
            id
        }
    };

    tx.execute(
        "DELETE FROM account_liabilities WHERE account_id=?1",
        params![id],
    )?;
    for lid in &account.liability_ids {
        tx.execute(
            "INSERT OR IGNORE INTO account_liabilities(account_id, liability_id) VALUES (?1, ?2)",
            params![id, lid],
        )
        .with_context(|| format!("Liability {} not found", lid))?;
    }
    tx.commit()?;

    account.id = Some(id);
    account.liability_ids.sort_unstable();
    account.liability_ids.dedup();
    tracing::debug!(account_id = id, links = account.liability_ids.len(), "account saved");
    Ok(id)
}

pub fn get_account(conn: &Connection, id: i64) -> Result<Option<Account>> {
    let sql = format!("SELECT {} FROM accounts WHERE id=?1", ACCOUNT_COLUMNS);
    let acct = conn
        .query_row(&sql, params![id], account_from_row)
        .optional()?;
    match acct {
        Some(mut a) => {
            a.liability_ids = linked_liability_ids(conn, id)?;
            Ok(Some(a))
        }
        None => Ok(None),
    }
}

pub fn list_accounts(conn: &Connection, user_id: Option<i64>) -> Result<Vec<Account>> {
    let mut sql = format!("SELECT {} FROM accounts", ACCOUNT_COLUMNS);
    if user_id.is_some() {
        sql.push_str(" WHERE user_id=?1");
    }
    sql.push_str(" ORDER BY name, id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = match user_id {
        Some(uid) => stmt.query_map(params![uid], account_from_row)?,
        None => stmt.query_map([], account_from_row)?,
    };
    let mut out = Vec::new();
    for row in rows {
        let mut a = row?;
        if let Some(id) = a.id {
            a.liability_ids = linked_liability_ids(conn, id)?;
        }
        out.push(a);
    }
    Ok(out)
}

pub fn delete_account(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
    tracing::debug!(account_id = id, removed = n, "account deleted");
    Ok(n > 0)
}

/// Associates a liability with an account; linking twice is a no-op.
pub fn link_liability(conn: &Connection, account_id: i64, liability_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO account_liabilities(account_id, liability_id) VALUES (?1, ?2)",
        params![account_id, liability_id],
    )
    .with_context(|| {
        format!(
            "Could not link liability {} to account {}",
            liability_id, account_id
        )
    })?;
    Ok(())
}

pub fn unlink_liability(conn: &Connection, account_id: i64, liability_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM account_liabilities WHERE account_id=?1 AND liability_id=?2",
        params![account_id, liability_id],
    )?;
    Ok(n > 0)
}
