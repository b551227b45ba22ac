// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo;
use crate::utils::{id_for_user, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim();
            let id = repo::create_user(conn, username)?;
            println!("Added user '{}' (id {})", username, id);
        }
        Some(("list", sub)) => {
            let users = repo::list_users(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &users)? {
                let data = users
                    .into_iter()
                    .map(|u| vec![u.id.to_string(), u.username])
                    .collect();
                println!("{}", pretty_table(&["Id", "Username"], data));
            }
        }
        Some(("rm", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            let id = id_for_user(conn, username)?;
            repo::delete_user(conn, id)?;
            tracing::info!(user_id = id, "removed user and owned records");
            println!("Removed user '{}' and everything they owned", username.trim());
        }
        _ => {}
    }
    Ok(())
}
