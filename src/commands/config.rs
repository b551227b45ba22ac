// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::ValidationMode;
use crate::utils::{get_validation_mode, pretty_table, set_validation_mode};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let mode = get_validation_mode(conn)?;
            println!(
                "{}",
                pretty_table(
                    &["Setting", "Value"],
                    vec![vec!["validation_mode".into(), mode.to_string()]]
                )
            );
        }
        Some(("set-mode", sub)) => {
            let mode = sub.get_one::<String>("mode").unwrap().parse::<ValidationMode>()?;
            set_validation_mode(conn, mode)?;
            println!("Validation mode set to {}", mode);
        }
        _ => {}
    }
    Ok(())
}
