// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use finmanager::{cli, commands, db};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_flag("verbose"));

    let (conn, path) = match matches.get_one::<String>("db") {
        Some(p) => {
            let path = PathBuf::from(p);
            (db::open_at(&path)?, path)
        }
        None => (db::open_or_init()?, db::db_path()?),
    };

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("user", sub)) => commands::users::handle(&conn, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&conn, sub)?,
        Some(("liability", sub)) => commands::liabilities::handle(&conn, sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
