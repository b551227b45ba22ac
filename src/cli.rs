// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

fn account_field_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("balance").long("balance"))
        .arg(Arg::new("income").long("income"))
        .arg(Arg::new("expense").long("expense"))
        .arg(Arg::new("saving-goal").long("saving-goal"))
        .arg(Arg::new("salary").long("salary"))
}

fn liability_term_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("date")
            .long("date")
            .help("Start date YYYY-MM-DD (default: today)"),
    )
    .arg(
        Arg::new("interest-rate")
            .long("interest-rate")
            .help("Nominal annual rate in percent"),
    )
    .arg(
        Arg::new("end-date")
            .long("end-date")
            .help("End date YYYY-MM-DD, needed for long-term liabilities"),
    )
}

pub fn build_cli() -> Command {
    Command::new("finmanager")
        .about("Track accounts and liabilities with derived monthly expenses")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite database (default: platform data dir)"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Reject long-term liabilities with missing or inverted dates"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add").arg(Arg::new("username").required(true)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a user with all their accounts and liabilities")
                        .arg(Arg::new("username").required(true)),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(account_field_args(
                    Command::new("add")
                        .arg(Arg::new("user").long("user").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                ))
                .subcommand(json_args(
                    Command::new("list").arg(Arg::new("user").long("user")),
                ))
                .subcommand(json_args(
                    Command::new("show").arg(id_arg("id", "Account id")),
                ))
                .subcommand(account_field_args(
                    Command::new("set")
                        .arg(id_arg("id", "Account id"))
                        .arg(Arg::new("name").long("name")),
                ))
                .subcommand(
                    Command::new("link")
                        .arg(id_arg("id", "Account id"))
                        .arg(id_arg("liability", "Liability id")),
                )
                .subcommand(
                    Command::new("unlink")
                        .arg(id_arg("id", "Account id"))
                        .arg(id_arg("liability", "Liability id")),
                )
                .subcommand(Command::new("rm").arg(id_arg("id", "Account id"))),
        )
        .subcommand(
            Command::new("liability")
                .about("Manage liabilities")
                .subcommand(liability_term_args(
                    Command::new("add")
                        .arg(Arg::new("user").long("user").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("long-term")
                                .long("long-term")
                                .action(ArgAction::SetTrue),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("list").arg(Arg::new("user").long("user")),
                ))
                .subcommand(json_args(
                    Command::new("show").arg(id_arg("id", "Liability id")),
                ))
                .subcommand(liability_term_args(
                    Command::new("set")
                        .about("Update a liability and recompute its monthly expense")
                        .arg(id_arg("id", "Liability id"))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(
                            Arg::new("long-term")
                                .long("long-term")
                                .value_parser(value_parser!(bool))
                                .help("true or false"),
                        )
                        .arg(
                            Arg::new("clear-interest-rate")
                                .long("clear-interest-rate")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("interest-rate"),
                        )
                        .arg(
                            Arg::new("clear-end-date")
                                .long("clear-end-date")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("end-date"),
                        ),
                ))
                .subcommand(
                    Command::new("recompute")
                        .about("Re-save every liability, refreshing monthly expenses"),
                )
                .subcommand(Command::new("rm").arg(id_arg("id", "Liability id"))),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-mode").arg(
                        Arg::new("mode")
                            .required(true)
                            .value_parser(["lenient", "strict"]),
                    ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export records to a file")
                .subcommand(
                    Command::new("liabilities")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("accounts")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored liabilities for problems"))
}
