// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month as YYYY-MM (defaults to the current month)")
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Multi-currency income/expense tracker with monthly budget goals")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the data file and seed categories"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("kind").long("kind").required(true).help("income | expense"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .help("Defaults to the base currency"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("description").long("desc")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace fields of a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("desc")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, most recent first")
                        .arg(Arg::new("month").long("month").help("Only this YYYY-MM"))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("kind").long("kind").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("🏷️")),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(Arg::new("kind").long("kind")),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budget goals (limits in the base currency)")
                .subcommand(
                    Command::new("set")
                        .about("Create or overwrite the goal for a category and month")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(month_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_flags(Command::new("list").arg(
                    Arg::new("month").long("month").help("Only this YYYY-MM"),
                )))
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Spent vs limit, highest utilization first")
                        .arg(month_arg())
                        .arg(
                            Arg::new("top")
                                .long("top")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Monthly totals, category spend, insights and top budgets")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("fx")
                .about("Exchange rates and base currency")
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount into the base currency")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("from").long("from").required(true)),
                )
                .subcommand(json_flags(Command::new("rates").about("Show the latest rates")))
                .subcommand(
                    Command::new("set-base").arg(Arg::new("currency").required(true)),
                )
                .subcommand(Command::new("set-key").arg(Arg::new("key").required(true))),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv | json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
}
