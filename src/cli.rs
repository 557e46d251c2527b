// Copyright (c) 2025 GastoCheck.
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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("gastocheck")
        .about("Multi-account expense tracking, text capture, subscriptions, goals, insights")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .default_value("cash")
                                .help("cash | debit | credit | savings"),
                        )
                        .arg(Arg::new("initial").long("initial").default_value("0"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("limit").long("limit").help("Credit limit (credit kind)"))
                        .arg(
                            Arg::new("cut-day")
                                .long("cut-day")
                                .value_parser(value_parser!(u32))
                                .help("Statement cut day of month (credit kind)"),
                        )
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .value_parser(value_parser!(u32))
                                .help("Payment due day of month (credit kind)"),
                        )
                        .arg(Arg::new("rate").long("rate").help("Annual interest rate %")),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts with balances")))
                .subcommand(
                    Command::new("archive")
                        .about("Archive an account without deleting its history")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account and its transactions")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage capture categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List categories"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .default_value("expense")
                                .help("income | expense"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("desc").long("desc")),
                )
                .subcommand(
                    json_flags(Command::new("list").about("List transactions"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction (both legs for a transfer)")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(
                    Command::new("transfer")
                        .about("Move money between two accounts")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("export")
                        .about("Export transactions to CSV")
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("sub")
                .about("Manage subscriptions")
                .subcommand(
                    Command::new("add")
                        .about("Add a subscription")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("due").long("due").required(true).help("Next due date"))
                        .arg(
                            Arg::new("recurrence")
                                .long("recurrence")
                                .default_value("monthly")
                                .help("weekly | monthly | yearly"),
                        )
                        .arg(Arg::new("account").long("account").help("Paying account"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("lead")
                                .long("lead")
                                .value_parser(value_parser!(u32))
                                .default_value("3")
                                .help("Reminder lead days"),
                        )
                        .arg(
                            Arg::new("time")
                                .long("time")
                                .default_value("09:00")
                                .help("Reminder time of day"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List subscriptions with status")))
                .subcommand(
                    Command::new("set-status")
                        .about("Override a subscription status, or clear the override")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("status")
                                .required(true)
                                .help("paid | pending | canceled | clear"),
                        ),
                )
                .subcommand(Command::new("upcoming").about("Subscriptions due within 5 days"))
                .subcommand(
                    Command::new("monthly-cost").about("Monthly-equivalent cost of subscriptions"),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a subscription")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Add a goal")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("target").long("target").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List goals")))
                .subcommand(
                    Command::new("fund")
                        .about("Contribute to a goal (capped at its target)")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a goal")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("capture")
                .about("Interpret a free-text sentence and record the result")
                .arg(Arg::new("text").required(true))
                .arg(Arg::new("account").long("account").help("Account for the entry"))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                .arg(
                    Arg::new("ai")
                        .long("ai")
                        .action(ArgAction::SetTrue)
                        .help("Try the AI interpreter first, fall back to the local heuristic"),
                ),
        )
        .subcommand(
            Command::new("pending")
                .about("Captures that could not be interpreted")
                .subcommand(Command::new("list").about("List pending captures"))
                .subcommand(
                    Command::new("rm")
                        .about("Discard a pending capture")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("job")
                .about("Periodic jobs, intended to be driven by cron")
                .subcommand(
                    Command::new("snapshot").about("Append today's global balance snapshot"),
                )
                .subcommand(
                    Command::new("credit-alerts")
                        .about("Raise cut/due-date notifications for credit accounts"),
                ),
        )
        .subcommand(
            json_flags(Command::new("trend").about("Balance history, one point per day"))
                .arg(Arg::new("account").long("account").help("Account name; default global")),
        )
        .subcommand(
            Command::new("notify")
                .about("In-app notification log")
                .subcommand(
                    json_flags(Command::new("list").about("List notifications")).arg(
                        Arg::new("unread")
                            .long("unread")
                            .action(ArgAction::SetTrue)
                            .help("Only unread entries"),
                    ),
                )
                .subcommand(
                    Command::new("read")
                        .about("Mark a notification (or all) as read")
                        .arg(Arg::new("id").value_parser(value_parser!(i64)))
                        .arg(Arg::new("all").long("all").action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Computed views")
                .subcommand(json_flags(
                    Command::new("balances").about("Per-account and global balances"),
                )),
        )
        .subcommand(
            Command::new("insights")
                .about("KPI summary plus AI commentary on the balance trend")
                .arg(
                    Arg::new("refresh")
                        .long("refresh")
                        .action(ArgAction::SetTrue)
                        .help("Ignore the cached commentary"),
                ),
        )
}
