// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

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

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("Range start (inclusive)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("Range end (inclusive)"),
    )
}

fn required_range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .required(true),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .required(true),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Server id")
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .default_value("csv")
        .help("csv or json")
}

fn out_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .required(true)
        .help("Output file path")
}

pub fn build_cli() -> Command {
    Command::new("moneylens")
        .about("Personal finance client: accounts, categories, budgets, transactions, notifications, reports")
        .subcommand(
            Command::new("login")
                .about("Sign in and store the access token")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account on the server")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Clear the stored access token"))
        .subcommand(Command::new("whoami").about("Show the signed-in identity"))
        .subcommand(
            Command::new("account")
                .about("Payment accounts")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("balance").long("balance").required(true))
                        .arg(
                            Arg::new("cash")
                                .long("cash")
                                .value_parser(value_parser!(bool))
                                .default_value("false")
                                .help("true for a cash account, false for a bank account"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("cash")
                                .long("cash")
                                .value_parser(value_parser!(bool))
                                .required(true),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Expense and income categories")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("type").long("type").required(true).help("expense|income")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("type").long("type").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_flags(range_args(Command::new("list")))
                    .arg(Arg::new("type").long("type").help("expense|income"))
                    .arg(
                        Arg::new("search")
                            .long("search")
                            .help("Keyword over account, category, and description"),
                    )
                    .arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("type").long("type").required(true).help("expense|income"))
                        .arg(Arg::new("account").long("account").required(true).help("Account name"))
                        .arg(Arg::new("category").long("category").required(true).help("Category name"))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("budget")
                .about("Budgets over expense categories")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    required_range_args(
                        Command::new("add")
                            .arg(Arg::new("category").long("category").required(true).help("Expense category name"))
                            .arg(Arg::new("amount").long("amount").required(true)),
                    ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("noti")
                .about("Notifications")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("read").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(Command::new("clear"))
                .subcommand(
                    Command::new("watch").arg(
                        Arg::new("interval")
                            .long("interval")
                            .value_parser(value_parser!(u64))
                            .default_value("30")
                            .help("Refresh interval in seconds"),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Server-aggregated reports")
                .subcommand(json_flags(required_range_args(Command::new("pie"))))
                .subcommand(json_flags(required_range_args(Command::new("bar")))),
        )
        .subcommand(
            Command::new("export")
                .about("Write collections and reports to a file")
                .subcommand(
                    required_range_args(Command::new("report"))
                        .arg(format_arg())
                        .arg(out_arg()),
                )
                .subcommand(
                    range_args(Command::new("transactions"))
                        .arg(format_arg())
                        .arg(out_arg()),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Client configuration")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-url")
                        .arg(Arg::new("url").required(true).help("API base URL")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check client and server health"))
}
