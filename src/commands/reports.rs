// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::report::{bar_headers, bar_rows, breakdown_rows};
use crate::session::AppContext;
use crate::utils::{fmt_amount, maybe_print_json, parse_range, pretty_table};
use anyhow::{bail, Result};

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("pie", sub)) => pie(ctx, sub),
        Some(("bar", sub)) => bar(ctx, sub),
        _ => Ok(()),
    }
}

fn required_range(sub: &clap::ArgMatches) -> Result<(chrono::NaiveDate, chrono::NaiveDate)> {
    match parse_range(sub.get_one::<String>("from"), sub.get_one::<String>("to"))? {
        Some(range) => Ok(range),
        None => bail!("--from and --to are required"),
    }
}

fn pie(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let (start, end) = required_range(sub)?;
    let report = ctx.api.report_pie(start, end)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    println!("Income (total {})", fmt_amount(&report.total_income));
    println!(
        "{}",
        pretty_table(&["Category", "Amount"], breakdown_rows(&report.income_by_category))
    );
    println!("Expense (total {})", fmt_amount(&report.total_expense));
    println!(
        "{}",
        pretty_table(&["Category", "Amount"], breakdown_rows(&report.expense_by_category))
    );
    Ok(())
}

fn bar(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let (start, end) = required_range(sub)?;
    let report = ctx.api.report_bar(start, end)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    let headers = bar_headers(&report);
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    println!("{}", pretty_table(&headers, bar_rows(&report)));
    Ok(())
}
