// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, EntryKind};
use crate::session::AppContext;
use crate::utils::{fmt_amount, fmt_when, maybe_print_json, parse_decimal, parse_range, pretty_table};
use anyhow::{bail, Context, Result};

use super::notifications::poke;

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub),
        Some(("add", sub)) => add(ctx, sub),
        Some(("edit", sub)) => edit(ctx, sub),
        Some(("rm", sub)) => rm(ctx, sub),
        _ => Ok(()),
    }
}

/// Spent/remaining/percentage come straight from the server.
pub fn rows(budgets: &[Budget]) -> Vec<Vec<String>> {
    budgets
        .iter()
        .map(|b| {
            vec![
                b.id.clone(),
                b.category_name.clone(),
                fmt_amount(&b.amount),
                fmt_when(&b.start_date),
                fmt_when(&b.end_date),
                fmt_amount(&b.spent),
                fmt_amount(&b.remaining),
                format!("{:.1}%", b.spent_percentage),
            ]
        })
        .collect()
}

fn print_list(budgets: &[Budget]) {
    println!(
        "{}",
        pretty_table(
            &["ID", "Category", "Amount", "Start", "End", "Spent", "Remaining", "Used"],
            rows(budgets),
        )
    );
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let budgets = ctx.budgets().context("Could not fetch budgets")?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        print_list(&budgets);
    }
    Ok(())
}

fn add(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let range = parse_range(sub.get_one::<String>("from"), sub.get_one::<String>("to"))?;
    let Some((start, end)) = range else {
        bail!("--from and --to are required");
    };
    // Budgets are only ever placed on expense categories.
    let category = ctx.category_named(sub.get_one::<String>("category").unwrap(), EntryKind::Expense)?;

    let reply = ctx.api.create_budget(&category.id, amount, start, end)?;
    if !reply.success {
        bail!("{}", reply.err_message("Could not create the budget"));
    }
    println!(
        "Budget set for '{}': {} from {} to {}",
        category.name,
        fmt_amount(&amount),
        start,
        end
    );
    if reply.notification_message.is_some() {
        poke(ctx);
    }
    print_list(&ctx.budgets()?);
    Ok(())
}

fn edit(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;

    let reply = ctx.api.update_budget(id, amount)?;
    if !reply.success {
        bail!("{}", reply.err_message("Could not update the budget"));
    }
    println!("Updated budget {} to {}", id, fmt_amount(&amount));
    if reply.notification_message.is_some() {
        poke(ctx);
    }
    print_list(&ctx.budgets()?);
    Ok(())
}

fn rm(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();

    let reply = ctx.api.delete_budget(id)?;
    if !reply.success {
        bail!("{}", reply.err_message("Could not delete the budget"));
    }
    println!("Removed budget {}", id);
    if reply.notification_message.is_some() {
        poke(ctx);
    }
    print_list(&ctx.budgets()?);
    Ok(())
}
