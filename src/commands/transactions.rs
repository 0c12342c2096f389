// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EntryKind, Transaction, TransactionDraft};
use crate::session::AppContext;
use crate::utils::{
    fmt_amount, fmt_when, maybe_print_json, parse_date, parse_decimal, parse_kind, parse_range,
    pretty_table,
};
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;

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

/// Local narrowing of an already-fetched collection: type filter plus a
/// case-insensitive keyword over account, category, and description. Date
/// ranges are not handled here; those go back to the server.
pub fn filter_rows<'a>(
    rows: &'a [Transaction],
    kind: Option<EntryKind>,
    keyword: &str,
) -> Vec<&'a Transaction> {
    let needle = keyword.trim().to_lowercase();
    rows.iter()
        .filter(|t| kind.map(|k| t.r#type == k).unwrap_or(true))
        .filter(|t| {
            if needle.is_empty() {
                return true;
            }
            [
                t.account_name.as_deref(),
                t.category_name.as_deref(),
                t.description.as_deref(),
            ]
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

fn print_list(rows: &[&Transaction]) {
    let data = rows
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                fmt_when(&t.date),
                t.r#type.as_str().to_string(),
                fmt_amount(&t.amount),
                t.account_name.clone().unwrap_or_default(),
                t.category_name.clone().unwrap_or_default(),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Type", "Amount", "Account", "Category", "Description"],
            data,
        )
    );
}

/// Apply the local narrowing flags (`--type`, `--search`, `--limit`) to an
/// already-fetched collection.
pub fn select_rows<'a>(
    all: &'a [Transaction],
    sub: &clap::ArgMatches,
) -> Result<Vec<&'a Transaction>> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| parse_kind(s))
        .transpose()?;
    let keyword = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let mut filtered = filter_rows(all, kind, keyword);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        filtered.truncate(*limit);
    }
    Ok(filtered)
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    // The date range goes to the server; everything else narrows locally.
    let range = parse_range(sub.get_one::<String>("from"), sub.get_one::<String>("to"))?;
    let all = ctx.transactions(range).context("Could not fetch transactions")?;
    let filtered = select_rows(&all, sub)?;

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &filtered)? {
        print_list(&filtered);
    }
    Ok(())
}

fn read_draft(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount < Decimal::ZERO {
        bail!("Amount must not be negative; use --type expense instead");
    }
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
    let account = ctx.account_named(sub.get_one::<String>("account").unwrap())?;
    // Only categories matching the transaction type are selectable.
    let category = ctx.category_named(sub.get_one::<String>("category").unwrap(), kind)?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };

    Ok(TransactionDraft {
        amount,
        r#type: kind,
        account_id: account.id,
        category_id: category.id,
        date,
        description: sub.get_one::<String>("description").cloned(),
    })
}

fn refetch(ctx: &AppContext) -> Result<()> {
    let all = ctx.transactions(None)?;
    print_list(&filter_rows(&all, None, ""));
    Ok(())
}

fn add(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let draft = read_draft(ctx, sub)?;
    let reply = ctx.api.create_transaction(&draft)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Could not create the transaction"));
    }
    println!(
        "Recorded {} {} on {}",
        draft.r#type.as_str(),
        fmt_amount(&draft.amount),
        draft.date
    );
    if reply.notification.is_some() {
        poke(ctx);
    }
    refetch(ctx)
}

fn edit(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let draft = read_draft(ctx, sub)?;
    let reply = ctx.api.update_transaction(id, &draft)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Could not update the transaction"));
    }
    println!("Updated transaction {}", id);
    if reply.notification.is_some() {
        poke(ctx);
    }
    refetch(ctx)
}

fn rm(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let reply = ctx.api.delete_transaction(id)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Could not delete the transaction"));
    }
    println!("Removed transaction {}", id);
    if reply.notification.is_some() {
        poke(ctx);
    }
    refetch(ctx)
}
