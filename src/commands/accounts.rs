// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Account;
use crate::session::AppContext;
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{bail, Context, Result};

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub),
        Some(("add", sub)) => add(ctx, sub),
        Some(("edit", sub)) => edit(ctx, sub),
        Some(("rm", sub)) => rm(ctx, sub),
        _ => Ok(()),
    }
}

pub fn rows(accounts: &[Account]) -> Vec<Vec<String>> {
    accounts
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.name.clone(),
                fmt_amount(&a.balance),
                if a.is_cash { "cash" } else { "bank" }.to_string(),
            ]
        })
        .collect()
}

fn print_list(accounts: &[Account]) {
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Balance", "Kind"], rows(accounts))
    );
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = ctx.accounts().context("Could not fetch accounts")?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
        print_list(&accounts);
    }
    Ok(())
}

fn add(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
    let cash = *sub.get_one::<bool>("cash").unwrap();

    let reply = ctx.api.create_account(name, balance, cash)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Could not create the account"));
    }
    println!("Added account '{}'", name);
    print_list(&ctx.accounts()?);
    Ok(())
}

fn edit(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let cash = *sub.get_one::<bool>("cash").unwrap();

    let reply = ctx.api.update_account(id, name, cash)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Could not update the account"));
    }
    println!("Updated account '{}'", name);
    print_list(&ctx.accounts()?);
    Ok(())
}

fn rm(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();

    let reply = ctx.api.delete_account(id)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Could not delete the account"));
    }
    println!("Removed account {}", id);
    print_list(&ctx.accounts()?);
    Ok(())
}
