// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::session::AppContext;
use crate::utils::{maybe_print_json, parse_kind, pretty_table};
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

pub fn rows(categories: &[Category]) -> Vec<Vec<String>> {
    categories
        .iter()
        .map(|c| vec![c.id.clone(), c.name.clone(), c.r#type.as_str().to_string()])
        .collect()
}

fn print_list(categories: &[Category]) {
    println!("{}", pretty_table(&["ID", "Name", "Type"], rows(categories)));
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let categories = ctx.categories().context("Could not fetch categories")?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
        print_list(&categories);
    }
    Ok(())
}

fn add(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;

    let reply = ctx.api.create_category(name, kind)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Could not create the category"));
    }
    println!("Added category '{}' ({})", name, kind.as_str());
    print_list(&ctx.categories()?);
    Ok(())
}

fn edit(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;

    let reply = ctx.api.update_category(id, name, kind)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Could not update the category"));
    }
    println!("Updated category '{}'", name);
    print_list(&ctx.categories()?);
    Ok(())
}

fn rm(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();

    let reply = ctx.api.delete_category(id)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Could not delete the category"));
    }
    println!("Removed category {}", id);
    print_list(&ctx.categories()?);
    Ok(())
}
