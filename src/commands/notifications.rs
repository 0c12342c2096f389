// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use crate::models::Notification;
use crate::notify::{MarkOutcome, Poller};
use crate::session::AppContext;
use crate::utils::{fmt_when, maybe_print_json, pretty_table};
use anyhow::{bail, Context, Result};

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub),
        Some(("read", sub)) => read(ctx, sub),
        Some(("rm", sub)) => rm(ctx, sub),
        Some(("clear", _)) => clear(ctx),
        Some(("watch", sub)) => watch(ctx, sub),
        _ => Ok(()),
    }
}

/// Refresh notifications after a mutation that the server flagged with a
/// side-effect message. Failures here are a notice, not an error; the
/// mutation itself already succeeded.
pub(crate) fn poke(ctx: &AppContext) {
    let center = ctx.center();
    match center.refresh() {
        Ok(unread) => println!("You have {} unread notification(s)", unread),
        Err(e) => eprintln!("Could not refresh notifications: {}", e),
    }
}

fn print_list(items: &[Notification]) {
    let rows = items
        .iter()
        .map(|n| {
            vec![
                n.id.clone(),
                fmt_when(&n.created_at),
                if n.is_read { "read" } else { "unread" }.to_string(),
                n.message.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "When", "Status", "Message"], rows));
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let items = ctx.notifications().context("Could not fetch notifications")?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    let unread = items.iter().filter(|n| !n.is_read).count();
    print_list(&items);
    println!("{} unread", unread);
    Ok(())
}

fn read(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let center = ctx.center();
    center.adopt(ctx.notifications()?);
    match center.mark_read(id)? {
        MarkOutcome::Updated => println!("Marked {} as read", id),
        MarkOutcome::AlreadyRead => println!("{} was already read", id),
        MarkOutcome::Missing => bail!("Notification '{}' not found", id),
    }
    println!("{} unread", center.unread());
    Ok(())
}

fn rm(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let center = ctx.center();
    center.adopt(ctx.notifications()?);
    if center.snapshot().iter().all(|n| n.id != *id) {
        bail!("Notification '{}' not found", id);
    }
    center.remove(id).context("Could not delete the notification")?;
    println!("Removed notification {}", id);
    println!("{} unread", center.unread());
    Ok(())
}

fn clear(ctx: &AppContext) -> Result<()> {
    let center = ctx.center();
    center.adopt(ctx.notifications()?);
    let n = center.clear().context(
        "Could not clear all notifications; run `moneylens noti list` to see what remains",
    )?;
    println!("Cleared {} notification(s)", n);
    Ok(())
}

fn watch(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let interval = *sub.get_one::<u64>("interval").unwrap();
    let center = Arc::new(ctx.center());

    println!(
        "Watching notifications every {}s, press Enter to stop",
        interval
    );
    let poller = Poller::spawn(Arc::clone(&center), Duration::from_secs(interval));

    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
    poller.stop();

    print_list(&center.snapshot());
    println!("{} unread", center.unread());
    Ok(())
}
