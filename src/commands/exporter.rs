// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use crate::models::Transaction;
use crate::report::{export_rows, ExportRow, EXPORT_HEADERS};
use crate::session::AppContext;
use crate::utils::parse_range;
use anyhow::{bail, Context, Result};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => bail!("Unknown format: {} (use csv|json)", other),
        }
    }
}

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => export_report(ctx, sub),
        Some(("transactions", sub)) => export_transactions(ctx, sub),
        _ => Ok(()),
    }
}

fn export_report(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = Format::parse(sub.get_one::<String>("format").unwrap())?;
    let out = sub.get_one::<String>("out").unwrap();
    let Some((start, end)) =
        parse_range(sub.get_one::<String>("from"), sub.get_one::<String>("to"))?
    else {
        bail!("--from and --to are required");
    };

    let report = ctx.api.report_pie(start, end)?;
    let rows = export_rows(&report);
    write_report(&rows, fmt, Path::new(out))?;
    println!("Exported report {}..{} to {}", start, end, out);
    Ok(())
}

pub fn write_report(rows: &[ExportRow], fmt: Format, out: &Path) -> Result<()> {
    match fmt {
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Open {}", out.display()))?;
            wtr.write_record(EXPORT_HEADERS)?;
            for row in rows {
                wtr.write_record([
                    row.section.as_str(),
                    row.category.as_str(),
                    row.date.as_str(),
                    row.amount.as_str(),
                    row.description.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            std::fs::write(out, serde_json::to_string_pretty(rows)?)?;
        }
    }
    Ok(())
}

fn export_transactions(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = Format::parse(sub.get_one::<String>("format").unwrap())?;
    let out = sub.get_one::<String>("out").unwrap();
    let range = parse_range(sub.get_one::<String>("from"), sub.get_one::<String>("to"))?;

    let rows = ctx.transactions(range).context("Could not fetch transactions")?;
    write_transactions(&rows, fmt, Path::new(out))?;
    println!("Exported {} transaction(s) to {}", rows.len(), out);
    Ok(())
}

pub fn write_transactions(rows: &[Transaction], fmt: Format, out: &Path) -> Result<()> {
    match fmt {
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Open {}", out.display()))?;
            wtr.write_record(["date", "type", "amount", "account", "category", "description"])?;
            for t in rows {
                let amount = t.amount.to_string();
                wtr.write_record([
                    t.date.as_str(),
                    t.r#type.as_str(),
                    amount.as_str(),
                    t.account_name.as_deref().unwrap_or_default(),
                    t.category_name.as_deref().unwrap_or_default(),
                    t.description.as_deref().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date,
                        "type": t.r#type.as_str(),
                        "amount": t.amount.to_string(),
                        "account": t.account_name,
                        "category": t.category_name,
                        "description": t.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    Ok(())
}
