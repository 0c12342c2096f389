// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use crate::models::{BarReport, CategoryBreakdown, PieReport};
use crate::utils::{fmt_amount, fmt_when};

/// Table rows for one pie section: category + server-side total.
pub fn breakdown_rows(slices: &[CategoryBreakdown]) -> Vec<Vec<String>> {
    slices
        .iter()
        .map(|s| vec![s.name.clone(), fmt_amount(&s.amount)])
        .collect()
}

/// Header row for the bar table: period label plus one column per series.
pub fn bar_headers(report: &BarReport) -> Vec<String> {
    let mut headers = vec!["Period".to_string()];
    headers.extend(report.series.iter().map(|s| s.name.clone()));
    headers
}

/// One row per period label, pairing it with the matching point of every
/// series. Series shorter than the label list pad with blanks rather than
/// guessing.
pub fn bar_rows(report: &BarReport) -> Vec<Vec<String>> {
    report
        .categories
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![label.clone()];
            for series in &report.series {
                row.push(
                    series
                        .data
                        .get(i)
                        .map(|v| format!("{:.2}", v))
                        .unwrap_or_default(),
                );
            }
            row
        })
        .collect()
}

/// One flattened export row. Category summary rows leave `date` and
/// `description` empty; detail rows repeat the category they belong to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub section: String,
    pub category: String,
    pub date: String,
    pub amount: String,
    pub description: String,
}

pub const EXPORT_HEADERS: [&str; 5] = ["section", "category", "date", "amount", "description"];

/// Flatten a pie report for spreadsheet export: totals first, then each
/// section's categories with their per-transaction detail. All numbers are
/// carried over as returned; nothing is recomputed.
pub fn export_rows(report: &PieReport) -> Vec<ExportRow> {
    let mut rows = vec![
        ExportRow {
            section: "Total".into(),
            category: "Income".into(),
            date: String::new(),
            amount: report.total_income.to_string(),
            description: String::new(),
        },
        ExportRow {
            section: "Total".into(),
            category: "Expense".into(),
            date: String::new(),
            amount: report.total_expense.to_string(),
            description: String::new(),
        },
    ];
    push_section(&mut rows, "Income", &report.income_by_category);
    push_section(&mut rows, "Expense", &report.expense_by_category);
    rows
}

fn push_section(rows: &mut Vec<ExportRow>, section: &str, slices: &[CategoryBreakdown]) {
    for slice in slices {
        rows.push(ExportRow {
            section: section.into(),
            category: slice.name.clone(),
            date: String::new(),
            amount: slice.amount.to_string(),
            description: String::new(),
        });
        for tx in &slice.transactions {
            rows.push(ExportRow {
                section: section.into(),
                category: slice.name.clone(),
                date: fmt_when(&tx.date),
                amount: tx.amount.to_string(),
                description: tx.description.clone().unwrap_or_default(),
            });
        }
    }
}
