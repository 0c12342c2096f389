// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a category or transaction. The backend serializes this as the
/// lowercase strings `"expense"` / `"income"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Balance is maintained server-side as a side effect of transaction
/// mutations; the client never recomputes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub is_cash: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub r#type: EntryKind,
}

/// `spent`, `remaining`, and `spent_percentage` are server-computed
/// aggregates, reported as returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(rename = "_id")]
    pub id: String,
    pub category_id: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub start_date: String,
    pub end_date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    pub spent_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub r#type: EntryKind,
    pub account_id: String,
    #[serde(default)]
    pub account_name: Option<String>,
    pub category_id: String,
    #[serde(default)]
    pub category_name: Option<String>,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for transaction create/update. Amounts travel as positive JSON
/// numbers with the direction in `type`; dates as `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub r#type: EntryKind,
    pub account_id: String,
    pub category_id: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
    pub created_at: String,
    pub is_read: bool,
}

// Report payloads arrive pre-aggregated inside the coded `DT` field; the
// client only reshapes them (see the report module).

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetail {
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub transactions: Vec<ReportDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieReport {
    #[serde(default)]
    pub income_by_category: Vec<CategoryBreakdown>,
    #[serde(default)]
    pub expense_by_category: Vec<CategoryBreakdown>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarSeries {
    pub name: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarReport {
    /// Period labels, one per data point in each series.
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}
