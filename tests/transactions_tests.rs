// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneylens::commands::transactions;
use moneylens::models::{EntryKind, Transaction};
use moneylens::{cli, utils};
use rust_decimal::Decimal;

fn tx(id: &str, kind: EntryKind, account: &str, category: &str, desc: &str) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::new(50000, 0),
        r#type: kind,
        account_id: format!("acc-{}", account),
        account_name: Some(account.into()),
        category_id: format!("cat-{}", category),
        category_name: Some(category.into()),
        date: "2024-01-15T08:00:00.000Z".into(),
        description: if desc.is_empty() { None } else { Some(desc.into()) },
    }
}

fn fixture() -> Vec<Transaction> {
    vec![
        tx("t1", EntryKind::Expense, "Wallet", "Groceries", "weekly shop"),
        tx("t2", EntryKind::Income, "Checking", "Salary", "january pay"),
        tx("t3", EntryKind::Expense, "Checking", "Dining", "coffee with An"),
        tx("t4", EntryKind::Expense, "Wallet", "Dining", ""),
    ]
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn type_filter_narrows_locally() {
    let all = fixture();
    let m = list_matches(&["moneylens", "tx", "list", "--type", "expense"]);
    let rows = transactions::select_rows(&all, &m).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|t| t.r#type == EntryKind::Expense));
}

#[test]
fn keyword_search_covers_account_category_and_description() {
    let all = fixture();

    let m = list_matches(&["moneylens", "tx", "list", "--search", "wallet"]);
    let rows = transactions::select_rows(&all, &m).unwrap();
    assert_eq!(rows.len(), 2);

    let m = list_matches(&["moneylens", "tx", "list", "--search", "COFFEE"]);
    let rows = transactions::select_rows(&all, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "t3");

    let m = list_matches(&["moneylens", "tx", "list", "--search", "dining"]);
    let rows = transactions::select_rows(&all, &m).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn search_narrows_within_the_type_filter() {
    let all = fixture();
    let m = list_matches(&[
        "moneylens", "tx", "list", "--type", "expense", "--search", "checking",
    ]);
    let rows = transactions::select_rows(&all, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "t3");
}

#[test]
fn list_limit_respected() {
    let all = fixture();
    let m = list_matches(&["moneylens", "tx", "list", "--limit", "2"]);
    let rows = transactions::select_rows(&all, &m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "t1");
}

#[test]
fn unknown_type_is_rejected() {
    let all = fixture();
    let m = list_matches(&["moneylens", "tx", "list", "--type", "transfer"]);
    assert!(transactions::select_rows(&all, &m).is_err());
}

#[test]
fn filter_rows_without_criteria_keeps_everything() {
    let all = fixture();
    let rows = transactions::filter_rows(&all, None, "");
    assert_eq!(rows.len(), all.len());
}

#[test]
fn date_range_flags_parse_into_an_inclusive_server_range() {
    let m = list_matches(&[
        "moneylens", "tx", "list", "--from", "2024-01-01", "--to", "2024-01-31",
    ]);
    let range = utils::parse_range(m.get_one("from"), m.get_one("to"))
        .unwrap()
        .unwrap();
    assert_eq!(range.0.to_string(), "2024-01-01");
    assert_eq!(range.1.to_string(), "2024-01-31");
}

#[test]
fn half_open_date_ranges_are_rejected_before_any_request() {
    let m = list_matches(&["moneylens", "tx", "list", "--from", "2024-01-01"]);
    assert!(utils::parse_range(m.get_one("from"), m.get_one("to")).is_err());
}
