// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneylens::api::ApiClient;
use moneylens::config::TokenStore;
use moneylens::models::{Category, EntryKind};
use moneylens::session::{self, AppContext, Redirect, Session};
use tempfile::tempdir;

// Nothing listens here; any request against it errors immediately. Tests
// that must not touch the network rely on that.
const DEAD_URL: &str = "http://127.0.0.1:9";

fn dead_ctx(session: Session) -> AppContext {
    let dir = tempdir().unwrap();
    AppContext {
        api: ApiClient::new(DEAD_URL).unwrap(),
        session,
        tokens: TokenStore::at(dir.path().join("access_token")),
    }
}

#[test]
fn protected_commands_redirect_to_login_when_signed_out() {
    assert_eq!(session::gate(false, false), Some(Redirect::Login));
}

#[test]
fn entry_commands_redirect_home_when_signed_in() {
    assert_eq!(session::gate(true, true), Some(Redirect::Home));
}

#[test]
fn gate_passes_the_other_two_cases() {
    assert_eq!(session::gate(false, true), None);
    assert_eq!(session::gate(true, false), None);
}

#[test]
fn resolve_without_token_is_signed_out_and_offline() {
    let dir = tempdir().unwrap();
    let tokens = TokenStore::at(dir.path().join("access_token"));
    let mut api = ApiClient::new(DEAD_URL).unwrap();

    // No token stored: resolution must not issue a request, so the dead
    // endpoint is never noticed.
    let session = session::resolve(&mut api, &tokens);
    assert!(!session.authenticated);
    assert!(session.user.is_none());
    assert!(!api.has_token());
}

#[test]
fn resolve_clears_a_token_that_fails_the_profile_roundtrip() {
    let dir = tempdir().unwrap();
    let tokens = TokenStore::at(dir.path().join("access_token"));
    tokens.save("stale-token").unwrap();
    let mut api = ApiClient::new(DEAD_URL).unwrap();

    let session = session::resolve(&mut api, &tokens);
    assert!(!session.authenticated);
    // The failure is swallowed into signed-out and the credentials are gone.
    assert!(tokens.load().is_none());
    assert!(!api.has_token());
}

#[test]
fn signed_out_lists_are_empty_without_a_request() {
    let ctx = dead_ctx(Session::signed_out());

    assert!(ctx.accounts().unwrap().is_empty());
    assert!(ctx.categories().unwrap().is_empty());
    assert!(ctx.budgets().unwrap().is_empty());
    assert!(ctx.transactions(None).unwrap().is_empty());
    assert!(ctx.notifications().unwrap().is_empty());
}

fn fixture_categories() -> Vec<Category> {
    vec![
        Category {
            id: "c1".into(),
            name: "Salary".into(),
            r#type: EntryKind::Income,
        },
        Category {
            id: "c2".into(),
            name: "Groceries".into(),
            r#type: EntryKind::Expense,
        },
    ]
}

#[test]
fn selectable_only_offers_matching_kind() {
    let cats = fixture_categories();
    let offered = session::selectable(&cats, EntryKind::Expense);
    assert_eq!(offered.len(), 1);
    assert_eq!(offered[0].name, "Groceries");
}

#[test]
fn expense_entry_rejects_an_income_category() {
    let cats = fixture_categories();
    let err = session::select_category(&cats, "Salary", EntryKind::Expense).unwrap_err();
    assert!(err.to_string().contains("income category"));
}

#[test]
fn select_category_finds_the_matching_kind() {
    let cats = fixture_categories();
    let cat = session::select_category(&cats, "Groceries", EntryKind::Expense).unwrap();
    assert_eq!(cat.id, "c2");
}

#[test]
fn select_category_reports_unknown_names() {
    let cats = fixture_categories();
    let err = session::select_category(&cats, "Rent", EntryKind::Expense).unwrap_err();
    assert!(err.to_string().contains("not found"));
}
