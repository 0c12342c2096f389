// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;
use std::time::Duration;

use moneylens::api::{ApiClient, ApiError};
use moneylens::models::Notification;
use moneylens::notify::{Inbox, MarkOutcome, NotificationCenter, Poller};

const DEAD_URL: &str = "http://127.0.0.1:9";

fn item(id: &str, read: bool) -> Notification {
    Notification {
        id: id.into(),
        message: format!("message {}", id),
        created_at: "2024-02-01T10:30:00.000Z".into(),
        is_read: read,
    }
}

fn dead_center(items: Vec<Notification>) -> NotificationCenter {
    let center = NotificationCenter::new(ApiClient::new(DEAD_URL).unwrap(), true);
    center.adopt(items);
    center
}

#[test]
fn unread_count_is_derived_from_the_items() {
    let mut inbox = Inbox::default();
    inbox.replace(vec![item("n1", false), item("n2", true), item("n3", false)]);
    assert_eq!(inbox.unread(), 2);

    assert_eq!(inbox.flag_read("n1"), MarkOutcome::Updated);
    assert_eq!(inbox.unread(), 1);
}

#[test]
fn flag_read_on_an_already_read_item_is_a_noop() {
    let mut inbox = Inbox::default();
    inbox.replace(vec![item("n1", true)]);
    assert_eq!(inbox.flag_read("n1"), MarkOutcome::AlreadyRead);
    assert_eq!(inbox.flag_read("nope"), MarkOutcome::Missing);
    assert_eq!(inbox.unread(), 0);
}

#[test]
fn remove_reports_whether_anything_went_away() {
    let mut inbox = Inbox::default();
    inbox.replace(vec![item("n1", false), item("n2", false)]);
    assert!(inbox.remove("n1"));
    assert!(!inbox.remove("n1"));
    assert_eq!(inbox.len(), 1);
}

#[test]
fn mark_read_on_a_read_item_issues_no_request() {
    // The endpoint is dead, so any server call would error: an Ok result
    // proves the already-read short-circuit never touched the network.
    let center = dead_center(vec![item("n1", true)]);
    let outcome = center.mark_read("n1").unwrap();
    assert_eq!(outcome, MarkOutcome::AlreadyRead);
}

#[test]
fn mark_read_failure_leaves_the_item_unread() {
    let center = dead_center(vec![item("n1", false)]);
    let err = center.mark_read("n1").unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(center.unread(), 1);
}

#[test]
fn mark_read_on_an_unknown_id_is_reported_without_a_request() {
    let center = dead_center(vec![item("n1", false)]);
    assert_eq!(center.mark_read("ghost").unwrap(), MarkOutcome::Missing);
}

#[test]
fn remove_failure_leaves_the_list_unchanged() {
    let center = dead_center(vec![item("n1", false)]);
    assert!(center.remove("n1").is_err());
    assert_eq!(center.snapshot().len(), 1);
}

#[test]
fn clear_aborts_on_the_first_failure_with_the_list_untouched() {
    let center = dead_center(vec![item("n1", false), item("n2", true)]);
    let err = center.clear().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    // Local state is server-trusted: nothing was dropped speculatively.
    assert_eq!(center.snapshot().len(), 2);
    assert_eq!(center.unread(), 1);
}

#[test]
fn clear_of_an_empty_list_succeeds_offline() {
    let center = dead_center(Vec::new());
    assert_eq!(center.clear().unwrap(), 0);
    assert!(center.snapshot().is_empty());
}

#[test]
fn signed_out_refresh_resets_without_a_request() {
    let center = NotificationCenter::new(ApiClient::new(DEAD_URL).unwrap(), false);
    center.adopt(vec![item("n1", false)]);
    assert_eq!(center.refresh().unwrap(), 0);
    assert!(center.snapshot().is_empty());
}

#[test]
fn failed_refresh_resets_the_local_list() {
    let center = dead_center(vec![item("n1", false)]);
    assert!(center.refresh().is_err());
    assert!(center.snapshot().is_empty());
}

#[test]
fn poller_cancels_promptly_mid_interval() {
    let center = Arc::new(NotificationCenter::new(
        ApiClient::new(DEAD_URL).unwrap(),
        false,
    ));
    // A long interval would block for a minute if cancellation did not
    // interrupt the timer wait.
    let poller = Poller::spawn(Arc::clone(&center), Duration::from_secs(60));
    poller.stop();
}
