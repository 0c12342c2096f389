// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneylens::api::{self, ApiError};
use moneylens::models::{Account, Notification, PieReport};
use serde_json::json;

#[test]
fn expect_data_parses_a_raw_list() {
    let v = json!([
        { "_id": "a1", "name": "Wallet", "balance": 120000, "isCash": true },
        { "_id": "a2", "name": "Checking", "balance": 1500000.5, "isCash": false }
    ]);
    let accounts: Vec<Account> = api::expect_data(v).unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].id, "a1");
    assert!(accounts[0].is_cash);
    assert_eq!(accounts[1].balance.to_string(), "1500000.5");
}

#[test]
fn expect_data_turns_a_message_reply_into_an_auth_error() {
    let v = json!({ "message": "Unauthorized" });
    let err = api::expect_data::<Vec<Account>>(v).unwrap_err();
    match err {
        ApiError::Auth(msg) => assert_eq!(msg, "Unauthorized"),
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[test]
fn expect_data_rejects_the_wrong_shape() {
    let v = json!({ "unexpected": true });
    assert!(matches!(
        api::expect_data::<Vec<Account>>(v),
        Err(ApiError::Unexpected(_))
    ));
}

#[test]
fn coded_reply_success_and_side_effect() {
    let v = json!({ "EC": 0, "EM": "Created", "notification": "Budget exceeded" });
    let coded = api::expect_coded(v).unwrap();
    assert!(coded.ok());
    assert_eq!(coded.notification.as_deref(), Some("Budget exceeded"));
}

#[test]
fn coded_reply_failure_prefers_the_server_message() {
    let v = json!({ "EC": 1, "EM": "Amount is required" });
    let coded = api::expect_coded(v).unwrap();
    assert!(!coded.ok());
    assert_eq!(coded.err_message("generic"), "Amount is required");
}

#[test]
fn coded_reply_failure_falls_back_to_the_generic_message() {
    let v = json!({ "EC": 1 });
    let coded = api::expect_coded(v).unwrap();
    assert_eq!(coded.err_message("Could not create the transaction"),
        "Could not create the transaction");
}

#[test]
fn flagged_reply_carries_success_and_notification() {
    let v = json!({
        "success": true,
        "message": "Budget created",
        "notificationMessage": "Budget nearly used up"
    });
    let flagged = api::expect_flagged(v).unwrap();
    assert!(flagged.success);
    assert_eq!(
        flagged.notification_message.as_deref(),
        Some("Budget nearly used up")
    );
}

#[test]
fn flagged_reply_failure_prefers_em_over_message() {
    let v = json!({ "success": false, "message": "", "EM": "Category already budgeted" });
    let flagged = api::expect_flagged(v).unwrap();
    assert_eq!(flagged.err_message("generic"), "Category already budgeted");

    let v = json!({ "success": false, "message": "No such budget" });
    let flagged = api::expect_flagged(v).unwrap();
    assert_eq!(flagged.err_message("generic"), "No such budget");

    let v = json!({ "success": false });
    let flagged = api::expect_flagged(v).unwrap();
    assert_eq!(flagged.err_message("generic"), "generic");
}

#[test]
fn report_reply_unwraps_the_dt_payload() {
    let v = json!({
        "EC": 0,
        "EM": "",
        "DT": {
            "incomeByCategory": [
                { "name": "Salary", "amount": 20000000, "transactions": [
                    { "date": "2024-01-05T09:00:00.000Z", "amount": 20000000, "description": "January" }
                ]}
            ],
            "expenseByCategory": [],
            "totalIncome": 20000000,
            "totalExpense": 0
        }
    });
    let report: PieReport = api::expect_report(v).unwrap();
    assert_eq!(report.income_by_category.len(), 1);
    assert_eq!(report.income_by_category[0].transactions.len(), 1);
    assert_eq!(report.total_income.to_string(), "20000000");
}

#[test]
fn report_reply_with_nonzero_ec_is_a_server_error() {
    let v = json!({ "EC": 2, "EM": "Invalid date range" });
    let err = api::expect_report::<PieReport>(v).unwrap_err();
    match err {
        ApiError::Server(msg) => assert_eq!(msg, "Invalid date range"),
        other => panic!("expected server error, got {:?}", other),
    }
}

#[test]
fn notification_wire_shape_round_trips() {
    let v = json!([{
        "_id": "n1",
        "message": "You spent over budget",
        "createdAt": "2024-02-01T10:30:00.000Z",
        "isRead": false
    }]);
    let items: Vec<Notification> = api::expect_data(v).unwrap();
    assert_eq!(items[0].id, "n1");
    assert!(!items[0].is_read);
}
