// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneylens::utils;
use rust_decimal::Decimal;

#[test]
fn amounts_display_with_thousands_groups() {
    assert_eq!(utils::fmt_amount(&Decimal::new(2_000_000, 0)), "2,000,000");
    assert_eq!(utils::fmt_amount(&Decimal::new(0, 0)), "0");
    assert_eq!(utils::fmt_amount(&Decimal::new(999, 0)), "999");
    assert_eq!(utils::fmt_amount(&Decimal::new(1000, 0)), "1,000");
    assert_eq!(utils::fmt_amount(&Decimal::new(-1234567, 0)), "-1,234,567");
    assert_eq!(utils::fmt_amount(&Decimal::new(123455, 1)), "12,345.5");
}

#[test]
fn display_amounts_round_to_two_places_and_drop_trailing_zeros() {
    assert_eq!(utils::fmt_amount(&Decimal::new(1999, 3)), "2");
    assert_eq!(utils::fmt_amount(&Decimal::new(150, 2)), "1.5");
}

#[test]
fn timestamps_render_as_day_first_local_style() {
    assert_eq!(
        utils::fmt_when("2024-02-01T10:30:00.000Z"),
        "01/02/2024 10:30"
    );
    assert_eq!(utils::fmt_when("2024-01-31"), "31/01/2024");
    // Unparseable input passes through rather than disappearing.
    assert_eq!(utils::fmt_when("soon"), "soon");
}

#[test]
fn date_parsing_requires_iso_dates() {
    assert!(utils::parse_date("2024-01-31").is_ok());
    assert!(utils::parse_date("31/01/2024").is_err());
    assert!(utils::parse_date("2024-13-01").is_err());
}

#[test]
fn ranges_must_be_ordered() {
    let from = "2024-02-01".to_string();
    let to = "2024-01-01".to_string();
    assert!(utils::parse_range(Some(&from), Some(&to)).is_err());
    assert!(utils::parse_range(Some(&to), Some(&from)).unwrap().is_some());
    assert!(utils::parse_range(None, None).unwrap().is_none());
}

#[test]
fn email_shapes_are_checked_before_any_request() {
    assert!(utils::valid_email("user@example.com"));
    assert!(utils::valid_email("a.b+c@sub.domain.vn"));
    assert!(!utils::valid_email("user"));
    assert!(!utils::valid_email("user@host"));
    assert!(!utils::valid_email("user name@example.com"));
    assert!(!utils::valid_email("@example.com"));
}

#[test]
fn kind_parsing_accepts_only_the_two_directions() {
    assert!(utils::parse_kind("expense").is_ok());
    assert!(utils::parse_kind("income").is_ok());
    assert!(utils::parse_kind("transfer").is_err());
    assert!(utils::parse_kind("Expense").is_err());
}
