// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use gastocheck::commands::subscriptions::{derive_status, monthly_cost, upcoming};
use gastocheck::models::{Recurrence, StatusSource, Subscription, SubscriptionStatus};
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn sub(name: &str, amount: &str, due: &str, rec: Recurrence, over: Option<SubscriptionStatus>) -> Subscription {
    Subscription {
        id: 0,
        name: name.to_string(),
        amount: amount.parse().unwrap(),
        due_date: d(due),
        recurrence: rec,
        icon: None,
        account_id: None,
        note: None,
        lead_days: 3,
        remind_time: "09:00".to_string(),
        override_status: over,
    }
}

#[test]
fn past_due_derives_overdue_future_derives_pending() {
    let today = d("2025-06-15");
    assert_eq!(
        derive_status(StatusSource::Derived, d("2025-06-14"), today),
        SubscriptionStatus::Overdue
    );
    assert_eq!(
        derive_status(StatusSource::Derived, d("2025-06-15"), today),
        SubscriptionStatus::Pending
    );
    assert_eq!(
        derive_status(StatusSource::Derived, d("2025-06-20"), today),
        SubscriptionStatus::Pending
    );
}

#[test]
fn manual_override_short_circuits_the_due_date() {
    let today = d("2025-06-15");
    // due date long past, but the user marked it paid
    assert_eq!(
        derive_status(
            StatusSource::Overridden(SubscriptionStatus::Paid),
            d("2020-01-01"),
            today
        ),
        SubscriptionStatus::Paid
    );
    assert_eq!(
        derive_status(
            StatusSource::Overridden(SubscriptionStatus::Canceled),
            d("2030-01-01"),
            today
        ),
        SubscriptionStatus::Canceled
    );
}

#[test]
fn upcoming_keeps_pending_within_five_days_sorted() {
    let today = d("2025-06-15");
    let subs = vec![
        sub("later", "10", "2025-06-25", Recurrence::Monthly, None),
        sub("soon", "10", "2025-06-17", Recurrence::Monthly, None),
        sub("today", "10", "2025-06-15", Recurrence::Monthly, None),
        sub("overdue", "10", "2025-06-10", Recurrence::Monthly, None),
        sub("edge", "10", "2025-06-20", Recurrence::Monthly, None),
        sub("paid", "10", "2025-06-16", Recurrence::Monthly, Some(SubscriptionStatus::Paid)),
    ];
    let names: Vec<String> = upcoming(&subs, today).into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["today", "soon", "edge"]);
}

#[test]
fn monthly_cost_spreads_yearly_and_skips_canceled() {
    let today = d("2025-06-15");
    let subs = vec![
        sub("video", "120", "2025-07-01", Recurrence::Monthly, None),
        sub("domain", "240", "2025-12-01", Recurrence::Yearly, None),
        sub("gym", "999", "2025-07-01", Recurrence::Monthly, Some(SubscriptionStatus::Canceled)),
    ];
    // 120 + 240/12 = 140
    assert_eq!(monthly_cost(&subs, today), Decimal::from(140));
}

#[test]
fn weekly_cost_is_spread_over_the_year() {
    let today = d("2025-06-15");
    let subs = vec![sub("coffee", "12", "2025-06-20", Recurrence::Weekly, None)];
    // 12 * 52 / 12 = 52
    assert_eq!(monthly_cost(&subs, today), Decimal::from(52));
}
