// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use gastocheck::commands::jobs::{AlertKind, alert_key, run_credit_alerts, run_snapshot};
use gastocheck::commands::snapshots;
use gastocheck::db;
use gastocheck::models::GLOBAL_SCOPE;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add_credit_account(conn: &Connection, name: &str, limit: &str, cut: u32, due: u32, rate: &str) -> i64 {
    conn.execute(
        "INSERT INTO accounts(name, kind, initial_balance, credit_limit, cut_day, due_day, interest_rate)
         VALUES (?1, 'credit', '0', ?2, ?3, ?4, ?5)",
        params![name, limit, cut, due, rate],
    )
    .unwrap();
    conn.last_insert_rowid()
}

#[test]
fn snapshot_job_records_global_balance() {
    let conn = setup();
    conn.execute(
        "INSERT INTO accounts(name, kind, initial_balance) VALUES ('Cash','cash','750')",
        [],
    )
    .unwrap();

    let bal = run_snapshot(&conn, d("2025-05-01")).unwrap();
    assert_eq!(bal, Decimal::from(750));

    let (scope, stored, taken_on, reason): (i64, String, String, String) = conn
        .query_row(
            "SELECT account_id, balance, taken_on, reason FROM snapshots",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(scope, GLOBAL_SCOPE);
    assert_eq!(stored, "750");
    assert_eq!(taken_on, "2025-05-01");
    assert_eq!(reason, "daily");
}

#[test]
fn trend_keeps_latest_row_per_day() {
    let conn = setup();
    snapshots::record(&conn, GLOBAL_SCOPE, Decimal::from(100), d("2025-05-01"), "daily").unwrap();
    snapshots::record(&conn, GLOBAL_SCOPE, Decimal::from(150), d("2025-05-01"), "daily").unwrap();
    snapshots::record(&conn, GLOBAL_SCOPE, Decimal::from(200), d("2025-05-02"), "daily").unwrap();

    let history = snapshots::daily_history(&conn, GLOBAL_SCOPE).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].balance, Decimal::from(150));
    assert_eq!(history[1].balance, Decimal::from(200));
}

#[test]
fn due_day_alert_includes_interest_estimate() {
    let conn = setup();
    // limit 1000, no transactions -> balance 0 -> debt 1000; 24% annual -> 20.00/month
    add_credit_account(&conn, "Visa", "1000", 1, 15, "24");

    let raised = run_credit_alerts(&conn, d("2025-05-15")).unwrap();
    assert_eq!(raised.len(), 1);
    assert!(raised[0].contains("due today"));
    assert!(raised[0].contains("20.00"));
}

#[test]
fn due_minus_three_and_cut_day_raise_their_own_alerts() {
    let conn = setup();
    add_credit_account(&conn, "Visa", "1000", 12, 15, "24");

    let cut = run_credit_alerts(&conn, d("2025-05-12")).unwrap();
    assert_eq!(cut.len(), 2); // cut day and due-3 coincide on the 12th
    assert!(cut.iter().any(|m| m.contains("Statement")));
    assert!(cut.iter().any(|m| m.contains("due in 3 days")));

    let quiet = run_credit_alerts(&conn, d("2025-05-20")).unwrap();
    assert!(quiet.is_empty());
}

#[test]
fn repeated_alerts_update_instead_of_stacking() {
    let conn = setup();
    add_credit_account(&conn, "Visa", "1000", 1, 15, "24");

    run_credit_alerts(&conn, d("2025-05-15")).unwrap();
    run_credit_alerts(&conn, d("2025-06-15")).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM notifications", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let read: i64 = conn
        .query_row("SELECT read FROM notifications", [], |r| r.get(0))
        .unwrap();
    assert_eq!(read, 0);
}

#[test]
fn alert_keys_are_stable_and_distinct() {
    assert_eq!(alert_key(7, AlertKind::StatementCut), 71);
    assert_eq!(alert_key(7, AlertKind::DueSoon), 72);
    assert_eq!(alert_key(7, AlertKind::DueToday), 73);
    assert_ne!(alert_key(1, AlertKind::DueToday), alert_key(2, AlertKind::DueToday));
}
