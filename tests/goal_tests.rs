// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gastocheck::commands::goals::{capped_contribution, contribute};
use gastocheck::db;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn contribution_is_capped_at_target() {
    let target = Decimal::from(1000);
    assert_eq!(capped_contribution(Decimal::from(200), target, Decimal::from(300)), Decimal::from(500));
    assert_eq!(capped_contribution(Decimal::from(900), target, Decimal::from(300)), target);
    assert_eq!(capped_contribution(target, target, Decimal::from(1)), target);
}

#[test]
fn funding_a_goal_updates_the_stored_saved_amount() {
    let conn = setup();
    conn.execute(
        "INSERT INTO goals(name, target_amount, saved_amount) VALUES ('Viaje', '1000', '800')",
        [],
    )
    .unwrap();

    let next = contribute(&conn, "Viaje", Decimal::from(500)).unwrap();
    assert_eq!(next, Decimal::from(1000));

    let stored: String = conn
        .query_row("SELECT saved_amount FROM goals WHERE name='Viaje'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(stored, "1000");
}

#[test]
fn funding_a_missing_goal_is_an_error() {
    let conn = setup();
    assert!(contribute(&conn, "Nada", Decimal::from(10)).is_err());
}
