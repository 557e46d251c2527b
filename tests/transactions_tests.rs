// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gastocheck::{cli, commands::transactions, db};
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO accounts(name, kind, initial_balance) VALUES ('A1','cash','0')",
        [],
    )
    .unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(date, account_id, amount, category, description, kind)
             VALUES (?1, 1, '10', 'Comida', '', 'expense')",
            params![format!("2025-01-0{}", i)],
        )
        .unwrap();
    }
    conn
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
fn list_limit_respected() {
    let conn = setup();
    let m = list_matches(&["gastocheck", "tx", "list", "--limit", "2"]);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_filters_by_month_account_and_category() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date, account_id, amount, category, description, kind)
         VALUES ('2025-02-01', 1, '99', 'Hogar', '', 'income')",
        [],
    )
    .unwrap();

    let m = list_matches(&["gastocheck", "tx", "list", "--month", "2025-01"]);
    assert_eq!(transactions::query_rows(&conn, &m).unwrap().len(), 3);

    let m = list_matches(&["gastocheck", "tx", "list", "--category", "Hogar"]);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "income");

    let m = list_matches(&["gastocheck", "tx", "list", "--account", "A1"]);
    assert_eq!(transactions::query_rows(&conn, &m).unwrap().len(), 4);
}
