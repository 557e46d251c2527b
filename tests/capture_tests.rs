// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gastocheck::{cli, commands::capture, db};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO accounts(name, kind, initial_balance) VALUES ('Cash','cash','1000')",
        [],
    )
    .unwrap();
    conn.execute("INSERT INTO categories(name) VALUES ('Comida'), ('Transporte')", [])
        .unwrap();
    conn
}

fn capture_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    let Some(("capture", m)) = matches.subcommand() else {
        panic!("no capture subcommand");
    };
    m.clone()
}

#[test]
fn a_priced_sentence_becomes_a_transaction() {
    let mut conn = setup();
    let m = capture_matches(&[
        "gastocheck",
        "capture",
        "gasto 200 en comida tacos",
        "--account",
        "Cash",
        "--date",
        "2025-04-01",
    ]);
    capture::handle(&mut conn, &m).unwrap();

    let (amount, category, kind): (String, String, String) = conn
        .query_row(
            "SELECT amount, category, kind FROM transactions",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(amount, "200");
    assert_eq!(category, "Comida");
    assert_eq!(kind, "expense");
}

#[test]
fn income_keywords_flip_the_direction() {
    let mut conn = setup();
    let m = capture_matches(&[
        "gastocheck",
        "capture",
        "recibí 1 500 de sueldo",
        "--account",
        "Cash",
    ]);
    capture::handle(&mut conn, &m).unwrap();

    let (amount, kind): (String, String) = conn
        .query_row("SELECT amount, kind FROM transactions", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(amount, "1500");
    assert_eq!(kind, "income");
}

#[test]
fn unpriced_sentences_land_in_pending_captures() {
    let mut conn = setup();
    let m = capture_matches(&["gastocheck", "capture", "gasto en comida", "--account", "Cash"]);
    capture::handle(&mut conn, &m).unwrap();

    let txs: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(txs, 0);
    let (pending, text): (i64, String) = conn
        .query_row("SELECT COUNT(*), MAX(raw_text) FROM pending_captures", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(pending, 1);
    assert_eq!(text, "gasto en comida");
}

#[test]
fn goal_sentences_fund_the_named_goal_with_cap() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO goals(name, target_amount, saved_amount) VALUES ('Viaje', '500', '400')",
        [],
    )
    .unwrap();
    let m = capture_matches(&["gastocheck", "capture", "meta 300 para viaje", "--account", "Cash"]);
    capture::handle(&mut conn, &m).unwrap();

    let saved: String = conn
        .query_row("SELECT saved_amount FROM goals WHERE name='Viaje'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(saved, "500");
    let txs: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(txs, 0);
}
