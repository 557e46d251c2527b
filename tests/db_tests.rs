// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gastocheck::db;
use rusqlite::Connection;

#[test]
fn reopening_with_same_version_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastocheck.sqlite");

    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO accounts(name, kind, initial_balance) VALUES ('Cash','cash','10')",
        [],
    )
    .unwrap();
    drop(conn);

    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn version_mismatch_recreates_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gastocheck.sqlite");

    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO accounts(name, kind, initial_balance) VALUES ('Cash','cash','10')",
        [],
    )
    .unwrap();
    // simulate a database written by an older build
    conn.execute("UPDATE settings SET value='0' WHERE key='schema_version'", [])
        .unwrap();
    drop(conn);

    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);

    let version: String = conn
        .query_row("SELECT value FROM settings WHERE key='schema_version'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(version, db::SCHEMA_VERSION.to_string());
}
