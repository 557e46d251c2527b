// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.gastocheck", "GastoCheck", "gastocheck"));

/// Bumping this wipes and recreates the local database on next open.
/// Destructive recreate is the documented migration policy, not a bug.
pub const SCHEMA_VERSION: i64 = 1;

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("gastocheck.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    let existing: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='schema_version'",
            [],
            |r| r.get(0),
        )
        .optional()
        .unwrap_or(None);
    if let Some(v) = existing {
        if v.parse::<i64>().unwrap_or(0) != SCHEMA_VERSION {
            wipe_all(conn)?;
        }
    }
    create_tables(conn)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}

fn wipe_all(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    DROP TABLE IF EXISTS pending_captures;
    DROP TABLE IF EXISTS snapshots;
    DROP TABLE IF EXISTS notifications;
    DROP TABLE IF EXISTS goals;
    DROP TABLE IF EXISTS subscriptions;
    DROP TABLE IF EXISTS transactions;
    DROP TABLE IF EXISTS categories;
    DROP TABLE IF EXISTS accounts;
    DROP TABLE IF EXISTS settings;
    "#,
    )?;
    Ok(())
}

fn create_tables(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        kind TEXT NOT NULL CHECK(kind IN ('cash','debit','credit','savings')),
        initial_balance TEXT NOT NULL DEFAULT '0',
        color TEXT,
        archived INTEGER NOT NULL DEFAULT 0,
        credit_limit TEXT,
        cut_day INTEGER,
        due_day INTEGER,
        interest_rate TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        account_id INTEGER NOT NULL,
        amount TEXT NOT NULL, -- positive magnitude; direction lives in kind
        category TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        transfer_id INTEGER, -- shared by the two legs of a transfer
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);

    CREATE TABLE IF NOT EXISTS subscriptions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        amount TEXT NOT NULL,
        due_date TEXT NOT NULL,
        recurrence TEXT NOT NULL CHECK(recurrence IN ('weekly','monthly','yearly')),
        icon TEXT,
        account_id INTEGER,
        note TEXT,
        lead_days INTEGER NOT NULL DEFAULT 3,
        remind_time TEXT NOT NULL DEFAULT '09:00',
        override_status TEXT CHECK(override_status IN ('paid','pending','canceled')),
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE SET NULL
    );

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        target_amount TEXT NOT NULL,
        saved_amount TEXT NOT NULL DEFAULT '0'
    );

    CREATE TABLE IF NOT EXISTS notifications(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        category TEXT NOT NULL,
        read INTEGER NOT NULL DEFAULT 0,
        alert_key INTEGER UNIQUE
    );

    CREATE TABLE IF NOT EXISTS snapshots(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL, -- -1 means global scope
        balance TEXT NOT NULL,
        taken_on TEXT NOT NULL,
        reason TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_snapshots_scope ON snapshots(account_id, taken_on);

    CREATE TABLE IF NOT EXISTS pending_captures(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        raw_text TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}
