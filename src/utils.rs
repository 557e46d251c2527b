// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::{Account, AccountKind, Transaction, TxKind};

const UA: &str = concat!(
    "gastocheck/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/gastocheck/gastocheck)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// A stored money column: TEXT-encoded `Decimal`.
pub fn decimal_col(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid stored amount '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_account(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM accounts WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Account '{}' not found", name))?;
    Ok(id)
}

pub fn account_name(conn: &Connection, id: i64) -> Result<String> {
    let name: String = conn
        .query_row("SELECT name FROM accounts WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .with_context(|| format!("Account #{} not found", id))?;
    Ok(name)
}

fn account_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<(Account, String)> {
    let kind_s: String = r.get(2)?;
    let initial_s: String = r.get(3)?;
    Ok((
        Account {
            id: r.get(0)?,
            name: r.get(1)?,
            kind: AccountKind::parse(&kind_s).unwrap_or(AccountKind::Cash),
            initial_balance: Decimal::ZERO,
            color: r.get(4)?,
            archived: r.get::<_, i64>(5)? != 0,
            credit_limit: None,
            cut_day: r.get(7)?,
            due_day: r.get(8)?,
            interest_rate: None,
        },
        initial_s,
    ))
}

pub fn load_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, initial_balance, color, archived, credit_limit, cut_day, due_day, interest_rate
         FROM accounts ORDER BY name",
    )?;
    let mut out = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        let (mut acct, initial_s) = account_from_row(r)?;
        acct.initial_balance = decimal_col(&initial_s)?;
        let limit_s: Option<String> = r.get(6)?;
        acct.credit_limit = limit_s.as_deref().map(decimal_col).transpose()?;
        let rate_s: Option<String> = r.get(9)?;
        acct.interest_rate = rate_s.as_deref().map(decimal_col).transpose()?;
        out.push(acct);
    }
    Ok(out)
}

pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, account_id, amount, category, description, kind, transfer_id
         FROM transactions ORDER BY date, id",
    )?;
    let mut out = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        let date_s: String = r.get(1)?;
        let amount_s: String = r.get(3)?;
        let kind_s: String = r.get(6)?;
        out.push(Transaction {
            id: r.get(0)?,
            date: parse_date(&date_s)?,
            account_id: r.get(2)?,
            amount: decimal_col(&amount_s)?,
            category: r.get(4)?,
            description: r.get(5)?,
            kind: TxKind::parse(&kind_s)
                .with_context(|| format!("Invalid transaction kind '{}'", kind_s))?,
            transfer_id: r.get(7)?,
        });
    }
    Ok(out)
}

pub fn category_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY id")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

// settings key-value helpers

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| r.get(0))
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
