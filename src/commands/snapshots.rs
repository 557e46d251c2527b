// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BalanceSnapshot, GLOBAL_SCOPE};
use crate::utils::{decimal_col, id_for_account, maybe_print_json, parse_date, pretty_table};

/// Appends one snapshot row. Snapshots are never edited afterwards.
pub fn record(
    conn: &Connection,
    account_id: i64,
    balance: Decimal,
    taken_on: NaiveDate,
    reason: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO snapshots(account_id, balance, taken_on, reason) VALUES (?1, ?2, ?3, ?4)",
        params![account_id, balance.to_string(), taken_on.to_string(), reason],
    )?;
    Ok(())
}

/// History for one scope with at most one point per calendar day; when a day
/// has several rows the most recent one wins.
pub fn daily_history(conn: &Connection, account_id: i64) -> Result<Vec<BalanceSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, balance, taken_on, reason FROM snapshots
         WHERE account_id=?1
           AND id IN (SELECT MAX(id) FROM snapshots WHERE account_id=?1 GROUP BY taken_on)
         ORDER BY taken_on",
    )?;
    let mut out = Vec::new();
    let mut rows = stmt.query(params![account_id])?;
    while let Some(r) = rows.next()? {
        let balance_s: String = r.get(2)?;
        let taken_s: String = r.get(3)?;
        out.push(BalanceSnapshot {
            id: r.get(0)?,
            account_id: r.get(1)?,
            balance: decimal_col(&balance_s)?,
            taken_on: parse_date(&taken_s)?,
            reason: r.get(4)?,
        });
    }
    Ok(out)
}

#[derive(Serialize)]
pub struct TrendRow {
    pub date: String,
    pub balance: String,
    pub reason: String,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let scope = match sub.get_one::<String>("account") {
        Some(name) => id_for_account(conn, name)?,
        None => GLOBAL_SCOPE,
    };
    let history = daily_history(conn, scope)?;
    let data: Vec<TrendRow> = history
        .iter()
        .map(|s| TrendRow {
            date: s.taken_on.to_string(),
            balance: format!("{:.2}", s.balance),
            reason: s.reason.clone(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.date.clone(), r.balance.clone(), r.reason.clone()])
            .collect();
        println!("{}", pretty_table(&["Date", "Balance", "Reason"], rows));
    }
    Ok(())
}
