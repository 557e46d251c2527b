// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::TxKind;
use crate::utils::{
    id_for_account, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
};

pub const TRANSFER_CATEGORY: &str = "Transfer";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("source and destination are the same account")]
    SameAccount,
    #[error("transfer amount must be positive")]
    NonPositiveAmount,
    #[error("account '{0}' not found")]
    UnknownAccount(String),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = remove(conn, id)?;
            println!("Removed {} row(s)", n);
        }
        Some(("transfer", sub)) => {
            let from = sub.get_one::<String>("from").unwrap();
            let to = sub.get_one::<String>("to").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let date = match sub.get_one::<String>("date") {
                Some(d) => parse_date(d)?,
                None => Utc::now().date_naive(),
            };
            let note = sub.get_one::<String>("note").map(|s| s.as_str());
            transfer(conn, from, to, amount, date, note)?;
            println!("Transferred {} from '{}' to '{}'", amount, from, to);
        }
        Some(("export", sub)) => export_csv(conn, sub.get_one::<String>("out").unwrap())?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account_name = sub.get_one::<String>("account").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Amount must be positive; direction comes from --kind"));
    }
    let category = sub.get_one::<String>("category").unwrap();
    let kind_s = sub.get_one::<String>("kind").unwrap();
    let kind =
        TxKind::parse(kind_s).ok_or_else(|| anyhow!("Invalid kind '{}', use income|expense", kind_s))?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Utc::now().date_naive(),
    };
    let desc = sub.get_one::<String>("desc").map(|s| s.as_str()).unwrap_or("");

    let account_id = id_for_account(conn, account_name)?;
    insert(conn, date, account_id, amount, category, desc, kind, None)?;
    println!(
        "Recorded {} {} '{}' on {} (acct: {})",
        kind.as_str(),
        amount,
        category,
        date,
        account_name
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn insert(
    conn: &Connection,
    date: NaiveDate,
    account_id: i64,
    amount: Decimal,
    category: &str,
    description: &str,
    kind: TxKind,
    transfer_id: Option<i64>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(date, account_id, amount, category, description, kind, transfer_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            date.to_string(),
            account_id,
            amount.to_string(),
            category,
            description,
            kind.as_str(),
            transfer_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Moves money between two accounts as one atomic action: an expense leg on
/// the source and an income leg on the destination, linked by a shared
/// transfer id. Either both rows land or neither does.
pub fn transfer(
    conn: &mut Connection,
    from: &str,
    to: &str,
    amount: Decimal,
    date: NaiveDate,
    note: Option<&str>,
) -> Result<(i64, i64), TransferError> {
    if from == to {
        return Err(TransferError::SameAccount);
    }
    if amount <= Decimal::ZERO {
        return Err(TransferError::NonPositiveAmount);
    }
    let src_id =
        id_for_account(conn, from).map_err(|_| TransferError::UnknownAccount(from.to_string()))?;
    let dst_id =
        id_for_account(conn, to).map_err(|_| TransferError::UnknownAccount(to.to_string()))?;
    if src_id == dst_id {
        return Err(TransferError::SameAccount);
    }

    let tx = conn.transaction()?;
    let (out_id, in_id) = {
        let transfer_id: i64 = tx.query_row(
            "SELECT COALESCE(MAX(transfer_id), 0) + 1 FROM transactions",
            [],
            |r| r.get(0),
        )?;
        let out_desc = match note {
            Some(n) => format!("Transfer to {} ({})", to, n),
            None => format!("Transfer to {}", to),
        };
        let in_desc = match note {
            Some(n) => format!("Transfer from {} ({})", from, n),
            None => format!("Transfer from {}", from),
        };
        tx.execute(
            "INSERT INTO transactions(date, account_id, amount, category, description, kind, transfer_id)
             VALUES (?1, ?2, ?3, ?4, ?5, 'expense', ?6)",
            params![date.to_string(), src_id, amount.to_string(), TRANSFER_CATEGORY, out_desc, transfer_id],
        )?;
        let out_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO transactions(date, account_id, amount, category, description, kind, transfer_id)
             VALUES (?1, ?2, ?3, ?4, ?5, 'income', ?6)",
            params![date.to_string(), dst_id, amount.to_string(), TRANSFER_CATEGORY, in_desc, transfer_id],
        )?;
        let in_id = tx.last_insert_rowid();
        (out_id, in_id)
    };
    tx.commit()?;
    Ok((out_id, in_id))
}

/// Deletes a transaction; when the row is one leg of a transfer, its
/// counterpart (same transfer id) goes with it.
pub fn remove(conn: &Connection, id: i64) -> Result<usize> {
    let transfer_id: Option<Option<i64>> = conn
        .query_row(
            "SELECT transfer_id FROM transactions WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    match transfer_id {
        None => Ok(0),
        Some(Some(tid)) => Ok(conn.execute(
            "DELETE FROM transactions WHERE transfer_id=?1",
            params![tid],
        )?),
        Some(None) => Ok(conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?),
    }
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub account: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.account.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Account", "Kind", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, a.name, t.kind, t.amount, t.category, t.description
         FROM transactions t LEFT JOIN accounts a ON t.account_id=a.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        parse_month(month)?;
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        sql.push_str(" AND a.name=?");
        params_vec.push(acct.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND t.category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            account: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            kind: r.get(3)?,
            amount: r.get(4)?,
            category: r.get(5)?,
            description: r.get(6)?,
        });
    }
    Ok(data)
}

fn export_csv(conn: &Connection, out: &str) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT t.date, a.name, t.kind, t.amount, t.category, t.description
         FROM transactions t LEFT JOIN accounts a ON t.account_id=a.id
         ORDER BY t.date, t.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, Option<String>>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;

    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record(["date", "account", "kind", "amount", "category", "description"])?;
    for row in rows {
        let (d, a, k, amt, cat, desc) = row?;
        wtr.write_record([d, a.unwrap_or_default(), k, amt, cat, desc])?;
    }
    wtr.flush()?;
    println!("Exported transactions to {}", out);
    Ok(())
}
