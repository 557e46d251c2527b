// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use serde::Serialize;

use crate::ledger;
use crate::models::AccountKind;
use crate::utils::{
    fmt_money, load_accounts, load_transactions, maybe_print_json, parse_decimal, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("archive", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute("UPDATE accounts SET archived=1 WHERE name=?1", params![name])?;
            if n == 0 {
                return Err(anyhow!("Account '{}' not found", name));
            }
            println!("Archived account '{}'", name);
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            // FK cascade removes the account's transactions with it
            let n = conn.execute("DELETE FROM accounts WHERE name=?1", params![name])?;
            if n == 0 {
                return Err(anyhow!("Account '{}' not found", name));
            }
            conn.execute(
                "DELETE FROM snapshots WHERE account_id NOT IN (SELECT id FROM accounts) AND account_id != -1",
                [],
            )?;
            println!("Removed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind_s = sub.get_one::<String>("kind").unwrap();
    let kind = AccountKind::parse(kind_s)
        .ok_or_else(|| anyhow!("Invalid account kind '{}'", kind_s))?;
    let initial = parse_decimal(sub.get_one::<String>("initial").unwrap())?;
    let color = sub.get_one::<String>("color").map(|s| s.to_string());
    let limit = sub
        .get_one::<String>("limit")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let cut_day = sub.get_one::<u32>("cut-day").copied();
    let due_day = sub.get_one::<u32>("due-day").copied();
    let rate = sub
        .get_one::<String>("rate")
        .map(|s| parse_decimal(s))
        .transpose()?;

    if kind == AccountKind::Credit && limit.is_none() {
        return Err(anyhow!("Credit accounts need --limit"));
    }

    conn.execute(
        "INSERT INTO accounts(name, kind, initial_balance, color, credit_limit, cut_day, due_day, interest_rate)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            name,
            kind.as_str(),
            initial.to_string(),
            color,
            limit.map(|d| d.to_string()),
            cut_day,
            due_day,
            rate.map(|d| d.to_string()),
        ],
    )?;
    println!("Added account '{}' ({}, initial {})", name, kind.as_str(), fmt_money(&initial));
    Ok(())
}

#[derive(Serialize)]
pub struct AccountRow {
    pub name: String,
    pub kind: String,
    pub balance: String,
    pub debt: String,
    pub archived: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = load_accounts(conn)?;
    let txs = load_transactions(conn)?;

    let mut data = Vec::new();
    for a in &accounts {
        let balance = ledger::account_balance(a, &txs);
        let debt = match a.credit_limit {
            Some(limit) if a.kind == AccountKind::Credit => {
                fmt_money(&ledger::credit_debt(limit, balance))
            }
            _ => String::new(),
        };
        data.push(AccountRow {
            name: a.name.clone(),
            kind: a.kind.as_str().to_string(),
            balance: fmt_money(&balance),
            debt,
            archived: a.archived,
        });
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.kind.clone(),
                    r.balance.clone(),
                    r.debt.clone(),
                    if r.archived { "yes".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Account", "Kind", "Balance", "Debt", "Archived"], rows)
        );
    }
    Ok(())
}
