// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::ledger;
use crate::models::AccountKind;
use crate::utils::{fmt_money, load_accounts, load_transactions, maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BalanceRow {
    pub account: String,
    pub kind: String,
    pub balance: String,
    pub debt: String,
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = load_accounts(conn)?;
    let txs = load_transactions(conn)?;

    let mut data = Vec::new();
    for a in &accounts {
        let balance = ledger::account_balance(a, &txs);
        let debt = match (a.kind, a.credit_limit) {
            (AccountKind::Credit, Some(limit)) => fmt_money(&ledger::credit_debt(limit, balance)),
            _ => String::new(),
        };
        data.push(BalanceRow {
            account: a.name.clone(),
            kind: a.kind.as_str().to_string(),
            balance: fmt_money(&balance),
            debt,
        });
    }
    let global = ledger::global_balance(&accounts, &txs);
    data.push(BalanceRow {
        account: "(global)".to_string(),
        kind: String::new(),
        balance: fmt_money(&global),
        debt: String::new(),
    });

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.account.clone(), r.kind.clone(), r.balance.clone(), r.debt.clone()])
            .collect();
        println!("{}", pretty_table(&["Account", "Kind", "Balance", "Debt"], rows));
    }
    Ok(())
}
