// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns a free-text sentence into a recorded entry. The AI interpreter is
//! tried first when asked for; everything else (failure, no key, bad JSON)
//! lands on the offline heuristic. Sentences with no detectable amount are
//! parked as pending captures rather than dropped.

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::ai::{self, AiEntry, AiInterpretation};
use crate::commands::{goals, pending, transactions};
use crate::interpret::{self, CaptureKind, Interpretation};
use crate::models::TxKind;
use crate::utils::{category_names, fmt_money, id_for_account, parse_date};

const FALLBACK_CATEGORY: &str = "Otros";

pub fn handle(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let text = sub.get_one::<String>("text").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Utc::now().date_naive(),
    };
    let account = match sub.get_one::<String>("account") {
        Some(name) => name.clone(),
        None => default_account(conn)?,
    };

    if sub.get_flag("ai") {
        let names = account_names(conn)?;
        match ai::interpret_remote(text, &names) {
            AiInterpretation::Parsed(entry) => return apply_ai(conn, &entry, text, date, &account),
            AiInterpretation::Unavailable => {
                println!("AI interpreter unavailable, using the local heuristic");
            }
        }
    }

    let cats = category_names(conn)?;
    let interp = interpret::interpret(text, &cats);
    apply_local(conn, &interp, text, date, &account)
}

fn account_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM accounts ORDER BY id")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn default_account(conn: &Connection) -> Result<String> {
    let name: Option<String> = conn
        .query_row(
            "SELECT name FROM accounts WHERE archived=0 ORDER BY id LIMIT 1",
            [],
            |r| r.get(0),
        )
        .optional()?;
    name.ok_or_else(|| anyhow!("No accounts yet; add one with 'account add'"))
}

/// First goal whose name appears in the text, case-insensitive.
fn goal_named_in(conn: &Connection, text: &str) -> Result<Option<String>> {
    let lowered = text.to_lowercase();
    let mut stmt = conn.prepare("SELECT name FROM goals ORDER BY id")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    for row in rows {
        let name: String = row?;
        if lowered.contains(&name.to_lowercase()) {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

fn park(conn: &Connection, text: &str, why: &str) -> Result<()> {
    let id = pending::store(conn, text)?;
    println!("Could not record this one ({}); kept as pending capture #{}", why, id);
    Ok(())
}

fn record(
    conn: &Connection,
    account: &str,
    date: NaiveDate,
    amount: Decimal,
    category: &str,
    description: &str,
    kind: TxKind,
) -> Result<()> {
    let account_id = id_for_account(conn, account)?;
    transactions::insert(conn, date, account_id, amount, category, description, kind, None)?;
    println!(
        "Recorded {} {} '{}' on {} (acct: {})",
        kind.as_str(),
        fmt_money(&amount),
        category,
        date,
        account
    );
    Ok(())
}

fn apply_local(
    conn: &Connection,
    interp: &Interpretation,
    text: &str,
    date: NaiveDate,
    account: &str,
) -> Result<()> {
    let Some(amount) = interp.amount else {
        return park(conn, text, "no amount found");
    };
    if amount <= Decimal::ZERO {
        return park(conn, text, "no amount found");
    }
    match interp.kind {
        CaptureKind::Goal => match goal_named_in(conn, text)? {
            Some(goal) => {
                let next = goals::contribute(conn, &goal, amount)?;
                println!("Added {} to goal '{}' (now {})", fmt_money(&amount), goal, fmt_money(&next));
                Ok(())
            }
            None => park(conn, text, "no matching goal"),
        },
        CaptureKind::Income => record(
            conn,
            account,
            date,
            amount,
            interp.category.as_deref().unwrap_or(FALLBACK_CATEGORY),
            &interp.description,
            TxKind::Income,
        ),
        CaptureKind::Expense => record(
            conn,
            account,
            date,
            amount,
            interp.category.as_deref().unwrap_or(FALLBACK_CATEGORY),
            &interp.description,
            TxKind::Expense,
        ),
    }
}

fn apply_ai(
    conn: &mut Connection,
    entry: &AiEntry,
    text: &str,
    date: NaiveDate,
    account: &str,
) -> Result<()> {
    let Some(amount) = entry.amount() else {
        return park(conn, text, "no amount in AI reply");
    };
    let description = entry.descripcion.clone().unwrap_or_default();

    if entry.is_transfer() {
        let from = entry.cuenta_origen.as_deref().unwrap_or_default();
        let to = entry.cuenta_destino.as_deref().unwrap_or_default();
        return match transactions::transfer(conn, from, to, amount, date, None) {
            Ok(_) => {
                println!("Transferred {} from '{}' to '{}'", fmt_money(&amount), from, to);
                Ok(())
            }
            Err(e) => park(conn, text, &e.to_string()),
        };
    }

    match entry.tipo.to_lowercase().as_str() {
        "meta" => match goal_named_in(conn, text)? {
            Some(goal) => {
                let next = goals::contribute(conn, &goal, amount)?;
                println!("Added {} to goal '{}' (now {})", fmt_money(&amount), goal, fmt_money(&next));
                Ok(())
            }
            None => park(conn, text, "no matching goal"),
        },
        "ingreso" => record(
            conn,
            account,
            date,
            amount,
            entry.categoria.as_deref().unwrap_or(FALLBACK_CATEGORY),
            &description,
            TxKind::Income,
        ),
        _ => record(
            conn,
            account,
            date,
            amount,
            entry.categoria.as_deref().unwrap_or(FALLBACK_CATEGORY),
            &description,
            TxKind::Expense,
        ),
    }
}
