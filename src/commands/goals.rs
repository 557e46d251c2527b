// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::{decimal_col, fmt_money, maybe_print_json, parse_decimal, pretty_table};

/// Contribution arithmetic: savings never exceed the target.
pub fn capped_contribution(saved: Decimal, target: Decimal, amount: Decimal) -> Decimal {
    let next = saved + amount;
    if next > target { target } else { next }
}

/// Adds `amount` to the goal's savings, capped at its target. Returns the new
/// saved value.
pub fn contribute(conn: &Connection, name: &str, amount: Decimal) -> Result<Decimal> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT target_amount, saved_amount FROM goals WHERE name=?1",
            params![name],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let Some((target_s, saved_s)) = row else {
        return Err(anyhow!("Goal '{}' not found", name));
    };
    let target = decimal_col(&target_s)?;
    let saved = decimal_col(&saved_s)?;
    let next = capped_contribution(saved, target, amount);
    conn.execute(
        "UPDATE goals SET saved_amount=?1 WHERE name=?2",
        params![next.to_string(), name],
    )?;
    Ok(next)
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
            if target <= Decimal::ZERO {
                return Err(anyhow!("Target must be positive"));
            }
            conn.execute(
                "INSERT INTO goals(name, target_amount) VALUES (?1, ?2)",
                params![name, target.to_string()],
            )?;
            println!("Added goal '{}' (target {})", name, fmt_money(&target));
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("fund", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            if amount <= Decimal::ZERO {
                return Err(anyhow!("Amount must be positive"));
            }
            let next = contribute(conn, name, amount)?;
            println!("Goal '{}' now at {}", name, fmt_money(&next));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute("DELETE FROM goals WHERE name=?1", params![name])?;
            if n == 0 {
                return Err(anyhow!("Goal '{}' not found", name));
            }
            println!("Removed goal '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct GoalRow {
    pub name: String,
    pub target: String,
    pub saved: String,
    pub progress: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt =
        conn.prepare("SELECT name, target_amount, saved_amount FROM goals ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (name, target_s, saved_s) = row?;
        let target = decimal_col(&target_s)?;
        let saved = decimal_col(&saved_s)?;
        let pct = if target.is_zero() {
            Decimal::ZERO
        } else {
            (saved / target * Decimal::from(100)).round_dp(1)
        };
        data.push(GoalRow {
            name,
            target: fmt_money(&target),
            saved: fmt_money(&saved),
            progress: format!("{}%", pct),
        });
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.name.clone(), r.target.clone(), r.saved.clone(), r.progress.clone()])
            .collect();
        println!("{}", pretty_table(&["Goal", "Target", "Saved", "Progress"], rows));
    }
    Ok(())
}
