// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Recurrence, StatusSource, Subscription, SubscriptionStatus};
use crate::utils::{
    fmt_money, id_for_account, maybe_print_json, parse_date, parse_decimal, pretty_table,
};

/// How far ahead "upcoming" looks, in days.
pub const UPCOMING_WINDOW_DAYS: i64 = 5;

/// Manual override wins absolutely; otherwise the due date against today
/// decides between overdue and pending.
pub fn derive_status(source: StatusSource, due_date: NaiveDate, today: NaiveDate) -> SubscriptionStatus {
    match source {
        StatusSource::Overridden(s) => s,
        StatusSource::Derived => {
            if due_date < today {
                SubscriptionStatus::Overdue
            } else {
                SubscriptionStatus::Pending
            }
        }
    }
}

/// Pending subscriptions due within the next 0–5 days, soonest first.
pub fn upcoming(subs: &[Subscription], today: NaiveDate) -> Vec<Subscription> {
    let mut out: Vec<Subscription> = subs
        .iter()
        .filter(|s| {
            derive_status(s.status_source(), s.due_date, today) == SubscriptionStatus::Pending
        })
        .filter(|s| {
            let days = (s.due_date - today).num_days();
            (0..=UPCOMING_WINDOW_DAYS).contains(&days)
        })
        .cloned()
        .collect();
    out.sort_by_key(|s| s.due_date);
    out
}

/// Monthly-equivalent spend: monthly at face value, yearly spread over 12,
/// weekly over 52/12. Canceled subscriptions do not count at all.
pub fn monthly_cost(subs: &[Subscription], today: NaiveDate) -> Decimal {
    let mut total = Decimal::ZERO;
    for s in subs {
        if derive_status(s.status_source(), s.due_date, today) == SubscriptionStatus::Canceled {
            continue;
        }
        total += match s.recurrence {
            Recurrence::Monthly => s.amount,
            Recurrence::Yearly => s.amount / Decimal::from(12),
            Recurrence::Weekly => s.amount * Decimal::from(52) / Decimal::from(12),
        };
    }
    total.round_dp(2)
}

pub fn load_subscriptions(conn: &Connection) -> Result<Vec<Subscription>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, due_date, recurrence, icon, account_id, note, lead_days, remind_time, override_status
         FROM subscriptions ORDER BY due_date, name",
    )?;
    let mut out = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(2)?;
        let due_s: String = r.get(3)?;
        let rec_s: String = r.get(4)?;
        let override_s: Option<String> = r.get(10)?;
        let override_status = match StatusSource::from_column(override_s.as_deref()) {
            StatusSource::Overridden(s) => Some(s),
            StatusSource::Derived => None,
        };
        out.push(Subscription {
            id: r.get(0)?,
            name: r.get(1)?,
            amount: crate::utils::decimal_col(&amount_s)?,
            due_date: parse_date(&due_s)?,
            recurrence: Recurrence::parse(&rec_s)
                .ok_or_else(|| anyhow!("Invalid recurrence '{}'", rec_s))?,
            icon: r.get(5)?,
            account_id: r.get(6)?,
            note: r.get(7)?,
            lead_days: r.get(8)?,
            remind_time: r.get(9)?,
            override_status,
        });
    }
    Ok(out)
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set-status", sub)) => set_status(conn, sub)?,
        Some(("upcoming", _)) => {
            let subs = load_subscriptions(conn)?;
            let today = Utc::now().date_naive();
            let rows: Vec<Vec<String>> = upcoming(&subs, today)
                .iter()
                .map(|s| {
                    vec![
                        s.name.clone(),
                        fmt_money(&s.amount),
                        s.due_date.to_string(),
                        (s.due_date - today).num_days().to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Subscription", "Amount", "Due", "Days left"], rows)
            );
        }
        Some(("monthly-cost", _)) => {
            let subs = load_subscriptions(conn)?;
            let today = Utc::now().date_naive();
            println!("Monthly-equivalent cost: {}", fmt_money(&monthly_cost(&subs, today)));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute("DELETE FROM subscriptions WHERE name=?1", params![name])?;
            if n == 0 {
                return Err(anyhow!("Subscription '{}' not found", name));
            }
            println!("Removed subscription '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let due = parse_date(sub.get_one::<String>("due").unwrap())?;
    let rec_s = sub.get_one::<String>("recurrence").unwrap();
    let recurrence = Recurrence::parse(rec_s)
        .ok_or_else(|| anyhow!("Invalid recurrence '{}', use weekly|monthly|yearly", rec_s))?;
    let account_id = sub
        .get_one::<String>("account")
        .map(|a| id_for_account(conn, a))
        .transpose()?;
    let icon = sub.get_one::<String>("icon");
    let note = sub.get_one::<String>("note");
    let lead = *sub.get_one::<u32>("lead").unwrap();
    let time = sub.get_one::<String>("time").unwrap();

    conn.execute(
        "INSERT INTO subscriptions(name, amount, due_date, recurrence, icon, account_id, note, lead_days, remind_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            name,
            amount.to_string(),
            due.to_string(),
            recurrence.as_str(),
            icon,
            account_id,
            note,
            lead,
            time
        ],
    )?;
    println!("Added subscription '{}' ({} {})", name, fmt_money(&amount), recurrence.as_str());
    Ok(())
}

#[derive(Serialize)]
pub struct SubscriptionRow {
    pub name: String,
    pub amount: String,
    pub due: String,
    pub recurrence: String,
    pub status: String,
    pub overridden: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let subs = load_subscriptions(conn)?;
    let today = Utc::now().date_naive();
    let data: Vec<SubscriptionRow> = subs
        .iter()
        .map(|s| SubscriptionRow {
            name: s.name.clone(),
            amount: fmt_money(&s.amount),
            due: s.due_date.to_string(),
            recurrence: s.recurrence.as_str().to_string(),
            status: derive_status(s.status_source(), s.due_date, today)
                .as_str()
                .to_string(),
            overridden: s.override_status.is_some(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.amount.clone(),
                    r.due.clone(),
                    r.recurrence.clone(),
                    r.status.clone(),
                    if r.overridden { "manual".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Subscription", "Amount", "Due", "Recurrence", "Status", "Source"],
                rows
            )
        );
    }
    Ok(())
}

fn set_status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let status = sub.get_one::<String>("status").unwrap();
    let value: Option<&str> = match status.as_str() {
        "clear" => None,
        "paid" | "pending" | "canceled" => Some(status.as_str()),
        other => return Err(anyhow!("Invalid status '{}', use paid|pending|canceled|clear", other)),
    };
    let n = conn.execute(
        "UPDATE subscriptions SET override_status=?1 WHERE name=?2",
        params![value, name],
    )?;
    if n == 0 {
        return Err(anyhow!("Subscription '{}' not found", name));
    }
    match value {
        Some(v) => println!("Status of '{}' overridden to {}", name, v),
        None => println!("Override cleared for '{}'; status is derived again", name),
    }
    Ok(())
}
