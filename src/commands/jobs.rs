// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The two periodic jobs. Both are plain commands so a cron entry (or any
//! host scheduler with its own once-per-period guarantee) can drive them;
//! the snapshot job propagates errors so the scheduler retries that run.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::commands::snapshots;
use crate::ledger;
use crate::models::{Account, AccountKind, GLOBAL_SCOPE};
use crate::utils::{fmt_money, load_accounts, load_transactions};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    match m.subcommand() {
        Some(("snapshot", _)) => {
            let bal = run_snapshot(conn, today)?;
            println!("Snapshot recorded: global balance {} on {}", fmt_money(&bal), today);
        }
        Some(("credit-alerts", _)) => {
            let raised = run_credit_alerts(conn, today)?;
            if raised.is_empty() {
                println!("No credit alerts for {}", today);
            }
            for msg in raised {
                println!("{}", msg);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Computes the current global balance and appends it as today's snapshot.
/// Nothing stops two rows landing on the same day; rendering keeps the
/// latest one per day.
pub fn run_snapshot(conn: &Connection, today: NaiveDate) -> Result<Decimal> {
    let accounts = load_accounts(conn)?;
    let txs = load_transactions(conn)?;
    let balance = ledger::global_balance(&accounts, &txs);
    snapshots::record(conn, GLOBAL_SCOPE, balance, today, "daily")?;
    Ok(balance)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    StatementCut,
    DueSoon,
    DueToday,
}

impl AlertKind {
    fn code(&self) -> i64 {
        match self {
            AlertKind::StatementCut => 1,
            AlertKind::DueSoon => 2,
            AlertKind::DueToday => 3,
        }
    }
}

/// Stable identifier for one account/alert pair so a re-raised alert updates
/// the existing notification instead of stacking a duplicate.
pub fn alert_key(account_id: i64, kind: AlertKind) -> i64 {
    account_id * 10 + kind.code()
}

/// Day-of-month three days before `due_day`, wrapping within 1..=31.
fn due_soon_day(due_day: u32) -> u32 {
    (((due_day as i64) - 3 - 1).rem_euclid(31) + 1) as u32
}

fn upsert_notification(
    conn: &Connection,
    title: &str,
    message: &str,
    category: &str,
    key: i64,
) -> Result<()> {
    conn.execute(
        "INSERT INTO notifications(title, message, category, alert_key)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(alert_key) DO UPDATE SET
             title=excluded.title,
             message=excluded.message,
             category=excluded.category,
             created_at=datetime('now'),
             read=0",
        params![title, message, category, key],
    )?;
    Ok(())
}

fn alert_message(account: &Account, kind: AlertKind, debt: Decimal) -> String {
    match kind {
        AlertKind::StatementCut => {
            format!("Statement for '{}' closed today. Current debt: {}", account.name, fmt_money(&debt))
        }
        AlertKind::DueSoon => {
            format!("Payment for '{}' is due in 3 days. Debt: {}", account.name, fmt_money(&debt))
        }
        AlertKind::DueToday => {
            let interest = account
                .interest_rate
                .map(|rate| ledger::estimated_monthly_interest(debt, rate))
                .unwrap_or(Decimal::ZERO);
            format!(
                "Payment for '{}' is due today. Debt: {}. Skipping it would cost about {} in interest this month",
                account.name,
                fmt_money(&debt),
                fmt_money(&interest)
            )
        }
    }
}

/// Scans every credit account against today's day-of-month and raises the
/// matching cut/due notifications. Best-effort by design.
pub fn run_credit_alerts(conn: &Connection, today: NaiveDate) -> Result<Vec<String>> {
    let accounts = load_accounts(conn)?;
    let txs = load_transactions(conn)?;
    let day = today.day();
    let mut raised = Vec::new();

    for account in accounts.iter().filter(|a| a.kind == AccountKind::Credit) {
        let Some(limit) = account.credit_limit else {
            continue;
        };
        let balance = ledger::account_balance(account, &txs);
        let debt = ledger::credit_debt(limit, balance);

        let mut conditions = Vec::new();
        if account.cut_day == Some(day) {
            conditions.push(AlertKind::StatementCut);
        }
        if let Some(due) = account.due_day {
            if due_soon_day(due) == day {
                conditions.push(AlertKind::DueSoon);
            }
            if due == day {
                conditions.push(AlertKind::DueToday);
            }
        }

        for kind in conditions {
            let message = alert_message(account, kind, debt);
            upsert_notification(
                conn,
                &format!("Credit card: {}", account.name),
                &message,
                "credit",
                alert_key(account.id, kind),
            )?;
            raised.push(message);
        }
    }
    Ok(raised)
}
