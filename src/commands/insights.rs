// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! KPI summary plus AI commentary. The commentary is cached alongside a
//! signature of the underlying numbers; while the data is unchanged the
//! cached text is reused and no network call happens.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::ai::{self, AiReply};
use crate::ledger;
use crate::models::TxKind;
use crate::utils::{
    fmt_money, get_setting, load_accounts, load_transactions, pretty_table, set_setting,
};

const SIGNATURE_KEY: &str = "insight_signature";
const TEXT_KEY: &str = "insight_text";

pub struct Kpis {
    pub month: String,
    pub month_income: Decimal,
    pub month_expense: Decimal,
    pub global_balance: Decimal,
    pub top_category: Option<(String, Decimal)>,
}

pub fn compute_kpis(conn: &Connection, month: &str) -> Result<Kpis> {
    let accounts = load_accounts(conn)?;
    let txs = load_transactions(conn)?;

    let mut month_income = Decimal::ZERO;
    let mut month_expense = Decimal::ZERO;
    let mut by_category: Vec<(String, Decimal)> = Vec::new();
    for t in txs.iter().filter(|t| t.date.format("%Y-%m").to_string() == month) {
        match t.kind {
            TxKind::Income => month_income += t.amount,
            TxKind::Expense => {
                month_expense += t.amount;
                match by_category.iter_mut().find(|(c, _)| *c == t.category) {
                    Some((_, total)) => *total += t.amount,
                    None => by_category.push((t.category.clone(), t.amount)),
                }
            }
        }
    }
    by_category.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(Kpis {
        month: month.to_string(),
        month_income,
        month_expense,
        global_balance: ledger::global_balance(&accounts, &txs),
        top_category: by_category.into_iter().next(),
    })
}

/// Fingerprint of the data feeding the commentary. Same signature means the
/// numbers have not moved and the cached text is still valid.
pub fn data_signature(conn: &Connection) -> Result<String> {
    let txs = load_transactions(conn)?;
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in &txs {
        match t.kind {
            TxKind::Income => income += t.amount,
            TxKind::Expense => expense += t.amount,
        }
    }
    Ok(format!("{}:{}:{}", txs.len(), income, expense))
}

fn commentary(conn: &Connection, kpis: &Kpis, refresh: bool) -> Result<Option<String>> {
    let signature = data_signature(conn)?;
    if !refresh {
        let cached_sig = get_setting(conn, SIGNATURE_KEY)?;
        if cached_sig.as_deref() == Some(signature.as_str()) {
            if let Some(text) = get_setting(conn, TEXT_KEY)? {
                return Ok(Some(text));
            }
        }
    }

    let top = kpis
        .top_category
        .as_ref()
        .map(|(c, v)| format!("{} ({})", c, fmt_money(v)))
        .unwrap_or_else(|| "none".to_string());
    let prompt = format!(
        "Eres un asistente de finanzas personales. En dos o tres frases, \
         comenta la tendencia de estas cifras del mes {}: ingresos {}, \
         gastos {}, balance global {}, mayor categoría de gasto {}. \
         Responde en texto plano, sin formato.",
        kpis.month,
        fmt_money(&kpis.month_income),
        fmt_money(&kpis.month_expense),
        fmt_money(&kpis.global_balance),
        top
    );
    match ai::generate(&prompt) {
        AiReply::Text(text) => {
            set_setting(conn, SIGNATURE_KEY, &signature)?;
            set_setting(conn, TEXT_KEY, &text)?;
            Ok(Some(text))
        }
        AiReply::Unavailable => Ok(None),
    }
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let refresh = sub.get_flag("refresh");
    let month = Utc::now().date_naive().format("%Y-%m").to_string();
    let kpis = compute_kpis(conn, &month)?;

    let rows = vec![
        vec!["Month".to_string(), kpis.month.clone()],
        vec!["Income".to_string(), fmt_money(&kpis.month_income)],
        vec!["Expense".to_string(), fmt_money(&kpis.month_expense)],
        vec!["Global balance".to_string(), fmt_money(&kpis.global_balance)],
        vec![
            "Top category".to_string(),
            kpis.top_category
                .as_ref()
                .map(|(c, v)| format!("{} ({})", c, fmt_money(v)))
                .unwrap_or_default(),
        ],
    ];
    println!("{}", pretty_table(&["KPI", "Value"], rows));

    match commentary(conn, &kpis, refresh)? {
        Some(text) => println!("\n{}", text.trim()),
        None => println!("\nAI commentary unavailable; showing the numbers alone."),
    }
    Ok(())
}
