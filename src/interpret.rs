// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Offline interpretation of a spoken or typed sentence into a candidate
//! entry. This is the fallback when the AI path is unavailable; by contract
//! it never fails — a wrong or empty guess beats an error here.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureKind {
    Expense,
    Income,
    Goal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Interpretation {
    pub kind: CaptureKind,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub description: String,
}

/// Filler words dropped when building the description.
const STOP_WORDS: &[&str] = &[
    "gasto", "ingreso", "meta", "pesos", "dólares", "en", "de", "el", "la", "un", "una", "para",
    "$",
];

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9][0-9.,]*").unwrap());
static DIGIT_GAP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9])\s+([0-9])").unwrap());

/// Joins digit groups that speech recognition split with spaces, so a spoken
/// "1 200" scans as a single token.
fn collapse_digit_gaps(text: &str) -> String {
    let mut cur = text.to_string();
    loop {
        let next = DIGIT_GAP_RE.replace_all(&cur, "${1}${2}").to_string();
        if next == cur {
            return cur;
        }
        cur = next;
    }
}

/// Decides whether the separators in a numeric token are thousands grouping
/// or a decimal point: exactly three digits after the last separator means
/// grouping, anything else makes the last separator the decimal point.
fn parse_numeric_token(raw: &str) -> Option<Decimal> {
    let tok = raw.trim_matches(|c| c == '.' || c == ',');
    if tok.is_empty() {
        return None;
    }
    let last_sep = tok.rfind(|c| c == '.' || c == ',');
    let Some(pos) = last_sep else {
        return tok.parse::<Decimal>().ok();
    };
    let after = &tok[pos + 1..];
    if after.len() == 3 {
        let digits: String = tok.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse::<Decimal>().ok()
    } else {
        let int_part: String = tok[..pos].chars().filter(|c| c.is_ascii_digit()).collect();
        let int_part = if int_part.is_empty() {
            "0".to_string()
        } else {
            int_part
        };
        format!("{}.{}", int_part, after).parse::<Decimal>().ok()
    }
}

/// Largest numeric value found anywhere in the text, with its source token.
fn best_amount(collapsed: &str) -> Option<(Decimal, String)> {
    let mut best: Option<(Decimal, String)> = None;
    for m in TOKEN_RE.find_iter(collapsed) {
        if let Some(v) = parse_numeric_token(m.as_str()) {
            if best.as_ref().is_none_or(|(b, _)| v > *b) {
                best = Some((v, m.as_str().to_string()));
            }
        }
    }
    best
}

/// Largest numeric value in the text, or `None` when nothing parses.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    best_amount(&collapse_digit_gaps(text)).map(|(v, _)| v)
}

fn detect_kind(lowered: &str) -> CaptureKind {
    if lowered.contains("meta") || lowered.contains("ahorro") {
        CaptureKind::Goal
    } else if lowered.contains("ingreso") || lowered.contains("gané") || lowered.contains("recibí")
    {
        CaptureKind::Income
    } else {
        CaptureKind::Expense
    }
}

fn detect_category(lowered: &str, categories: &[String]) -> Option<String> {
    categories
        .iter()
        .find(|c| lowered.contains(&c.to_lowercase()))
        .cloned()
}

pub fn interpret(text: &str, categories: &[String]) -> Interpretation {
    let collapsed = collapse_digit_gaps(text);
    let lowered = collapsed.to_lowercase();

    let kind = detect_kind(&lowered);
    let category = if kind == CaptureKind::Goal {
        Some("Ahorro".to_string())
    } else {
        detect_category(&lowered, categories)
    };
    let amount = best_amount(&collapsed);

    let amount_token = amount.as_ref().map(|(_, t)| t.as_str()).unwrap_or("");
    let cat_lower = category.as_deref().map(|c| c.to_lowercase());
    let mut words = Vec::new();
    for w in collapsed.split_whitespace() {
        if !amount_token.is_empty() && w.contains(amount_token) {
            continue;
        }
        let wl = w.to_lowercase();
        if STOP_WORDS.contains(&wl.as_str()) {
            continue;
        }
        if cat_lower.as_deref() == Some(wl.as_str()) {
            continue;
        }
        words.push(w);
    }
    let mut description = words.join(" ");
    if description.is_empty() {
        description = category.clone().unwrap_or_default();
    }

    Interpretation {
        kind,
        amount: amount.map(|(v, _)| v),
        category,
        description,
    }
}
