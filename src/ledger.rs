// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Balance arithmetic. Balances are never stored as running totals; they are
//! recomputed from the initial balance plus the full transaction set on every
//! read, so these functions must stay pure.

use rust_decimal::Decimal;

use crate::models::{Account, Transaction, TxKind};

/// `initial + income − expense` over the given transactions. The caller
/// decides the scope by what it passes in.
pub fn balance_over(initial: Decimal, txs: &[Transaction]) -> Decimal {
    let mut bal = initial;
    for t in txs {
        match t.kind {
            TxKind::Income => bal += t.amount,
            TxKind::Expense => bal -= t.amount,
        }
    }
    bal
}

/// Current balance of one account from its initial balance and its own
/// transactions only.
pub fn account_balance(account: &Account, txs: &[Transaction]) -> Decimal {
    let initial = account.initial_balance;
    let own: Vec<Transaction> = txs
        .iter()
        .filter(|t| t.account_id == account.id)
        .cloned()
        .collect();
    balance_over(initial, &own)
}

/// Sum of all initial balances plus every income minus every expense,
/// regardless of owning account.
pub fn global_balance(accounts: &[Account], txs: &[Transaction]) -> Decimal {
    let initial: Decimal = accounts.iter().map(|a| a.initial_balance).sum();
    balance_over(initial, txs)
}

/// Outstanding debt on a credit account, floored at zero for display.
pub fn credit_debt(credit_limit: Decimal, balance: Decimal) -> Decimal {
    let debt = credit_limit - balance;
    if debt < Decimal::ZERO { Decimal::ZERO } else { debt }
}

/// One month of interest on the current debt at the account's annual rate,
/// rounded to cents.
pub fn estimated_monthly_interest(debt: Decimal, annual_rate_pct: Decimal) -> Decimal {
    (debt * (annual_rate_pct / Decimal::from(100)) / Decimal::from(12)).round_dp(2)
}
