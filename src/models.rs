// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Cash,
    Debit,
    Credit,
    Savings,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Cash => "cash",
            AccountKind::Debit => "debit",
            AccountKind::Credit => "credit",
            AccountKind::Savings => "savings",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(AccountKind::Cash),
            "debit" => Some(AccountKind::Debit),
            "credit" => Some(AccountKind::Credit),
            "savings" => Some(AccountKind::Savings),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub kind: AccountKind,
    pub initial_balance: Decimal,
    pub color: Option<String>,
    pub archived: bool,
    pub credit_limit: Option<Decimal>,
    pub cut_day: Option<u32>,
    pub due_day: Option<u32>,
    pub interest_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TxKind::Income),
            "expense" => Some(TxKind::Expense),
            _ => None,
        }
    }
}

/// Amounts are positive magnitudes; `kind` carries the direction. A transfer
/// is two rows sharing a `transfer_id`: the expense leg on the source account
/// and the income leg on the destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub account_id: i64,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub kind: TxKind,
    pub transfer_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(Recurrence::Weekly),
            "monthly" => Some(Recurrence::Monthly),
            "yearly" => Some(Recurrence::Yearly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Pending,
    Paid,
    Overdue,
    Canceled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Paid => "paid",
            SubscriptionStatus::Overdue => "overdue",
            SubscriptionStatus::Canceled => "canceled",
        }
    }
}

/// Where a subscription's status comes from. A stored manual override wins
/// over anything derived from the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSource {
    Derived,
    Overridden(SubscriptionStatus),
}

impl StatusSource {
    pub fn from_column(v: Option<&str>) -> Self {
        match v {
            Some("paid") => StatusSource::Overridden(SubscriptionStatus::Paid),
            Some("pending") => StatusSource::Overridden(SubscriptionStatus::Pending),
            Some("canceled") => StatusSource::Overridden(SubscriptionStatus::Canceled),
            _ => StatusSource::Derived,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub recurrence: Recurrence,
    pub icon: Option<String>,
    pub account_id: Option<i64>,
    pub note: Option<String>,
    pub lead_days: u32,
    pub remind_time: String,
    pub override_status: Option<SubscriptionStatus>,
}

impl Subscription {
    pub fn status_source(&self) -> StatusSource {
        match self.override_status {
            Some(s) => StatusSource::Overridden(s),
            None => StatusSource::Derived,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub created_at: String,
    pub category: String,
    pub read: bool,
    pub alert_key: Option<i64>,
}

/// One recorded balance value. `account_id` of [`GLOBAL_SCOPE`] marks the
/// all-accounts total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub id: i64,
    pub account_id: i64,
    pub balance: Decimal,
    pub taken_on: NaiveDate,
    pub reason: String,
}

pub const GLOBAL_SCOPE: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingCapture {
    pub id: i64,
    pub raw_text: String,
    pub created_at: String,
}
