// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TrackerError, TrackerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(TrackerError::Validation(format!(
                "unknown kind '{}', expected income or expense",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TxKind,
    pub amount: Decimal,
    pub currency: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Logical date picked by the user; undated records never land in a month.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Stamps a fresh id and creation time on validated input.
    pub fn new(fields: NewTransaction) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: fields.kind,
            amount: fields.amount,
            currency: fields.currency,
            category: fields.category,
            description: fields.description,
            date: fields.date,
            created_at: Utc::now(),
        }
    }

    /// `YYYY-MM` of the logical date, if any.
    pub fn month(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m").to_string())
    }

    pub fn in_month(&self, month: &str) -> bool {
        self.month().as_deref() == Some(month)
    }

    pub(crate) fn apply(&mut self, patch: TransactionPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
    }
}

/// Caller-supplied fields for a new transaction. Identity and creation time
/// are assigned when the add action is prepared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub kind: TxKind,
    pub amount: Decimal,
    pub currency: String,
    pub category: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl NewTransaction {
    /// Input-validation boundary; the store itself never re-checks.
    pub fn validate(mut self) -> TrackerResult<Self> {
        self.amount = check_amount(self.amount)?;
        self.category = self.category.trim().to_string();
        if self.category.is_empty() {
            return Err(TrackerError::Validation("category must not be empty".into()));
        }
        if self.date.is_none() {
            return Err(TrackerError::Validation("date is required".into()));
        }
        self.currency = normalize_currency(&self.currency)?;
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(self)
    }
}

/// Partial replacement for an existing transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub kind: Option<TxKind>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self == &TransactionPatch::default()
    }

    pub fn validate(mut self) -> TrackerResult<Self> {
        if let Some(amount) = self.amount {
            self.amount = Some(check_amount(amount)?);
        }
        if let Some(category) = self.category.take() {
            let category = category.trim().to_string();
            if category.is_empty() {
                return Err(TrackerError::Validation("category must not be empty".into()));
            }
            self.category = Some(category);
        }
        if let Some(currency) = self.currency.take() {
            self.currency = Some(normalize_currency(&currency)?);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: TxKind,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetGoal {
    pub id: Uuid,
    /// Joined against transactions and categories by name, not id.
    pub category_name: String,
    pub limit: Decimal, // base currency
    pub month_year: String, // YYYY-MM
}

/// Largest amount or limit accepted as input.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2764472320, 232830, 0, false, 0); // 10^15
/// Most decimal places accepted as input, after trailing zeros are dropped.
pub const MAX_AMOUNT_SCALE: u32 = 4;

/// Positive, at most [`MAX_AMOUNT`], with at most [`MAX_AMOUNT_SCALE`] decimals.
/// The bounds keep conversion and budget arithmetic inside the `Decimal` range.
pub fn check_amount(amount: Decimal) -> TrackerResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(TrackerError::Validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(TrackerError::Validation(format!(
            "amount {} exceeds the maximum of {}",
            amount, MAX_AMOUNT
        )));
    }
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(TrackerError::Validation(format!(
            "amount {} has more than {} decimal places",
            amount, MAX_AMOUNT_SCALE
        )));
    }
    Ok(amount)
}

/// Uppercased three-letter currency code.
pub fn normalize_currency(code: &str) -> TrackerResult<String> {
    let code = code.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(TrackerError::Validation(format!(
            "Invalid currency code '{}', expected three letters",
            code
        )));
    }
    Ok(code)
}
