// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly totals and budget progress, all in the base currency.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::currency::{RateTable, convert_checked};
use crate::errors::{TrackerError, TrackerResult};
use crate::insights::{Insight, insights};
use crate::models::{BudgetGoal, Transaction, TxKind};
use crate::state::AppState;

const NEAR_LIMIT_PCT: i64 = 80;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub month: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_savings: Decimal,
    /// Expense totals per category name.
    pub category_spend: BTreeMap<String, Decimal>,
    pub transaction_count: usize,
    /// Transactions counted at face value because a rate was missing.
    pub unconverted: usize,
    /// Transactions left out because adding them would overflow a total.
    pub skipped: usize,
}

/// Folds the transactions dated in `month` (`YYYY-MM`) into base-currency
/// totals. Undated transactions are skipped.
pub fn summarize<'a, I>(
    transactions: I,
    rates: Option<&RateTable>,
    base: &str,
    month: &str,
) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut summary = Summary {
        month: month.to_string(),
        total_income: Decimal::ZERO,
        total_expense: Decimal::ZERO,
        net_savings: Decimal::ZERO,
        category_spend: BTreeMap::new(),
        transaction_count: 0,
        unconverted: 0,
        skipped: 0,
    };
    for t in transactions.into_iter().filter(|t| t.in_month(month)) {
        let conv = convert_checked(t.amount, &t.currency, rates, base);
        let folded = match t.kind {
            TxKind::Income => summary
                .total_income
                .checked_add(conv.amount)
                .map(|total| summary.total_income = total),
            TxKind::Expense => {
                let spent = summary
                    .category_spend
                    .get(&t.category)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                match (
                    summary.total_expense.checked_add(conv.amount),
                    spent.checked_add(conv.amount),
                ) {
                    (Some(total), Some(spent)) => {
                        summary.total_expense = total;
                        summary.category_spend.insert(t.category.clone(), spent);
                        Some(())
                    }
                    _ => None,
                }
            }
        };
        if folded.is_none() {
            tracing::warn!(
                id = %t.id,
                amount = %conv.amount,
                "total out of range, transaction skipped"
            );
            summary.skipped += 1;
            continue;
        }
        summary.transaction_count += 1;
        if conv.fallback {
            summary.unconverted += 1;
        }
    }
    // amounts are validated positive, so both totals sit in [0, MAX]
    summary.net_savings = summary.total_income - summary.total_expense;
    tracing::debug!(
        month,
        count = summary.transaction_count,
        unconverted = summary.unconverted,
        skipped = summary.skipped,
        "month summarized"
    );
    summary
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    OnTrack,
    NearLimit,
    Overspent,
}

impl BudgetHealth {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetHealth::OnTrack => "on track",
            BudgetHealth::NearLimit => "near limit",
            BudgetHealth::Overspent => "overspent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalStatus {
    pub id: Uuid,
    pub category_name: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub percentage: Decimal,
    pub is_overspent: bool,
    pub remaining: Decimal,
    pub health: BudgetHealth,
}

/// Joins the goals for `month` against `category_spend` by category name.
/// Highest utilization first; equal percentages keep goal order.
pub fn budget_status<'a, I>(
    goals: I,
    category_spend: &BTreeMap<String, Decimal>,
    month: &str,
) -> TrackerResult<Vec<GoalStatus>>
where
    I: IntoIterator<Item = &'a BudgetGoal>,
{
    let hundred = Decimal::ONE_HUNDRED;
    let mut out = Vec::new();
    for goal in goals.into_iter().filter(|g| g.month_year == month) {
        if goal.limit <= Decimal::ZERO {
            return Err(TrackerError::InvalidGoalLimit {
                category: goal.category_name.clone(),
                month: goal.month_year.clone(),
            });
        }
        let spent = category_spend
            .get(&goal.category_name)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let (Some(percentage), Some(remaining)) = (
            spent
                .checked_div(goal.limit)
                .and_then(|ratio| ratio.checked_mul(hundred)),
            goal.limit.checked_sub(spent),
        ) else {
            return Err(TrackerError::GoalOutOfRange {
                category: goal.category_name.clone(),
                month: goal.month_year.clone(),
            });
        };
        let is_overspent = spent > goal.limit;
        let health = if is_overspent {
            BudgetHealth::Overspent
        } else if percentage > Decimal::from(NEAR_LIMIT_PCT) {
            BudgetHealth::NearLimit
        } else {
            BudgetHealth::OnTrack
        };
        out.push(GoalStatus {
            id: goal.id,
            category_name: goal.category_name.clone(),
            limit: goal.limit,
            spent,
            percentage,
            is_overspent,
            remaining,
            health,
        });
    }
    out.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    Ok(out)
}

/// Everything the dashboard shows for one month, computed from a single
/// state snapshot and a single rate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    pub base_currency: String,
    pub summary: Summary,
    pub budgets: Vec<GoalStatus>,
    pub insights: Vec<Insight>,
}

pub fn month_report(
    state: &AppState,
    rates: Option<&RateTable>,
    base: &str,
    month: &str,
) -> TrackerResult<MonthReport> {
    let summary = summarize(state.transactions.as_slice(), rates, base, month);
    let budgets = budget_status(state.budgets.list_all(), &summary.category_spend, month)?;
    let insights = insights(&summary.category_spend);
    Ok(MonthReport {
        base_currency: base.to_string(),
        summary,
        budgets,
        insights,
    })
}
