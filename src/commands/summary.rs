// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::month_or_current;
use crate::aggregate::{MonthReport, month_report};
use crate::insights::InsightKind;
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

const TOP_BUDGETS: usize = 3;

pub fn report(session: &mut Session, month: &str) -> Result<MonthReport> {
    let base = session.base().to_string();
    let rates = session.rates().cloned();
    Ok(month_report(
        session.store.get_state(),
        rates.as_ref(),
        &base,
        month,
    )?)
}

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(m)?;
    let rep = report(session, &month)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &rep)? {
        return Ok(());
    }
    let base = rep.base_currency.as_str();
    let s = &rep.summary;

    println!("Dashboard for {} ({})", s.month, base);
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Total Expenses", "Net Savings"],
            vec![vec![
                fmt_money(&s.total_income, base),
                fmt_money(&s.total_expense, base),
                fmt_money(&s.net_savings, base),
            ]],
        )
    );
    if s.unconverted > 0 {
        println!(
            "Warning: {} transaction(s) counted without conversion (rates unavailable)",
            s.unconverted
        );
    }
    if s.skipped > 0 {
        println!(
            "Warning: {} transaction(s) left out, totals would exceed the supported range",
            s.skipped
        );
    }

    if !s.category_spend.is_empty() {
        let mut items: Vec<_> = s.category_spend.iter().collect();
        items.sort_by(|a, b| b.1.cmp(a.1));
        let rows = items
            .into_iter()
            .map(|(c, v)| vec![c.clone(), fmt_money(v, base)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }

    for insight in &rep.insights {
        let tag = match insight.kind {
            InsightKind::Warning => "!",
            InsightKind::Tip => "*",
        };
        println!("{} {}", tag, insight.message);
    }

    if rep.budgets.is_empty() {
        println!("No budget goals set for this month.");
    } else {
        let top: Vec<_> = rep.budgets.iter().take(TOP_BUDGETS).cloned().collect();
        println!("{}", super::budgets::status_table(&top, base));
    }
    Ok(())
}
