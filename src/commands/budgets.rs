// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{month_or_current, required};
use crate::aggregate::{GoalStatus, budget_status, summarize};
use crate::models::{BudgetGoal, TxKind};
use crate::session::Session;
use crate::state::Action;
use crate::utils::{
    fmt_money, maybe_print_json, parse_id, parse_month, parse_positive_amount, pretty_table,
};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("status", sub)) => status(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let cat = required(sub, "category")?.trim().to_string();
    let limit = parse_positive_amount(required(sub, "limit")?)?;
    if session
        .store
        .get_state()
        .categories
        .find(&cat, TxKind::Expense)
        .is_none()
    {
        println!("Note: '{}' is not a known expense category", cat);
    }
    session
        .store
        .dispatch(Action::set_budget_goal(cat.as_str(), limit, Some(month.clone())))?;
    println!(
        "Budget set for {} / {} = {}",
        month,
        cat,
        fmt_money(&limit, session.base())
    );
    Ok(())
}

fn remove(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    if session.store.dispatch(Action::delete_budget_goal(id))? {
        println!("Removed budget goal {}", id);
    } else {
        println!("No budget goal with id {}", id);
    }
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let budgets = &session.store.get_state().budgets;
    let goals: Vec<&BudgetGoal> = match month.as_deref() {
        Some(m) => budgets.list_for_month(m).collect(),
        None => budgets.list_all().iter().collect(),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        let base = session.base();
        let rows = goals
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.month_year.clone(),
                    g.category_name.clone(),
                    fmt_money(&g.limit, base),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Month", "Category", "Limit"], rows)
        );
    }
    Ok(())
}

/// Goal progress for `month` against one rate snapshot.
pub fn month_status(session: &mut Session, month: &str) -> Result<Vec<GoalStatus>> {
    let base = session.base().to_string();
    let rates = session.rates().cloned();
    let state = session.store.get_state();
    let summary = summarize(state.transactions.as_slice(), rates.as_ref(), &base, month);
    Ok(budget_status(
        state.budgets.list_all(),
        &summary.category_spend,
        month,
    )?)
}

fn status(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let mut statuses = month_status(session, &month)?;
    if let Some(top) = sub.get_one::<usize>("top") {
        statuses.truncate(*top);
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &statuses)? {
        if statuses.is_empty() {
            println!("No budget goals set for {}.", month);
            return Ok(());
        }
        println!("{}", status_table(&statuses, session.base()));
    }
    Ok(())
}

pub(crate) fn status_table(statuses: &[GoalStatus], base: &str) -> comfy_table::Table {
    let rows = statuses
        .iter()
        .map(|s| {
            vec![
                s.category_name.clone(),
                fmt_money(&s.limit, base),
                fmt_money(&s.spent, base),
                fmt_money(&s.remaining, base),
                format!("{:.0}%", s.percentage),
                s.health.label().to_string(),
            ]
        })
        .collect();
    pretty_table(
        &["Category", "Limit", "Spent", "Remaining", "Used", "Status"],
        rows,
    )
}
