// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::Utc;
use serde::Serialize;

use super::required;
use crate::models::{NewTransaction, Transaction, TransactionPatch, TxKind};
use crate::session::Session;
use crate::state::{Action, AppState};
use crate::utils::{
    maybe_print_json, parse_date, parse_id, parse_month, parse_positive_amount, pretty_table,
};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxKind = required(sub, "kind")?.parse()?;
    let amount = parse_positive_amount(required(sub, "amount")?)?;
    let currency = sub
        .get_one::<String>("currency")
        .cloned()
        .unwrap_or_else(|| session.base().to_string());
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Utc::now().date_naive(),
    };
    let fields = NewTransaction {
        kind,
        amount,
        currency,
        category: required(sub, "category")?.to_string(),
        description: sub.get_one::<String>("description").cloned(),
        date: Some(date),
    }
    .validate()?;

    if session
        .store
        .get_state()
        .categories
        .find(&fields.category, kind)
        .is_none()
    {
        println!("Note: '{}' is not a known {} category", fields.category, kind);
    }

    let tx = Transaction::new(fields);
    let id = tx.id;
    let summary = format!(
        "{} {} {} on {} ({})",
        tx.kind, tx.amount, tx.currency, date, tx.category
    );
    session.store.dispatch(Action::AddTransaction(tx))?;
    println!("Recorded {} [{}]", summary, id);
    Ok(())
}

fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    let patch = TransactionPatch {
        kind: sub
            .get_one::<String>("kind")
            .map(|s| s.parse::<TxKind>())
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_positive_amount(s))
            .transpose()?,
        currency: sub.get_one::<String>("currency").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
    }
    .validate()?;
    if patch.is_empty() {
        bail!("Nothing to change; pass at least one field");
    }
    if session.store.get_state().transactions.get(id).is_none() {
        println!("No transaction with id {}", id);
        return Ok(());
    }
    if session.store.dispatch(Action::edit_transaction(id, patch))? {
        println!("Updated transaction {}", id);
    } else {
        println!("Transaction {} already had those values", id);
    }
    Ok(())
}

fn remove(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    if session.store.dispatch(Action::delete_transaction(id))? {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session.store.get_state(), sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Kind", "Amount", "CCY", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub currency: String,
    pub category: String,
    pub description: String,
    pub created_at: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.to_string(),
            date: t.date.map(|d| d.to_string()).unwrap_or_default(),
            kind: t.kind.to_string(),
            amount: t.amount.to_string(),
            currency: t.currency.clone(),
            category: t.category.clone(),
            description: t.description.clone().unwrap_or_default(),
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

/// Most recent first, narrowed by the `list` filters.
pub fn query_rows(state: &AppState, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| s.parse::<TxKind>())
        .transpose()?;
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let rows = state
        .transactions
        .list_all()
        .filter(|t| month.as_deref().is_none_or(|m| t.in_month(m)))
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| category.is_none_or(|c| &t.category == c))
        .take(limit)
        .map(TransactionRow::from)
        .collect();
    Ok(rows)
}
