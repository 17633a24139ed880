// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Result, bail};

use super::required;
use crate::commands::transactions::TransactionRow;
use crate::session::Session;
use crate::state::AppState;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = required(sub, "format")?.to_lowercase();
            let out = required(sub, "out")?;
            let n = export_transactions(session.store.get_state(), &fmt, Path::new(out))?;
            println!("Exported {} transactions to {}", n, out);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes every transaction, most recent first. Returns the row count.
pub fn export_transactions(state: &AppState, fmt: &str, out: &Path) -> Result<usize> {
    let rows: Vec<TransactionRow> = state
        .transactions
        .list_all()
        .map(TransactionRow::from)
        .collect();
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "kind",
                "amount",
                "currency",
                "category",
                "description",
                "created_at",
            ])?;
            for r in &rows {
                wtr.write_record([
                    &r.id,
                    &r.date,
                    &r.kind,
                    &r.amount,
                    &r.currency,
                    &r.category,
                    &r.description,
                    &r.created_at,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(rows.len())
}
