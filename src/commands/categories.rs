// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::required;
use crate::models::{Category, TxKind};
use crate::session::Session;
use crate::state::Action;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?.trim().to_string();
            if name.is_empty() {
                bail!("Category name must not be empty");
            }
            let kind: TxKind = required(sub, "kind")?.parse()?;
            let icon = required(sub, "icon")?.to_string();
            session
                .store
                .dispatch(Action::add_category(name.as_str(), kind, icon))?;
            println!("Added {} category '{}'", kind, name);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("kind")
                .map(|s| s.parse::<TxKind>())
                .transpose()?;
            let state = session.store.get_state();
            let cats: Vec<&Category> = match kind {
                Some(k) => state.categories.by_kind(k).collect(),
                None => state.categories.as_slice().iter().collect(),
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let rows = cats
                    .iter()
                    .map(|c| vec![c.icon.clone(), c.name.clone(), c.kind.to_string()])
                    .collect();
                println!("{}", pretty_table(&["", "Category", "Kind"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
