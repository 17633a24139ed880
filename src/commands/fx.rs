// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::required;
use crate::config::{set_base_currency, set_rate_api_key};
use crate::currency::{COMMON_CURRENCIES, convert_checked};
use crate::models::normalize_currency;
use crate::session::Session;
use crate::utils::{maybe_print_json, parse_positive_amount, pretty_table};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-base", sub)) => {
            let ccy = normalize_currency(required(sub, "currency")?)?;
            set_base_currency(session.conn(), &ccy)?;
            println!("Base currency set to {}", ccy);
        }
        Some(("set-key", sub)) => {
            set_rate_api_key(session.conn(), required(sub, "key")?.trim())?;
            println!("Exchange rate API key saved");
        }
        Some(("convert", sub)) => convert_amount(session, sub)?,
        Some(("rates", sub)) => list_rates(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn convert_amount(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_positive_amount(required(sub, "amount")?)?;
    let from = normalize_currency(required(sub, "from")?)?;
    let base = session.base().to_string();
    let conv = convert_checked(amount, &from, session.rates(), &base);
    if conv.fallback {
        println!("{} {} -> {} {} (no rate, unconverted)", amount, from, conv.amount, base);
    } else {
        println!("{} {} -> {:.2} {}", amount, from, conv.amount, base);
    }
    Ok(())
}

fn list_rates(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let base = session.base().to_string();
    let Some(table) = session.rates() else {
        println!("Exchange rates unavailable.");
        return Ok(());
    };
    let mut data = Vec::new();
    for (code, name) in COMMON_CURRENCIES {
        if let Some(rate) = table.rates.get(*code) {
            data.push(vec![code.to_string(), name.to_string(), rate.to_string()]);
        }
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &table)? {
        println!("Rates per 1 {} (fetched {})", table.anchor, table.fetched_at.to_rfc3339());
        println!("{}", pretty_table(&["Code", "Currency", "Rate"], data));
        if table.anchor != base {
            println!("Note: anchor {} differs from base {}", table.anchor, base);
        }
    }
    Ok(())
}
