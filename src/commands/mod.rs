// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod exporter;
pub mod fx;
pub mod summary;
pub mod transactions;

use anyhow::{Context, Result};

/// Value of an argument clap already marks as required.
pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    m.get_one::<String>(name)
        .with_context(|| format!("Missing argument '{}'", name))
}

/// `--month` or the current month.
pub(crate) fn month_or_current(m: &clap::ArgMatches) -> Result<String> {
    match m.get_one::<String>("month") {
        Some(s) => crate::utils::parse_month(s),
        None => Ok(crate::utils::current_month()),
    }
}
