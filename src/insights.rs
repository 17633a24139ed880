// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

/// Observations about a month's expense split. Categories are ranked by
/// spend (ties alphabetical); a second category counts as significant only
/// above 20% of the total.
pub fn insights(category_spend: &BTreeMap<String, Decimal>) -> Vec<Insight> {
    let mut ranked: Vec<(&String, Decimal)> =
        category_spend.iter().map(|(k, v)| (k, *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let total: Decimal = ranked.iter().map(|(_, v)| *v).sum();

    if total.is_zero() {
        return vec![Insight {
            kind: InsightKind::Tip,
            message: "You haven't recorded any expenses this month. Start tracking now for better insights!"
                .to_string(),
        }];
    }

    let mut out = Vec::new();
    if let Some((name, value)) = ranked.first() {
        let pct = (*value / total * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        out.push(Insight {
            kind: InsightKind::Warning,
            message: format!(
                "Highest spending on {}: this accounts for {}% of your total monthly expense. Consider setting a budget goal for it.",
                name, pct
            ),
        });
    }
    if let Some((name, value)) = ranked.get(1) {
        if *value > total * Decimal::new(20, 2) {
            out.push(Insight {
                kind: InsightKind::Tip,
                message: format!(
                    "Your spending is also significant on {}. Review these two categories to find savings opportunities.",
                    name
                ),
            });
        }
    }
    out
}
