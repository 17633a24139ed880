// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_CURRENCY: &str = "INR";

pub const COMMON_CURRENCIES: &[(&str, &str)] = &[
    ("INR", "Indian Rupee"),
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
];

/// Latest rate snapshot. Every rate is quoted against `anchor`
/// (1 anchor = rate units of the currency).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub anchor: String,
    pub rates: HashMap<String, Decimal>,
    pub fetched_at: DateTime<Utc>,
}

impl RateTable {
    pub fn new(anchor: impl Into<String>, rates: HashMap<String, Decimal>) -> Self {
        Self {
            anchor: anchor.into(),
            rates,
            fetched_at: Utc::now(),
        }
    }

    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied().filter(|r| !r.is_zero())
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub amount: Decimal,
    /// The rate table could not cover the pair; `amount` is the original value.
    pub fallback: bool,
}

/// Convert `amount` in `from` into `base`.
///
/// Same currency is returned untouched. A missing table, or a table without
/// `base` or `from`, yields the original amount with `fallback` set, as does
/// a result outside the `Decimal` range.
/// Otherwise `amount * rates[base] / rates[from]`, rounded half-up to cents.
pub fn convert_checked(
    amount: Decimal,
    from: &str,
    rates: Option<&RateTable>,
    base: &str,
) -> Conversion {
    if from == base {
        return Conversion {
            amount,
            fallback: false,
        };
    }
    let Some(table) = rates else {
        tracing::warn!(
            currency = from,
            base,
            "exchange rates not available, amount left unconverted"
        );
        return Conversion {
            amount,
            fallback: true,
        };
    };
    let (Some(rate_base), Some(rate_from)) = (table.rate(base), table.rate(from)) else {
        tracing::warn!(
            currency = from,
            base,
            anchor = %table.anchor,
            "rate missing, amount left unconverted"
        );
        return Conversion {
            amount,
            fallback: true,
        };
    };
    let Some(converted) = rate_base
        .checked_div(rate_from)
        .and_then(|ratio| amount.checked_mul(ratio))
    else {
        tracing::warn!(
            currency = from,
            base,
            %amount,
            "conversion out of range, amount left unconverted"
        );
        return Conversion {
            amount,
            fallback: true,
        };
    };
    Conversion {
        amount: converted.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        fallback: false,
    }
}

pub fn convert(amount: Decimal, from: &str, rates: Option<&RateTable>, base: &str) -> Decimal {
    convert_checked(amount, from, rates, base).amount
}
