// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::time::Duration;

use fintrack::currency::{RateTable, convert, convert_checked};
use fintrack::rates::{RateCache, RateStatus, StaticRates};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn usd_table() -> RateTable {
    let mut rates = HashMap::new();
    rates.insert("USD".to_string(), dec("1"));
    rates.insert("INR".to_string(), dec("83"));
    rates.insert("EUR".to_string(), dec("0.90"));
    RateTable::new("USD", rates)
}

#[test]
fn base_currency_amount_is_returned_unchanged() {
    let table = usd_table();
    assert_eq!(convert(dec("123.456"), "INR", Some(&table), "INR"), dec("123.456"));
    // no table at all still passes base amounts through untouched
    let conv = convert_checked(dec("7.777"), "INR", None, "INR");
    assert_eq!(conv.amount, dec("7.777"));
    assert!(!conv.fallback);
}

#[test]
fn converts_through_the_anchor_and_rounds_to_cents() {
    let table = usd_table();
    // anchor -> base: 10 * 83 / 1
    assert_eq!(convert(dec("10"), "USD", Some(&table), "INR"), dec("830.00"));
    // neither side is the anchor: 9 * 83 / 0.90
    assert_eq!(convert(dec("9"), "EUR", Some(&table), "INR"), dec("830.00"));
    // base -> other
    assert_eq!(convert(dec("166"), "INR", Some(&table), "USD"), dec("2.00"));
}

#[test]
fn rounding_is_half_up() {
    let mut rates = HashMap::new();
    rates.insert("USD".to_string(), dec("1"));
    rates.insert("INR".to_string(), dec("1"));
    let table = RateTable::new("USD", rates);
    assert_eq!(convert(dec("1.005"), "USD", Some(&table), "INR"), dec("1.01"));
    assert_eq!(convert(dec("1.004"), "USD", Some(&table), "INR"), dec("1.00"));
}

#[test]
fn missing_rates_fall_back_to_the_original_amount() {
    let empty = RateTable::new("USD", HashMap::new());
    let conv = convert_checked(dec("50"), "EUR", Some(&empty), "INR");
    assert_eq!(conv.amount, dec("50"));
    assert!(conv.fallback);

    let no_table = convert_checked(dec("50"), "EUR", None, "INR");
    assert_eq!(no_table.amount, dec("50"));
    assert!(no_table.fallback);

    // source known, base missing
    let mut rates = HashMap::new();
    rates.insert("EUR".to_string(), dec("0.9"));
    let partial = RateTable::new("USD", rates);
    assert!(convert_checked(dec("50"), "EUR", Some(&partial), "INR").fallback);

    // base known, source missing
    assert!(convert_checked(dec("50"), "CHF", Some(&usd_table()), "INR").fallback);
}

#[test]
fn zero_rate_is_treated_as_missing() {
    let mut rates = HashMap::new();
    rates.insert("INR".to_string(), dec("83"));
    rates.insert("XYZ".to_string(), Decimal::ZERO);
    let table = RateTable::new("USD", rates);
    let conv = convert_checked(dec("5"), "XYZ", Some(&table), "INR");
    assert!(conv.fallback);
    assert_eq!(conv.amount, dec("5"));
}

fn source() -> StaticRates {
    StaticRates::new([
        ("INR".to_string(), dec("1")),
        ("USD".to_string(), dec("0.012")),
    ])
}

#[test]
fn rate_cache_reuses_table_within_ttl() {
    let mut cache = RateCache::new(source(), "INR", Duration::from_secs(1800));
    assert_eq!(cache.status(), &RateStatus::Loading);
    assert!(cache.rates().is_some());
    assert!(cache.rates().is_some());
    assert_eq!(cache.fetches(), 1);
    assert_eq!(cache.status(), &RateStatus::Ready);
    assert_eq!(cache.rates().unwrap().anchor, "INR");

    cache.invalidate();
    assert!(cache.rates().is_some());
    assert_eq!(cache.fetches(), 2);
}

#[test]
fn rate_cache_refetches_after_ttl() {
    let mut cache = RateCache::new(source(), "INR", Duration::ZERO);
    cache.rates();
    cache.rates();
    assert_eq!(cache.fetches(), 2);
}

#[test]
fn rate_cache_failure_yields_no_rates_and_retries() {
    let mut cache = RateCache::new(
        StaticRates::failing("offline"),
        "INR",
        Duration::from_secs(1800),
    );
    assert!(cache.rates().is_none());
    assert!(matches!(cache.status(), RateStatus::Error(msg) if msg.contains("offline")));
    assert!(cache.rates().is_none());
    assert_eq!(cache.fetches(), 2);

    // a failed fetch degrades conversion instead of erroring
    let conv = convert_checked(dec("10"), "USD", cache.rates(), "INR");
    assert!(conv.fallback);
    assert_eq!(conv.amount, dec("10"));
}

#[test]
fn out_of_range_conversion_falls_back_instead_of_panicking() {
    let huge = dec("1000000000000000000000000000");
    let conv = convert_checked(huge, "USD", Some(&usd_table()), "INR");
    assert!(conv.fallback);
    assert_eq!(conv.amount, huge);
}
