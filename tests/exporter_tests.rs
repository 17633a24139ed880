// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::commands::exporter::export_transactions;
use fintrack::models::{NewTransaction, TxKind};
use fintrack::state::{Action, Store};
use fintrack::storage::MemoryStorage;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn seeded() -> Store<MemoryStorage> {
    let mut s = Store::open(MemoryStorage::new()).unwrap();
    s.dispatch(Action::add_transaction(NewTransaction {
        kind: TxKind::Expense,
        amount: Decimal::new(1234, 2),
        currency: "USD".into(),
        category: "Groceries".into(),
        description: Some("Weekly run".into()),
        date: NaiveDate::from_ymd_opt(2025, 1, 2),
    }))
    .unwrap();
    s
}

#[test]
fn export_transactions_writes_pretty_json() {
    let s = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("export.json");
    let n = export_transactions(s.get_state(), "json", &out).unwrap();
    assert_eq!(n, 1);

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let row = &v.as_array().unwrap()[0];
    assert_eq!(row["date"], "2025-01-02");
    assert_eq!(row["amount"], "12.34");
    assert_eq!(row["currency"], "USD");
    assert_eq!(row["category"], "Groceries");
    assert_eq!(row["description"], "Weekly run");
    assert_eq!(row["kind"], "expense");
}

#[test]
fn export_transactions_writes_csv_with_header() {
    let s = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("export.csv");
    export_transactions(s.get_state(), "csv", &out).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[1], "date");
    let rec = rdr.records().next().unwrap().unwrap();
    assert_eq!(&rec[3], "12.34");
    assert_eq!(&rec[5], "Groceries");
}

#[test]
fn unknown_format_is_an_error() {
    let s = seeded();
    let dir = tempdir().unwrap();
    assert!(export_transactions(s.get_state(), "xml", &dir.path().join("x")).is_err());
}
