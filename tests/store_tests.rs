// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use fintrack::db::{self, SqliteStorage};
use fintrack::models::{NewTransaction, TxKind};
use fintrack::state::{Action, Store};
use fintrack::storage::{self, MemoryStorage, Storage};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn expense(amount: i64, category: &str) -> Action {
    Action::add_transaction(NewTransaction {
        kind: TxKind::Expense,
        amount: Decimal::new(amount, 0),
        currency: "INR".into(),
        category: category.into(),
        description: None,
        date: NaiveDate::from_ymd_opt(2025, 10, 1),
    })
}

#[test]
fn first_open_seeds_starter_categories() {
    let s = Store::open(MemoryStorage::new()).unwrap();
    let cats = &s.get_state().categories;
    assert_eq!(cats.as_slice().len(), 7);
    assert_eq!(cats.by_kind(TxKind::Income).count(), 2);
    assert_eq!(cats.by_kind(TxKind::Expense).count(), 5);
    assert!(cats.find("Rent", TxKind::Expense).is_some());
    assert!(cats.find("Rent", TxKind::Income).is_none());
    assert_eq!(s.storage().writes(), 1);
}

#[test]
fn add_category_appends_to_its_kind() {
    let mut s = Store::open(MemoryStorage::new()).unwrap();
    s.dispatch(Action::add_category("Freelance", TxKind::Income, "💼"))
        .unwrap();
    let income: Vec<_> = s
        .get_state()
        .categories
        .by_kind(TxKind::Income)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(income, ["Salary", "Investments", "Freelance"]);
}

#[test]
fn only_changed_slice_is_saved() {
    let mut s = Store::open(MemoryStorage::new()).unwrap();
    let seeded = s.storage().writes();
    s.dispatch(expense(10, "Food")).unwrap();
    assert_eq!(s.storage().writes(), seeded + 1);
    assert!(s.storage().read(storage::TRANSACTIONS).unwrap().is_some());
    assert!(s.storage().read(storage::BUDGETS).unwrap().is_none());
    assert_eq!(s.version(), 1);
}

#[test]
fn state_survives_reopen() {
    let mut s = Store::open(MemoryStorage::new()).unwrap();
    s.dispatch(expense(10, "Food")).unwrap();
    s.dispatch(Action::set_budget_goal("Food", Decimal::new(500, 0), Some("2025-10".into())))
        .unwrap();
    let reopened = Store::open(s.storage().clone()).unwrap();
    assert_eq!(reopened.get_state(), s.get_state());
}

#[test]
fn subscribers_hear_changes_only() {
    let mut s = Store::open(MemoryStorage::new()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = s.subscribe(move |state| sink.borrow_mut().push(state.transactions.len()));

    s.dispatch(expense(10, "Food")).unwrap();
    s.dispatch(Action::delete_transaction(uuid::Uuid::new_v4()))
        .unwrap();
    s.dispatch(expense(20, "Rent")).unwrap();
    assert_eq!(*seen.borrow(), vec![1, 2]);

    assert!(s.unsubscribe(id));
    s.dispatch(expense(30, "Rent")).unwrap();
    assert_eq!(seen.borrow().len(), 2);
    assert!(!s.unsubscribe(id));
}

#[test]
fn sqlite_storage_persists_across_connections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fintrack.sqlite");

    {
        let storage = SqliteStorage::new(db::open_at(&path).unwrap()).unwrap();
        let mut s = Store::open(storage).unwrap();
        s.dispatch(expense(42, "Groceries")).unwrap();
        s.dispatch(Action::set_budget_goal(
            "Groceries",
            Decimal::new(300, 0),
            Some("2025-10".into()),
        ))
        .unwrap();
    }

    let storage = SqliteStorage::new(db::open_at(&path).unwrap()).unwrap();
    let s = Store::open(storage).unwrap();
    let state = s.get_state();
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.transactions.as_slice()[0].amount, Decimal::new(42, 0));
    assert_eq!(state.budgets.list_all().len(), 1);
    assert_eq!(state.categories.as_slice().len(), 7);
}

#[test]
fn namespaces_are_isolated() {
    let mut v1 = SqliteStorage::open_in_memory().unwrap();
    v1.write(storage::TRANSACTIONS, "[]").unwrap();
    assert_eq!(v1.namespace(), storage::NAMESPACE);

    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let v2 = SqliteStorage::with_namespace(conn, "fintrack/v2").unwrap();
    assert!(v2.read(storage::TRANSACTIONS).unwrap().is_none());
    assert_eq!(v1.read(storage::TRANSACTIONS).unwrap().as_deref(), Some("[]"));
}

#[test]
fn corrupt_payload_is_reported() {
    let mut mem = MemoryStorage::new();
    mem.write(storage::TRANSACTIONS, "{not json").unwrap();
    assert!(Store::open(mem).is_err());
}
