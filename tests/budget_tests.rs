// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use fintrack::aggregate::{BudgetHealth, budget_status};
use fintrack::errors::TrackerError;
use fintrack::models::BudgetGoal;
use fintrack::state::{Action, Store};
use fintrack::storage::MemoryStorage;
use fintrack::utils::{current_month, parse_positive_amount};
use rust_decimal::Decimal;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn store() -> Store<MemoryStorage> {
    Store::open(MemoryStorage::new()).unwrap()
}

fn goal(cat: &str, limit: &str, month: &str) -> BudgetGoal {
    BudgetGoal {
        id: Uuid::new_v4(),
        category_name: cat.into(),
        limit: dec(limit),
        month_year: month.into(),
    }
}

#[test]
fn upsert_twice_keeps_a_single_goal() {
    let mut s = store();
    s.dispatch(Action::set_budget_goal("Food", dec("5000"), Some("2025-10".into())))
        .unwrap();
    let changed = s
        .dispatch(Action::set_budget_goal("Food", dec("5000"), Some("2025-10".into())))
        .unwrap();
    assert!(!changed);
    let goals: Vec<_> = s.get_state().budgets.list_for_month("2025-10").collect();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].limit, dec("5000"));
}

#[test]
fn upsert_overwrites_limit_and_keeps_identity() {
    let mut s = store();
    s.dispatch(Action::set_budget_goal("Food", dec("5000"), Some("2025-10".into())))
        .unwrap();
    let id = s.get_state().budgets.find("Food", "2025-10").unwrap().id;
    s.dispatch(Action::set_budget_goal("Food", dec("7000"), Some("2025-10".into())))
        .unwrap();
    let budgets = &s.get_state().budgets;
    assert_eq!(budgets.list_all().len(), 1);
    let g = budgets.find("Food", "2025-10").unwrap();
    assert_eq!(g.id, id);
    assert_eq!(g.limit, dec("7000"));
}

#[test]
fn goals_are_per_month_and_default_to_current_month() {
    let mut s = store();
    s.dispatch(Action::set_budget_goal("Food", dec("100"), Some("2025-09".into())))
        .unwrap();
    s.dispatch(Action::set_budget_goal("Food", dec("200"), None))
        .unwrap();
    let budgets = &s.get_state().budgets;
    assert_eq!(budgets.list_all().len(), 2);
    assert_eq!(budgets.list_for_month(&current_month()).count(), 1);
    assert_eq!(budgets.list_for_month("2025-09").count(), 1);
}

#[test]
fn delete_goal_by_identity() {
    let mut s = store();
    s.dispatch(Action::set_budget_goal("Rent", dec("900"), Some("2025-10".into())))
        .unwrap();
    let id = s.get_state().budgets.list_all()[0].id;
    assert!(!s.dispatch(Action::delete_budget_goal(Uuid::new_v4())).unwrap());
    assert_eq!(s.get_state().budgets.list_all().len(), 1);
    assert!(s.dispatch(Action::delete_budget_goal(id)).unwrap());
    assert!(s.get_state().budgets.list_all().is_empty());
}

#[test]
fn overspent_goal_status() {
    let goals = vec![goal("Food", "800", "2025-10")];
    let mut spend = BTreeMap::new();
    spend.insert("Food".to_string(), dec("1000"));
    let status = budget_status(&goals, &spend, "2025-10").unwrap();
    assert_eq!(status.len(), 1);
    let s = &status[0];
    assert_eq!(s.spent, dec("1000"));
    assert_eq!(s.percentage, dec("125"));
    assert!(s.is_overspent);
    assert_eq!(s.remaining, dec("-200"));
    assert_eq!(s.health, BudgetHealth::Overspent);
}

#[test]
fn status_sorted_by_utilization_with_stable_ties() {
    let goals = vec![
        goal("A", "100", "2025-10"),
        goal("B", "100", "2025-10"),
        goal("C", "200", "2025-10"),
        goal("D", "50", "2025-09"),
    ];
    let mut spend = BTreeMap::new();
    spend.insert("A".to_string(), dec("50"));
    spend.insert("B".to_string(), dec("90"));
    spend.insert("C".to_string(), dec("100"));
    spend.insert("D".to_string(), dec("500"));
    let status = budget_status(&goals, &spend, "2025-10").unwrap();
    let names: Vec<_> = status.iter().map(|s| s.category_name.as_str()).collect();
    assert_eq!(names, ["B", "A", "C"]);
    assert_eq!(status[0].health, BudgetHealth::NearLimit);
    assert_eq!(status[1].health, BudgetHealth::OnTrack);
}

#[test]
fn goal_without_spend_is_untouched() {
    let goals = vec![goal("Utilities", "300", "2025-10")];
    let status = budget_status(&goals, &BTreeMap::new(), "2025-10").unwrap();
    assert_eq!(status[0].spent, Decimal::ZERO);
    assert_eq!(status[0].percentage, Decimal::ZERO);
    assert_eq!(status[0].remaining, dec("300"));
    assert!(!status[0].is_overspent);
}

#[test]
fn exactly_at_limit_is_not_overspent() {
    let goals = vec![goal("Food", "500", "2025-10")];
    let mut spend = BTreeMap::new();
    spend.insert("Food".to_string(), dec("500"));
    let status = budget_status(&goals, &spend, "2025-10").unwrap();
    assert!(!status[0].is_overspent);
    assert_eq!(status[0].health, BudgetHealth::NearLimit);
    assert_eq!(status[0].remaining, Decimal::ZERO);
}

#[test]
fn non_positive_limit_is_rejected() {
    let goals = vec![goal("Food", "0", "2025-10")];
    let err = budget_status(&goals, &BTreeMap::new(), "2025-10").unwrap_err();
    assert!(matches!(err, TrackerError::InvalidGoalLimit { .. }));
}

#[test]
fn unrepresentable_progress_is_an_error() {
    let goals = vec![goal("Food", "0.0000000000000000000000000001", "2025-10")];
    let mut spend = BTreeMap::new();
    spend.insert("Food".to_string(), dec("100"));
    let err = budget_status(&goals, &spend, "2025-10").unwrap_err();
    assert!(matches!(err, TrackerError::GoalOutOfRange { .. }));
}

#[test]
fn limit_input_is_bounded() {
    assert!(parse_positive_amount("0.0000000000000000000000000001").is_err());
    assert!(parse_positive_amount("1000000000000000.01").is_err());
    assert!(parse_positive_amount("1e27").is_err());
    assert_eq!(
        parse_positive_amount("1000000000000000").unwrap(),
        dec("1000000000000000")
    );
    // trailing zeros do not count against the scale
    assert_eq!(parse_positive_amount("12.500000").unwrap(), dec("12.5"));
    assert_eq!(parse_positive_amount("0.0001").unwrap(), dec("0.0001"));
}
