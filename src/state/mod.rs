// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Single state container for transactions, categories and budget goals.
//!
//! Each collection is a slice with its own pure reducer. [`Store::dispatch`]
//! runs the reducers, saves the slice the action touched, then notifies
//! subscribers.

pub mod budgets;
pub mod categories;
pub mod transactions;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::TrackerResult;
use crate::models::{BudgetGoal, Category, NewTransaction, Transaction, TransactionPatch, TxKind};
use crate::storage::{self, Storage};
use crate::utils::current_month;

pub use budgets::BudgetsSlice;
pub use categories::{CategoriesSlice, starter_categories};
pub use transactions::TransactionsSlice;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub transactions: TransactionsSlice,
    pub categories: CategoriesSlice,
    pub budgets: BudgetsSlice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddTransaction(Transaction),
    EditTransaction {
        id: Uuid,
        patch: TransactionPatch,
    },
    DeleteTransaction(Uuid),
    AddCategory(Category),
    /// `id` is only used when no goal exists for the (category, month) pair.
    SetBudgetGoal {
        id: Uuid,
        category_name: String,
        limit: Decimal,
        month_year: String,
    },
    DeleteBudgetGoal(Uuid),
}

impl Action {
    pub fn add_transaction(fields: NewTransaction) -> Self {
        Action::AddTransaction(Transaction::new(fields))
    }

    pub fn edit_transaction(id: Uuid, patch: TransactionPatch) -> Self {
        Action::EditTransaction { id, patch }
    }

    pub fn delete_transaction(id: Uuid) -> Self {
        Action::DeleteTransaction(id)
    }

    pub fn add_category(name: impl Into<String>, kind: TxKind, icon: impl Into<String>) -> Self {
        Action::AddCategory(Category {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            icon: icon.into(),
        })
    }

    /// Month defaults to the current `YYYY-MM`.
    pub fn set_budget_goal(
        category_name: impl Into<String>,
        limit: Decimal,
        month_year: Option<String>,
    ) -> Self {
        Action::SetBudgetGoal {
            id: Uuid::new_v4(),
            category_name: category_name.into(),
            limit,
            month_year: month_year.unwrap_or_else(current_month),
        }
    }

    pub fn delete_budget_goal(id: Uuid) -> Self {
        Action::DeleteBudgetGoal(id)
    }

    pub fn slice(&self) -> Slice {
        match self {
            Action::AddTransaction(_)
            | Action::EditTransaction { .. }
            | Action::DeleteTransaction(_) => Slice::Transactions,
            Action::AddCategory(_) => Slice::Categories,
            Action::SetBudgetGoal { .. } | Action::DeleteBudgetGoal(_) => Slice::Budgets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Transactions,
    Categories,
    Budgets,
}

impl Slice {
    pub fn collection(&self) -> &'static str {
        match self {
            Slice::Transactions => storage::TRANSACTIONS,
            Slice::Categories => storage::CATEGORIES,
            Slice::Budgets => storage::BUDGETS,
        }
    }
}

/// Root reducer. Returns whether the state changed.
pub fn reduce(state: &mut AppState, action: &Action) -> bool {
    match action.slice() {
        Slice::Transactions => transactions::reduce(&mut state.transactions, action),
        Slice::Categories => categories::reduce(&mut state.categories, action),
        Slice::Budgets => budgets::reduce(&mut state.budgets, action),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState)>;

pub struct Store<S: Storage> {
    state: AppState,
    storage: S,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_listener: u64,
    version: u64,
}

impl<S: Storage> Store<S> {
    /// Loads every collection from `storage`; seeds the starter categories
    /// when none have been saved yet.
    pub fn open(mut backend: S) -> TrackerResult<Self> {
        let transactions: Vec<Transaction> =
            load_collection(&backend, storage::TRANSACTIONS)?.unwrap_or_default();
        let budgets: Vec<BudgetGoal> =
            load_collection(&backend, storage::BUDGETS)?.unwrap_or_default();
        let categories: Vec<Category> = match load_collection(&backend, storage::CATEGORIES)? {
            Some(list) => list,
            None => {
                let seeded = starter_categories();
                backend.write(storage::CATEGORIES, &serde_json::to_string(&seeded)?)?;
                tracing::debug!(count = seeded.len(), "seeded starter categories");
                seeded
            }
        };
        tracing::debug!(
            transactions = transactions.len(),
            categories = categories.len(),
            budgets = budgets.len(),
            "state loaded"
        );
        Ok(Self {
            state: AppState {
                transactions: TransactionsSlice::from_vec(transactions),
                categories: CategoriesSlice::from_vec(categories),
                budgets: BudgetsSlice::from_vec(budgets),
            },
            storage: backend,
            listeners: Vec::new(),
            next_listener: 0,
            version: 0,
        })
    }

    pub fn get_state(&self) -> &AppState {
        &self.state
    }

    /// Bumped on every state change; usable as a cache key.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Applies `action`. When it changed the state, the touched slice is
    /// saved and subscribers are notified. A save failure is returned, but
    /// the in-memory change is kept.
    pub fn dispatch(&mut self, action: Action) -> TrackerResult<bool> {
        let slice = action.slice();
        if !reduce(&mut self.state, &action) {
            tracing::debug!(?slice, "dispatch left state unchanged");
            return Ok(false);
        }
        self.version += 1;
        tracing::debug!(?slice, version = self.version, "state changed");
        self.save(slice)?;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
        Ok(true)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn save(&mut self, slice: Slice) -> TrackerResult<()> {
        let payload = match slice {
            Slice::Transactions => serde_json::to_string(self.state.transactions.as_slice())?,
            Slice::Categories => serde_json::to_string(self.state.categories.as_slice())?,
            Slice::Budgets => serde_json::to_string(self.state.budgets.list_all())?,
        };
        self.storage.write(slice.collection(), &payload)
    }
}

fn load_collection<S: Storage, T: DeserializeOwned>(
    storage: &S,
    name: &str,
) -> TrackerResult<Option<Vec<T>>> {
    match storage.read(name)? {
        Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
        None => Ok(None),
    }
}
