// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use uuid::Uuid;

use super::Action;
use crate::models::{Category, TxKind};

const STARTER: &[(&str, TxKind, &str)] = &[
    ("Salary", TxKind::Income, "💰"),
    ("Investments", TxKind::Income, "📈"),
    ("Food & Dining", TxKind::Expense, "🍔"),
    ("Rent", TxKind::Expense, "🏠"),
    ("Entertainment", TxKind::Expense, "🎬"),
    ("Utilities", TxKind::Expense, "💡"),
    ("Groceries", TxKind::Expense, "🛒"),
];

/// Categories a fresh data file starts with.
pub fn starter_categories() -> Vec<Category> {
    STARTER
        .iter()
        .map(|(name, kind, icon)| Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind: *kind,
            icon: icon.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoriesSlice {
    items: Vec<Category>,
}

impl CategoriesSlice {
    pub fn from_vec(items: Vec<Category>) -> Self {
        Self { items }
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.items
    }

    pub fn by_kind(&self, kind: TxKind) -> impl Iterator<Item = &Category> + Clone + '_ {
        self.items.iter().filter(move |c| c.kind == kind)
    }

    pub fn find(&self, name: &str, kind: TxKind) -> Option<&Category> {
        self.by_kind(kind).find(|c| c.name == name)
    }
}

// Append-only; names are not checked for uniqueness here.
pub(crate) fn reduce(slice: &mut CategoriesSlice, action: &Action) -> bool {
    match action {
        Action::AddCategory(category) => {
            slice.items.push(category.clone());
            true
        }
        _ => false,
    }
}
