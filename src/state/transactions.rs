// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use uuid::Uuid;

use super::Action;
use crate::models::Transaction;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionsSlice {
    items: Vec<Transaction>,
}

impl TransactionsSlice {
    pub fn from_vec(items: Vec<Transaction>) -> Self {
        Self { items }
    }

    /// Insertion order, as persisted.
    pub fn as_slice(&self) -> &[Transaction] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Canonical read view: newest `created_at` first. Records created at the
    /// same instant come back latest-inserted first. The iterator is `Clone`,
    /// so a consumer can walk it again.
    pub fn list_all(&self) -> std::vec::IntoIter<&Transaction> {
        let mut out: Vec<&Transaction> = self.items.iter().rev().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out.into_iter()
    }
}

pub(crate) fn reduce(slice: &mut TransactionsSlice, action: &Action) -> bool {
    match action {
        Action::AddTransaction(tx) => {
            slice.items.push(tx.clone());
            true
        }
        Action::EditTransaction { id, patch } => {
            match slice.items.iter_mut().find(|t| t.id == *id) {
                Some(existing) => {
                    let before = existing.clone();
                    existing.apply(patch.clone());
                    *existing != before
                }
                None => false,
            }
        }
        Action::DeleteTransaction(id) => {
            let before = slice.items.len();
            slice.items.retain(|t| t.id != *id);
            slice.items.len() != before
        }
        _ => false,
    }
}
