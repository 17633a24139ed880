// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use uuid::Uuid;

use super::Action;
use crate::models::BudgetGoal;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetsSlice {
    goals: Vec<BudgetGoal>,
}

impl BudgetsSlice {
    pub fn from_vec(goals: Vec<BudgetGoal>) -> Self {
        Self { goals }
    }

    /// Insertion order.
    pub fn list_all(&self) -> &[BudgetGoal] {
        &self.goals
    }

    pub fn list_for_month<'a>(
        &'a self,
        month: &'a str,
    ) -> impl Iterator<Item = &'a BudgetGoal> + Clone + 'a {
        self.goals.iter().filter(move |g| g.month_year == month)
    }

    pub fn find(&self, category_name: &str, month: &str) -> Option<&BudgetGoal> {
        self.goals
            .iter()
            .find(|g| g.category_name == category_name && g.month_year == month)
    }

    pub fn get(&self, id: Uuid) -> Option<&BudgetGoal> {
        self.goals.iter().find(|g| g.id == id)
    }
}

pub(crate) fn reduce(slice: &mut BudgetsSlice, action: &Action) -> bool {
    match action {
        Action::SetBudgetGoal {
            id,
            category_name,
            limit,
            month_year,
        } => {
            // One goal per (category, month): overwrite in place, keep its id.
            if let Some(existing) = slice
                .goals
                .iter_mut()
                .find(|g| g.category_name == *category_name && g.month_year == *month_year)
            {
                let changed = existing.limit != *limit;
                existing.limit = *limit;
                return changed;
            }
            slice.goals.push(BudgetGoal {
                id: *id,
                category_name: category_name.clone(),
                limit: *limit,
                month_year: month_year.clone(),
            });
            true
        }
        Action::DeleteBudgetGoal(id) => {
            let before = slice.goals.len();
            slice.goals.retain(|g| g.id != *id);
            slice.goals.len() != before
        }
        _ => false,
    }
}
