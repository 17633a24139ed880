// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::errors::TrackerResult;

/// Versioned root key every collection is stored under.
pub const NAMESPACE: &str = "fintrack/v1";

pub const TRANSACTIONS: &str = "transactions";
pub const CATEGORIES: &str = "categories";
pub const BUDGETS: &str = "budgets";

/// Named-collection persistence. Payloads are JSON arrays.
pub trait Storage {
    fn read(&self, collection: &str) -> TrackerResult<Option<String>>;
    fn write(&mut self, collection: &str, payload: &str) -> TrackerResult<()>;
}

/// Process-local storage, used by tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn read(&self, collection: &str) -> TrackerResult<Option<String>> {
        Ok(self.entries.get(collection).cloned())
    }

    fn write(&mut self, collection: &str, payload: &str) -> TrackerResult<()> {
        self.entries
            .insert(collection.to_string(), payload.to_string());
        self.writes += 1;
        Ok(())
    }
}
