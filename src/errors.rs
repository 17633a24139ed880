// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the library. Command handlers wrap these in `anyhow`.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Exchange rates unavailable: {0}")]
    Rates(String),
    #[error("Budget goal for '{category}' in {month} has a non-positive limit")]
    InvalidGoalLimit { category: String, month: String },
    #[error("Budget progress for '{category}' in {month} is out of range")]
    GoalOutOfRange { category: String, month: String },
}

pub type TrackerResult<T> = Result<T, TrackerError>;
