// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod currency;
pub mod db;
pub mod errors;
pub mod insights;
pub mod models;
pub mod rates;
pub mod session;
pub mod state;
pub mod storage;
pub mod utils;
