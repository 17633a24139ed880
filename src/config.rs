// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::currency::DEFAULT_BASE_CURRENCY;
use crate::models::normalize_currency;

pub const API_KEY_ENV: &str = "FINTRACK_EXCHANGE_API_KEY";
pub const DEFAULT_RATE_API_URL: &str = "https://v6.exchangerate-api.com/v6";
pub const DEFAULT_RATE_TTL_SECS: u64 = 30 * 60;

const KEY_BASE_CURRENCY: &str = "base_currency";
const KEY_RATE_API_URL: &str = "rate_api_url";
const KEY_RATE_API_KEY: &str = "rate_api_key";
const KEY_RATE_TTL: &str = "rate_ttl_secs";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Currency every total is reported in.
    pub base_currency: String,
    pub rate_api_url: String,
    pub rate_api_key: Option<String>,
    pub rate_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            rate_api_url: DEFAULT_RATE_API_URL.to_string(),
            rate_api_key: None,
            rate_ttl: Duration::from_secs(DEFAULT_RATE_TTL_SECS),
        }
    }
}

impl Settings {
    /// Settings table values over defaults; the API key env var wins over the table.
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut s = Settings::default();
        if let Some(v) = get_setting(conn, KEY_BASE_CURRENCY)? {
            s.base_currency = normalize_currency(&v)
                .with_context(|| format!("Invalid {} in settings", KEY_BASE_CURRENCY))?;
        }
        if let Some(v) = get_setting(conn, KEY_RATE_API_URL)? {
            s.rate_api_url = v;
        }
        s.rate_api_key = get_setting(conn, KEY_RATE_API_KEY)?;
        if let Some(v) = get_setting(conn, KEY_RATE_TTL)? {
            let secs: u64 = v
                .parse()
                .with_context(|| format!("Invalid {} '{}'", KEY_RATE_TTL, v))?;
            s.rate_ttl = Duration::from_secs(secs);
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                s.rate_api_key = Some(key.trim().to_string());
            }
        }
        Ok(s)
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn set_base_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set_setting(conn, KEY_BASE_CURRENCY, ccy)
}

pub fn set_rate_api_key(conn: &Connection, key: &str) -> Result<()> {
    set_setting(conn, KEY_RATE_API_KEY, key)
}
