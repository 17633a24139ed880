// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::config::Settings;
use crate::currency::RateTable;
use crate::db::SqliteStorage;
use crate::rates::{ExchangeRateApi, RateCache, RateSource};
use crate::state::Store;

/// What a command runs against: the store, settings and the rate cache.
pub struct Session {
    pub store: Store<SqliteStorage>,
    pub settings: Settings,
    rates: Option<RateCache<Box<dyn RateSource>>>,
}

impl Session {
    /// Uses the HTTP rate client when an API key is configured.
    pub fn open(conn: Connection) -> Result<Self> {
        let storage = SqliteStorage::new(conn)?;
        let settings = Settings::load(storage.connection())?;
        let source = ExchangeRateApi::from_settings(&settings)?
            .map(|api| Box::new(api) as Box<dyn RateSource>);
        Self::with_source(storage, settings, source)
    }

    pub fn with_source(
        storage: SqliteStorage,
        settings: Settings,
        source: Option<Box<dyn RateSource>>,
    ) -> Result<Self> {
        let store = Store::open(storage)?;
        let rates = source
            .map(|s| RateCache::new(s, settings.base_currency.clone(), settings.rate_ttl));
        Ok(Self {
            store,
            settings,
            rates,
        })
    }

    pub fn conn(&self) -> &Connection {
        self.store.storage().connection()
    }

    pub fn base(&self) -> &str {
        &self.settings.base_currency
    }

    /// `None` while no rates can be had; callers fall back to face values.
    pub fn rates(&mut self) -> Option<&RateTable> {
        match self.rates.as_mut() {
            Some(cache) => cache.rates(),
            None => {
                tracing::warn!(
                    "no exchange rate API key configured; foreign amounts stay unconverted"
                );
                None
            }
        }
    }
}
