// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::Settings;
use crate::currency::RateTable;
use crate::errors::{TrackerError, TrackerResult};
use crate::utils::http_client;

/// Anything that can produce a latest-rates snapshot quoted against `anchor`.
pub trait RateSource {
    fn fetch_latest(&self, anchor: &str) -> TrackerResult<RateTable>;
}

/// exchangerate-api.com v6 `latest` endpoint.
pub struct ExchangeRateApi {
    client: reqwest::blocking::Client,
    url: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
    #[serde(rename = "error-type", default)]
    error_type: Option<String>,
}

impl ExchangeRateApi {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> TrackerResult<Self> {
        let client = http_client().map_err(|e| TrackerError::Rates(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into().trim_end_matches('/').to_string(),
            key: key.into(),
        })
    }

    /// `None` when no API key is configured.
    pub fn from_settings(settings: &Settings) -> TrackerResult<Option<Self>> {
        match &settings.rate_api_key {
            Some(key) => Ok(Some(Self::new(&settings.rate_api_url, key)?)),
            None => Ok(None),
        }
    }
}

impl RateSource for ExchangeRateApi {
    fn fetch_latest(&self, anchor: &str) -> TrackerResult<RateTable> {
        let url = format!("{}/{}/latest/{}", self.url, self.key, anchor);
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| TrackerError::Rates(e.without_url().to_string()))?;
        let body: LatestResponse = resp
            .json()
            .map_err(|e| TrackerError::Rates(e.without_url().to_string()))?;
        if body.result != "success" {
            return Err(TrackerError::Rates(
                body.error_type.unwrap_or_else(|| body.result.clone()),
            ));
        }
        let mut rates = HashMap::with_capacity(body.conversion_rates.len());
        for (code, rate) in body.conversion_rates {
            match Decimal::try_from(rate) {
                Ok(d) => {
                    rates.insert(code, d);
                }
                Err(_) => tracing::warn!(%code, rate, "skipping unrepresentable rate"),
            }
        }
        Ok(RateTable::new(
            body.base_code.unwrap_or_else(|| anchor.to_string()),
            rates,
        ))
    }
}

/// Fixed rates, for offline sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRates {
    rates: HashMap<String, Decimal>,
    fail_with: Option<String>,
}

impl StaticRates {
    pub fn new(rates: impl IntoIterator<Item = (String, Decimal)>) -> Self {
        Self {
            rates: rates.into_iter().collect(),
            fail_with: None,
        }
    }

    /// A source whose every fetch fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            rates: HashMap::new(),
            fail_with: Some(message.into()),
        }
    }
}

impl RateSource for StaticRates {
    fn fetch_latest(&self, anchor: &str) -> TrackerResult<RateTable> {
        if let Some(msg) = &self.fail_with {
            return Err(TrackerError::Rates(msg.clone()));
        }
        Ok(RateTable::new(anchor, self.rates.clone()))
    }
}

impl<S: RateSource + ?Sized> RateSource for Box<S> {
    fn fetch_latest(&self, anchor: &str) -> TrackerResult<RateTable> {
        (**self).fetch_latest(anchor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateStatus {
    /// Nothing fetched yet, or a fetch is being made.
    Loading,
    Ready,
    Error(String),
}

/// Latest-rates cache with a freshness window. A failed fetch yields no
/// table and is retried on the next read.
pub struct RateCache<S: RateSource> {
    source: S,
    anchor: String,
    ttl: Duration,
    cached: Option<(RateTable, Instant)>,
    status: RateStatus,
    fetches: usize,
}

impl<S: RateSource> RateCache<S> {
    pub fn new(source: S, anchor: impl Into<String>, ttl: Duration) -> Self {
        Self {
            source,
            anchor: anchor.into(),
            ttl,
            cached: None,
            status: RateStatus::Loading,
            fetches: 0,
        }
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn status(&self) -> &RateStatus {
        &self.status
    }

    /// Requests made to the source so far.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn rates(&mut self) -> Option<&RateTable> {
        let fresh = matches!(&self.cached, Some((_, at)) if at.elapsed() < self.ttl);
        if !fresh {
            self.status = RateStatus::Loading;
            self.fetches += 1;
            match self.source.fetch_latest(&self.anchor) {
                Ok(table) => {
                    tracing::info!(
                        anchor = %self.anchor,
                        currencies = table.rates.len(),
                        "exchange rates fetched"
                    );
                    self.cached = Some((table, Instant::now()));
                    self.status = RateStatus::Ready;
                }
                Err(err) => {
                    tracing::warn!(
                        anchor = %self.anchor,
                        error = %err,
                        "exchange rate fetch failed"
                    );
                    self.cached = None;
                    self.status = RateStatus::Error(err.to_string());
                    return None;
                }
            }
        }
        self.cached.as_ref().map(|(table, _)| table)
    }
}
