// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::TrackerResult;
use crate::storage::{NAMESPACE, Storage};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.fintrack", "Fintrack", "fintrack"));

pub const DB_ENV: &str = "FINTRACK_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(DB_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintrack.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- one JSON array per (namespace, collection)
    CREATE TABLE IF NOT EXISTS collections(
        namespace TEXT NOT NULL,
        name TEXT NOT NULL,
        payload TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        PRIMARY KEY(namespace, name)
    );
    "#,
    )
}

/// [`Storage`] over a SQLite file. Each write is committed before returning.
pub struct SqliteStorage {
    conn: Connection,
    namespace: String,
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> TrackerResult<Self> {
        Self::with_namespace(conn, NAMESPACE)
    }

    pub fn with_namespace(conn: Connection, namespace: &str) -> TrackerResult<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn,
            namespace: namespace.to_string(),
        })
    }

    pub fn open_in_memory() -> TrackerResult<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl Storage for SqliteStorage {
    fn read(&self, collection: &str) -> TrackerResult<Option<String>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE namespace=?1 AND name=?2",
                params![self.namespace, collection],
                |r| r.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write(&mut self, collection: &str, payload: &str) -> TrackerResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO collections(namespace, name, payload) VALUES (?1, ?2, ?3)
             ON CONFLICT(namespace, name) DO UPDATE SET payload=excluded.payload, updated_at=datetime('now')",
            params![self.namespace, collection, payload],
        )?;
        tx.commit()?;
        tracing::debug!(
            namespace = %self.namespace,
            collection,
            bytes = payload.len(),
            "collection saved"
        );
        Ok(())
    }
}
