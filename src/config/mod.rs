//! Key-value configuration storage backed by SQLite.
//!
//! Shares a database with [`SqliteHistory`](crate::history::sqlite::SqliteHistory) —
//! pass the same path to both. Today the only key in use is `base_url`,
//! the address of the generation service.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::sync::Mutex;

const BASE_URL_KEY: &str = "base_url";

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get a config value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a config value (upsert).
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Remove a config key.
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }

    /// The persisted service address, if one has been set.
    pub fn base_url(&self) -> Result<Option<String>> {
        self.get(BASE_URL_KEY)
    }

    /// Persist the service address for future sessions.
    pub fn set_base_url(&self, url: &str) -> Result<()> {
        self.set(BASE_URL_KEY, url.trim_end_matches('/'))
    }
}
