use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::Mutex;

use super::{History, HistoryEntry};

/// SQLite-backed generation history.
pub struct SqliteHistory {
    conn: Mutex<Connection>,
}

impl SqliteHistory {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS generations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL DEFAULT (datetime('now')),
                topic TEXT NOT NULL,
                video_url TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::new(":memory:")
    }
}

#[async_trait]
impl History for SqliteHistory {
    async fn record(&self, entry: HistoryEntry) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO generations (topic, video_url) VALUES (?1, ?2)",
            [&entry.topic, &entry.video_url],
        )?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let conn = self.conn.lock().unwrap();
        // Get the last `limit` entries, but return them in chronological order
        let mut stmt = conn.prepare(
            "SELECT topic, video_url FROM (
                SELECT topic, video_url, id FROM generations ORDER BY id DESC LIMIT ?1
            ) ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map([limit as i64], |row| {
                Ok(HistoryEntry {
                    topic: row.get(0)?,
                    video_url: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    async fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM generations", [])?;
        Ok(())
    }
}
