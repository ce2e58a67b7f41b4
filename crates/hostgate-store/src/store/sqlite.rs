//! SQLite row handle for the persistent rule store.
//!
//! Layout:
//! - `permissions(frame_host, request_host, permissions)`: one packed row per
//!   host pair, unique on the two host columns.
//! - `globals(id = 0, permissions_initialized)`: single-row flag table.
//!
//! Connections are striped: a host pair always hashes to the same
//! connection, so different pairs rarely wait on each other in-process while
//! SQLite itself serializes writers on the file. Each slot update is a single
//! upsert statement, atomic at the storage engine.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};

use hostgate_core::error::{HostGateError, Result};
use hostgate_core::rules::codec;

use crate::config::SqliteSection;

use super::persistent::RowHandle;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS permissions (
    frame_host   TEXT NOT NULL,
    request_host TEXT NOT NULL,
    permissions  INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (frame_host, request_host)
);

CREATE TABLE IF NOT EXISTS globals (
    id                      INTEGER PRIMARY KEY CHECK (id = 0),
    permissions_initialized INTEGER NOT NULL DEFAULT 0
);

INSERT OR IGNORE INTO globals (id, permissions_initialized) VALUES (0, 0);
"#;

const SELECT_ROW: &str =
    "SELECT permissions FROM permissions WHERE frame_host = ?1 AND request_host = ?2";

const UPSERT_ROW: &str = r#"
INSERT INTO permissions (frame_host, request_host, permissions) VALUES (?1, ?2, ?3)
ON CONFLICT (frame_host, request_host)
DO UPDATE SET permissions = (permissions & ?4) | ?3
"#;

fn is_memory_path(path: &str) -> bool {
    path == ":memory:" || path.starts_with("file::memory:") || path.contains("mode=memory")
}

fn storage_err(ctx: &'static str) -> impl FnOnce(rusqlite::Error) -> HostGateError {
    move |e| HostGateError::Storage(format!("{ctx}: {e}"))
}

/// Striped SQLite connections over one database.
pub struct SqliteRowHandle {
    stripes: Vec<Mutex<Connection>>,
}

impl SqliteRowHandle {
    /// Open (or create) the database file described by `cfg`.
    ///
    /// In-memory paths (`:memory:`, `file::memory:...`) are private to one
    /// connection, so they always get a single stripe.
    pub fn open(cfg: &SqliteSection) -> Result<Self> {
        if cfg.connections == 0 {
            return Err(HostGateError::BadRequest("sqlite connections must be >= 1".into()));
        }
        let in_memory = is_memory_path(&cfg.path);
        let connections = if in_memory { 1 } else { cfg.connections };
        let busy = Duration::from_millis(cfg.busy_timeout_ms);

        let mut stripes = Vec::with_capacity(connections);
        for i in 0..connections {
            let conn = Connection::open(&cfg.path).map_err(storage_err("open database"))?;
            conn.busy_timeout(busy).map_err(storage_err("set busy timeout"))?;
            if i == 0 && !in_memory {
                let mode: String = conn
                    .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                    .map_err(storage_err("set journal mode"))?;
                tracing::debug!(journal_mode = %mode, "sqlite journal mode");
            }
            conn.execute_batch(SCHEMA).map_err(storage_err("init schema"))?;
            stripes.push(Mutex::new(conn));
        }

        tracing::info!(path = %cfg.path, connections, "opened sqlite rule store");
        Ok(Self { stripes })
    }

    /// Private in-memory database on a single connection (tests, ephemeral runs).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(storage_err("open in-memory database"))?;
        conn.execute_batch(SCHEMA).map_err(storage_err("init schema"))?;
        Ok(Self {
            stripes: vec![Mutex::new(conn)],
        })
    }

    fn stripe(&self, idx: usize) -> Result<MutexGuard<'_, Connection>> {
        self.stripes[idx % self.stripes.len()].lock().map_err(|_| {
            tracing::warn!(stripe = idx, "sqlite connection lock poisoned");
            HostGateError::Storage("sqlite connection lock poisoned".into())
        })
    }

    fn stripe_for(&self, frame_host: &str, request_host: &str) -> usize {
        let mut h = DefaultHasher::new();
        frame_host.hash(&mut h);
        request_host.hash(&mut h);
        (h.finish() % self.stripes.len() as u64) as usize
    }

    /// Number of stored rows.
    pub fn row_count(&self) -> Result<u64> {
        let conn = self.stripe(0)?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM permissions", [], |r| r.get(0))
            .map_err(storage_err("count rows"))?;
        Ok(n as u64)
    }
}

impl RowHandle for SqliteRowHandle {
    fn fetch(&self, frame_host: &str, request_host: &str) -> Result<Option<u32>> {
        let conn = self.stripe(self.stripe_for(frame_host, request_host))?;
        let mut stmt = conn.prepare_cached(SELECT_ROW).map_err(storage_err("prepare select"))?;
        let value: Option<i64> = stmt
            .query_row(params![frame_host, request_host], |r| r.get(0))
            .optional()
            .map_err(storage_err("select row"))?;
        Ok(value.map(codec::from_column))
    }

    fn update(&self, frame_host: &str, request_host: &str, clear_mask: u32, set_mask: u32) -> Result<()> {
        let conn = self.stripe(self.stripe_for(frame_host, request_host))?;
        let mut stmt = conn.prepare_cached(UPSERT_ROW).map_err(storage_err("prepare upsert"))?;
        stmt.execute(params![
            frame_host,
            request_host,
            codec::to_column(set_mask),
            codec::to_column(clear_mask),
        ])
        .map_err(storage_err("upsert row"))?;
        Ok(())
    }

    fn permissions_initialized(&self) -> Result<bool> {
        let conn = self.stripe(0)?;
        let flag: i64 = conn
            .query_row("SELECT permissions_initialized FROM globals WHERE id = 0", [], |r| r.get(0))
            .map_err(storage_err("read globals"))?;
        Ok(flag != 0)
    }

    fn set_permissions_initialized(&self, value: bool) -> Result<()> {
        let conn = self.stripe(0)?;
        conn.execute(
            "UPDATE globals SET permissions_initialized = ?1 WHERE id = 0",
            params![value],
        )
        .map_err(storage_err("write globals"))?;
        Ok(())
    }
}
