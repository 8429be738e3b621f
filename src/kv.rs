//! Read-only access to the embedded key-value store.
//!
//! The store is a SQLite file where each bucket is a table with a `key`
//! column and a `value` column. Keys and values are raw bytes; rows written
//! as TEXT are read back as their UTF-8 bytes.

use crate::error::{DebugError, DebugResult};
use clap::ValueEnum;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::path::Path;

/// Read-only handle on a key-value store file.
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Open the store at `path` without write access.
    pub fn open<P: AsRef<Path>>(path: P) -> DebugResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            DebugError::store(format!("cannot open store {}", path.display()))
                .with_details(e.to_string())
        })?;
        tracing::debug!(path = %path.display(), "Opened key-value store");
        Ok(Self { conn })
    }

    /// Wrap an existing connection (for testing).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Bucket names, sorted.
    pub fn buckets(&self) -> DebugResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// All keys in `bucket`, in storage order.
    pub fn keys(&self, bucket: &str) -> DebugResult<Vec<Vec<u8>>> {
        self.ensure_bucket(bucket)?;

        let sql = format!("SELECT key FROM {} ORDER BY rowid", quote_ident(bucket));
        let mut stmt = self.conn.prepare(&sql)?;
        let keys = stmt
            .query_map([], |row| Ok(value_bytes(row.get_ref(0)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    /// The value stored under `key` in `bucket`.
    pub fn get(&self, bucket: &str, key: &[u8]) -> DebugResult<Vec<u8>> {
        self.ensure_bucket(bucket)?;

        let sql = format!(
            "SELECT value FROM {} WHERE CAST(key AS BLOB) = ?1",
            quote_ident(bucket)
        );
        self.conn
            .query_row(&sql, params![key], |row| Ok(value_bytes(row.get_ref(0)?)))
            .optional()?
            .ok_or_else(|| DebugError::record_not_found(bucket, &display_key(key)))
    }

    fn ensure_bucket(&self, bucket: &str) -> DebugResult<()> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![bucket],
            |row| row.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(DebugError::bucket_not_found(bucket))
        }
    }
}

/// How to present a record value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ValueView {
    /// Hex dump of the raw bytes
    #[default]
    Raw,
    /// UTF-8 text (lossy)
    Text,
    /// Pretty-printed JSON document
    Json,
    /// Decoded audit history
    Audit,
}

/// Key rendered for display: UTF-8 when valid, otherwise `0x`-prefixed hex.
pub fn display_key(key: &[u8]) -> String {
    match std::str::from_utf8(key) {
        Ok(text) if !text.chars().any(char::is_control) => text.to_string(),
        _ => format!("0x{}", hex::encode(key)),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn value_bytes(value: ValueRef<'_>) -> Vec<u8> {
    match value {
        ValueRef::Null => Vec::new(),
        ValueRef::Integer(i) => i.to_string().into_bytes(),
        ValueRef::Real(f) => f.to_string().into_bytes(),
        ValueRef::Text(t) | ValueRef::Blob(t) => t.to_vec(),
    }
}
