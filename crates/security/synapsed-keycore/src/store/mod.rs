//! Key Store: durable persistence for keys and their lifecycle trails,
//! backed by `rusqlite` in WAL mode. Every call is dispatched through
//! `spawn_blocking` since `rusqlite::Connection` is a synchronous API;
//! a single `parking_lot::Mutex` serializes access to the shared
//! connection the way a single-writer SQLite file requires.

mod schema;

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{CoreError, Result};
use crate::model::{
    Key, KeyAlgorithm, KeyPurpose, KeyStatus, OperationRecord, RotationHistoryEntry, SecurityEvent,
    SecuritySeverity, UsageLogEntry, UsageOperation, UsageOutcome,
};

/// Durable store for keys, usage history, rotation history, and security
/// events.
pub struct KeyStore {
    conn: Arc<Mutex<Connection>>,
}

impl KeyStore {
    /// Open (creating if absent) the sqlite database at `path`, enable WAL
    /// mode, and ensure the schema exists.
    pub async fn open(path: impl AsRef<Path> + Send + 'static) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = tokio::task::spawn_blocking(move || -> Result<Connection> {
            let conn = Connection::open(&path)?;
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            schema::ensure_schema(&conn)?;
            Ok(conn)
        })
        .await
        .map_err(|e| CoreError::StorageFailure(format!("store open task panicked: {e}")))??;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// In-memory store, used by tests and the smoke example.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = tokio::task::spawn_blocking(|| -> Result<Connection> {
            let conn = Connection::open_in_memory()?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            schema::ensure_schema(&conn)?;
            Ok(conn)
        })
        .await
        .map_err(|e| CoreError::StorageFailure(format!("store open task panicked: {e}")))??;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    fn run<F, T>(&self, f: F) -> impl std::future::Future<Output = Result<T>>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        async move {
            tokio::task::spawn_blocking(move || {
                let guard = conn.lock();
                f(&guard)
            })
            .await
            .map_err(|e| CoreError::StorageFailure(format!("store task panicked: {e}")))?
        }
    }

    /// Insert a newly generated key row.
    pub async fn insert(&self, key: Key) -> Result<()> {
        self.run(move |conn| {
            let metadata = serde_json::to_string(&key.metadata)
                .map_err(|e| CoreError::StorageFailure(format!("failed to serialize metadata: {e}")))?;
            conn.execute(
                "INSERT INTO keys (key_id, algorithm, purpose, public_key, private_key_protected, status, \
                 created_at, expires_at, last_rotated_at, rotation_count, metadata) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    key.key_id,
                    key.algorithm.to_string(),
                    key.purpose.to_string(),
                    key.public_key,
                    key.private_key_protected,
                    key.status.to_string(),
                    key.created_at,
                    key.expires_at,
                    key.last_rotated_at,
                    key.rotation_count,
                    metadata,
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Fetch a key by id, but only if it is `active` (the common lookup
    /// path for operational encrypt/sign/decrypt/verify calls).
    pub async fn get_active(&self, key_id: &str) -> Result<Key> {
        let lookup = key_id.to_string();
        let not_found_id = key_id.to_string();
        let key = self.run(move |conn| fetch_row(conn, &lookup)).await?;
        match key {
            Some(key) if key.status == KeyStatus::Active => Ok(key),
            Some(key) => Err(CoreError::KeyNotActive(key.key_id)),
            None => Err(CoreError::KeyNotFound(not_found_id)),
        }
    }

    /// Fetch a key by id regardless of status (used by rotation/revocation,
    /// which operate on non-active keys too).
    pub async fn get_any(&self, key_id: &str) -> Result<Key> {
        let id = key_id.to_string();
        let lookup = id.clone();
        self.run(move |conn| fetch_row(conn, &lookup))
            .await?
            .ok_or(CoreError::KeyNotFound(id))
    }

    /// All keys currently `active`.
    pub async fn list_active(&self) -> Result<Vec<Key>> {
        self.run(|conn| list_rows(conn, "status = 'active'", params![])).await
    }

    /// Active keys whose `expires_at` falls within `lookahead` from now.
    pub async fn list_expiring(&self, now: DateTime<Utc>, lookahead: chrono::Duration) -> Result<Vec<Key>> {
        let cutoff = now + lookahead;
        self.run(move |conn| {
            list_rows(conn, "status = 'active' AND expires_at <= ?1", params![cutoff])
        })
        .await
    }

    /// The most recent `active` key for `purpose`, if any — used at
    /// startup to decide whether the master keys still need generating.
    pub async fn find_active_by_purpose(&self, purpose: KeyPurpose) -> Result<Option<Key>> {
        let purpose = purpose.to_string();
        self.run(move |conn| {
            let rows = list_rows(conn, "status = 'active' AND purpose = ?1 ORDER BY created_at DESC LIMIT 1", params![purpose])?;
            Ok(rows.into_iter().next())
        })
        .await
    }

    /// Transition `key_id` to `status`, validating against the state
    /// machine first.
    pub async fn update_status(&self, key_id: &str, status: KeyStatus) -> Result<()> {
        let key_id = key_id.to_string();
        self.run(move |conn| {
            let current = fetch_row(conn, &key_id)?.ok_or_else(|| CoreError::KeyNotFound(key_id.clone()))?;
            if current.status != status && !current.status.can_transition_to(status) {
                return Err(CoreError::InvalidParameter(format!(
                    "cannot transition key {key_id} from {} to {status}",
                    current.status
                )));
            }
            conn.execute(
                "UPDATE keys SET status = ?1 WHERE key_id = ?2",
                params![status.to_string(), key_id],
            )?;
            Ok(())
        })
        .await
    }

    /// Mark `key_id` rotated: bump `rotation_count`, stamp
    /// `last_rotated_at`, and record the lineage link.
    pub async fn record_rotation(&self, entry: RotationHistoryEntry) -> Result<()> {
        self.run(move |conn| {
            conn.execute(
                "UPDATE keys SET rotation_count = rotation_count + 1, last_rotated_at = ?1 WHERE key_id = ?2",
                params![entry.rotated_at, entry.old_key_id],
            )?;
            conn.execute(
                "INSERT INTO rotation_history (old_key_id, new_key_id, reason, initiated_by, rotated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![entry.old_key_id, entry.new_key_id, entry.reason, entry.initiated_by, entry.rotated_at],
            )?;
            Ok(())
        })
        .await
    }

    /// The winning `new_key_id` of the most recent rotation recorded
    /// against `old_key_id`, if any. Used to resolve a losing concurrent
    /// `rotate` call to the same outcome the winner observed, rather than
    /// surfacing it as a bare error.
    pub async fn latest_rotation_new_key_id(&self, old_key_id: &str) -> Result<Option<String>> {
        let old_key_id = old_key_id.to_string();
        self.run(move |conn| {
            conn.query_row(
                "SELECT new_key_id FROM rotation_history WHERE old_key_id = ?1 ORDER BY rotated_at DESC LIMIT 1",
                params![old_key_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(CoreError::from)
        })
        .await
    }

    /// Append a forensic usage-log row.
    pub async fn append_usage(&self, entry: UsageLogEntry) -> Result<()> {
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO usage_log (key_id, operation, outcome, timestamp, details) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![entry.key_id, entry.operation.to_string(), entry.outcome.to_string(), entry.timestamp, entry.details],
            )?;
            Ok(())
        })
        .await
    }

    /// Append a security event row.
    pub async fn append_security_event(&self, event: SecurityEvent) -> Result<()> {
        self.run(move |conn| {
            let extra = serde_json::to_string(&event.extra)
                .map_err(|e| CoreError::StorageFailure(format!("failed to serialize event extra: {e}")))?;
            conn.execute(
                "INSERT INTO security_events (event_id, event_type, severity, description, key_id, timestamp, extra) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    event.event_id,
                    event.event_type,
                    event.severity.to_string(),
                    event.description,
                    event.key_id,
                    event.timestamp,
                    extra,
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Append a metrics/forensics row. Unlike `usage_log`, `key_id` and
    /// `algorithm` may both be absent — `encrypt` against a caller-supplied
    /// public key has no stored key to attribute the call to.
    pub async fn append_operation_record(&self, record: OperationRecord) -> Result<()> {
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO operation_records (operation_id, key_id, algorithm, data_size, duration_ms, success, error_class, timestamp) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.operation_id,
                    record.key_id,
                    record.algorithm.map(|a| a.to_string()),
                    record.data_size as i64,
                    record.duration_ms as i64,
                    record.success,
                    record.error_class,
                    record.timestamp,
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Usage log entries for `key_id`, most recent first, capped at `limit`.
    pub async fn usage_log(&self, key_id: &str, limit: usize) -> Result<Vec<UsageLogEntry>> {
        let key_id = key_id.to_string();
        self.run(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT key_id, operation, outcome, timestamp, details FROM usage_log \
                 WHERE key_id = ?1 ORDER BY timestamp DESC LIMIT ?2",
            )?;
            let rows = stmt
                .query_map(params![key_id, limit as i64], |row| {
                    Ok(UsageLogEntry {
                        key_id: row.get(0)?,
                        operation: parse_or_null(row.get::<_, String>(1)?),
                        outcome: parse_or_null(row.get::<_, String>(2)?),
                        timestamp: row.get(3)?,
                        details: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Count of persisted `security_events` rows of a given `event_type`,
    /// used by tests and forensic queries.
    pub async fn count_security_events(&self, event_type: &str) -> Result<u64> {
        let event_type = event_type.to_string();
        self.run(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM security_events WHERE event_type = ?1",
                params![event_type],
                |row| row.get(0),
            )?;
            Ok(count as u64)
        })
        .await
    }

    /// Total number of key rows, used by health/diagnostics.
    pub async fn count_keys(&self) -> Result<u64> {
        self.run(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM keys", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }
}

fn parse_or_null<T: std::str::FromStr>(s: String) -> T {
    s.parse().unwrap_or_else(|_| panic!("corrupt enum column value: {s}"))
}

fn fetch_row(conn: &Connection, key_id: &str) -> Result<Option<Key>> {
    conn.query_row(
        "SELECT key_id, algorithm, purpose, public_key, private_key_protected, status, \
         created_at, expires_at, last_rotated_at, rotation_count, metadata FROM keys WHERE key_id = ?1",
        params![key_id],
        row_to_key,
    )
    .optional()
    .map_err(CoreError::from)
}

fn list_rows(conn: &Connection, predicate: &str, bind: impl rusqlite::Params) -> Result<Vec<Key>> {
    let sql = format!(
        "SELECT key_id, algorithm, purpose, public_key, private_key_protected, status, \
         created_at, expires_at, last_rotated_at, rotation_count, metadata FROM keys WHERE {predicate}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(bind, row_to_key)?.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn row_to_key(row: &rusqlite::Row<'_>) -> rusqlite::Result<Key> {
    let algorithm: String = row.get(1)?;
    let purpose: String = row.get(2)?;
    let status: String = row.get(5)?;
    let metadata_json: String = row.get(10)?;
    Ok(Key {
        key_id: row.get(0)?,
        algorithm: algorithm.parse::<KeyAlgorithm>().expect("corrupt algorithm column"),
        purpose: purpose.parse::<KeyPurpose>().expect("corrupt purpose column"),
        public_key: row.get(3)?,
        private_key_protected: row.get(4)?,
        status: status.parse::<KeyStatus>().expect("corrupt status column"),
        created_at: row.get(6)?,
        expires_at: row.get(7)?,
        last_rotated_at: row.get(8)?,
        rotation_count: row.get::<_, i64>(9)? as u32,
        metadata: serde_json::from_str(&metadata_json).unwrap_or_default(),
    })
}
