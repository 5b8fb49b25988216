//! Schema creation, idempotent via `CREATE TABLE IF NOT EXISTS`.

use rusqlite::Connection;

use crate::error::Result;

pub(super) fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS keys (
            key_id                  TEXT PRIMARY KEY,
            algorithm                TEXT NOT NULL,
            purpose                  TEXT NOT NULL,
            public_key                BLOB NOT NULL,
            private_key_protected    BLOB NOT NULL,
            status                    TEXT NOT NULL,
            created_at                TEXT NOT NULL,
            expires_at                TEXT NOT NULL,
            last_rotated_at           TEXT,
            rotation_count            INTEGER NOT NULL DEFAULT 0,
            metadata                  TEXT NOT NULL DEFAULT '{}'
        );

        CREATE INDEX IF NOT EXISTS idx_keys_status ON keys(status);
        CREATE INDEX IF NOT EXISTS idx_keys_expires_at ON keys(expires_at);

        CREATE TABLE IF NOT EXISTS usage_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            key_id      TEXT NOT NULL,
            operation   TEXT NOT NULL,
            outcome     TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            details     TEXT NOT NULL DEFAULT '',
            FOREIGN KEY (key_id) REFERENCES keys(key_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_usage_log_key_id ON usage_log(key_id, timestamp);

        CREATE TABLE IF NOT EXISTS rotation_history (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            old_key_id      TEXT NOT NULL,
            new_key_id      TEXT NOT NULL,
            reason          TEXT NOT NULL,
            initiated_by    TEXT NOT NULL,
            rotated_at      TEXT NOT NULL,
            FOREIGN KEY (old_key_id) REFERENCES keys(key_id) ON DELETE CASCADE,
            FOREIGN KEY (new_key_id) REFERENCES keys(key_id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS security_events (
            event_id      TEXT PRIMARY KEY,
            event_type    TEXT NOT NULL,
            severity      TEXT NOT NULL,
            description   TEXT NOT NULL,
            key_id        TEXT,
            timestamp     TEXT NOT NULL,
            extra         TEXT NOT NULL DEFAULT '{}',
            FOREIGN KEY (key_id) REFERENCES keys(key_id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS operation_records (
            operation_id    TEXT PRIMARY KEY,
            key_id          TEXT,
            algorithm       TEXT,
            data_size       INTEGER NOT NULL,
            duration_ms     INTEGER NOT NULL,
            success         INTEGER NOT NULL,
            error_class     TEXT NOT NULL DEFAULT '',
            timestamp       TEXT NOT NULL,
            FOREIGN KEY (key_id) REFERENCES keys(key_id) ON DELETE CASCADE
        );
        ",
    )?;
    Ok(())
}
