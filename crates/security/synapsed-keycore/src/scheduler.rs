//! Rotation Scheduler: a background task that ticks on an interval,
//! finds active keys nearing expiry, and rotates each in turn. One key's
//! rotation failure is logged and does not stop the sweep.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::engine::Engine;
use crate::store::KeyStore;

/// Owns the background rotation task's join handle and shutdown signal.
pub struct RotationScheduler {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RotationScheduler {
    /// Spawn the scheduler. `scan_interval` governs how often it wakes;
    /// `lookahead` governs how far ahead of `expires_at` a key becomes a
    /// rotation candidate.
    pub fn spawn(engine: Engine, store: Arc<KeyStore>, scan_interval: Duration, lookahead: chrono::Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(scan_interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        sweep(&engine, &store, lookahead).await;
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        Self { shutdown_tx, handle }
    }

    /// Signal the background task to stop and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.handle.await;
    }
}

async fn sweep(engine: &Engine, store: &Arc<KeyStore>, lookahead: chrono::Duration) {
    let expiring = match store.list_expiring(Utc::now(), lookahead).await {
        Ok(keys) => keys,
        Err(e) => {
            tracing::error!(error = %e, "rotation scheduler failed to list expiring keys");
            return;
        }
    };

    for key in expiring {
        match engine.rotate(&key.key_id, "scheduled_rotation", "scheduler").await {
            Ok(new_key) => {
                counter!("keycore_scheduled_rotations_total", "outcome" => "success").increment(1);
                tracing::info!(old_key_id = %key.key_id, new_key_id = %new_key.key_id, "scheduled rotation completed");
            }
            Err(e) => {
                counter!("keycore_scheduled_rotations_total", "outcome" => "failure").increment(1);
                tracing::error!(key_id = %key.key_id, error = %e, "scheduled rotation failed, continuing sweep");
            }
        }
    }
}
