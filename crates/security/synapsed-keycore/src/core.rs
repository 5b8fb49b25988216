//! `KeyCore`: the single entry point embedding applications use. Wires
//! together the Key Store, Key Cache, Secret Protector, Operations
//! Engine, Rotation Scheduler, Audit Log, and Operation Metrics behind
//! one idempotent `initialize()`/`shutdown()` lifecycle.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::cache::KeyCache;
use crate::config::CoreConfig;
use crate::engine::{Engine, VerifyTarget};
use crate::error::{CoreError, Result};
use crate::metrics::{HealthSummary, OperationMetrics};
use crate::model::{Key, KeyAlgorithm, KeyPurpose, SecurityEvent, SecuritySeverity};
use crate::protector::{BackendHealth, Protector};
use crate::scheduler::RotationScheduler;
use crate::store::KeyStore;

struct Inner {
    engine: Engine,
    store: Arc<KeyStore>,
    protector: Arc<Protector>,
    audit: Arc<AuditLog>,
    cache: Arc<KeyCache>,
    metrics: Arc<OperationMetrics>,
    scheduler: Mutex<Option<RotationScheduler>>,
}

/// Aggregate health report: backend reachability plus the in-process
/// operation rollup.
#[derive(Debug)]
pub struct CoreHealth {
    pub backends: Vec<BackendHealth>,
    pub operations: HealthSummary,
    pub status: &'static str,
}

/// Top-level handle for the key-lifecycle and cryptographic-operations
/// core. Cheap to clone (every field behind an `Arc`); `initialize()` is
/// safe to call more than once — later calls are no-ops once the first
/// succeeds.
#[derive(Clone)]
pub struct KeyCore {
    config: CoreConfig,
    inner: Arc<OnceCell<Inner>>,
    shut_down: Arc<AtomicBool>,
}

impl KeyCore {
    /// Build a Core from validated configuration. Does not touch the Key
    /// Store, Secret Protector, or scheduler until [`KeyCore::initialize`]
    /// is called.
    pub fn new(config: CoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, inner: Arc::new(OnceCell::new()), shut_down: Arc::new(AtomicBool::new(false)) })
    }

    /// Open the Key Store, build the Secret Protector, bootstrap the
    /// internal master-encryption/master-signature keys if they don't
    /// already exist, and start the Rotation Scheduler. Idempotent: a
    /// second call while the first is in flight, or after it has
    /// completed, observes the same state and returns `Ok(())` without
    /// re-running initialization.
    pub async fn initialize(&self) -> Result<()> {
        let result = self
            .inner
            .get_or_try_init(|| async {
                let store = Arc::new(KeyStore::open(self.config.database_path.clone()).await?);
                let cache = Arc::new(KeyCache::new());
                let protector = Arc::new(Protector::from_config(&self.config)?);
                let audit = Arc::new(AuditLog::new());
                let metrics = Arc::new(OperationMetrics::new(Duration::from_millis(self.config.slow_operation_threshold_ms)));

                let engine = Engine::new(
                    Arc::clone(&store),
                    Arc::clone(&cache),
                    Arc::clone(&protector),
                    Arc::clone(&audit),
                    Arc::clone(&metrics),
                    &self.config,
                );

                bootstrap_master_keys(&engine, &store).await?;

                let scheduler = RotationScheduler::spawn(
                    engine.clone(),
                    Arc::clone(&store),
                    Duration::from_secs(self.config.rotation_scan_interval_secs),
                    chrono::Duration::seconds(self.config.rotation_lookahead_secs),
                );

                engine
                    .emit_security_event(SecurityEvent {
                        event_id: Uuid::new_v4().simple().to_string(),
                        event_type: "system_initialized".to_string(),
                        severity: SecuritySeverity::Low,
                        description: "key core initialized".to_string(),
                        key_id: None,
                        timestamp: Utc::now(),
                        extra: BTreeMap::new(),
                    })
                    .await;
                tracing::info!("key core initialized");
                Result::Ok(Inner {
                    engine,
                    store,
                    protector,
                    audit,
                    cache,
                    metrics,
                    scheduler: Mutex::new(Some(scheduler)),
                })
            })
            .await;

        if let Err(err) = &result {
            tracing::error!(error = %err, "key core initialization failed");
            // No `Inner` exists yet (init failed before it was built), so
            // there's no durable store/audit log to persist this event to;
            // it's only observable via the log line above.
        }
        result?;
        Ok(())
    }

    /// Stop the Rotation Scheduler, zeroize the Key Cache, and release the
    /// Key Store. Further operation calls fail with
    /// [`CoreError::NotInitialized`].
    ///
    /// This consumes the last reference's scheduler handle; calling it
    /// more than once on clones of the same `KeyCore` is safe — only the
    /// first caller observes a running scheduler to stop.
    pub async fn shutdown(&self) -> Result<()> {
        let inner = self.inner.get().ok_or(CoreError::NotInitialized)?;
        let scheduler = inner.scheduler.lock().take();
        if let Some(scheduler) = scheduler {
            scheduler.shutdown().await;
        }
        inner.cache.clear();
        inner
            .engine
            .emit_security_event(SecurityEvent {
                event_id: Uuid::new_v4().simple().to_string(),
                event_type: "system_shutdown".to_string(),
                severity: SecuritySeverity::Low,
                description: "key core shut down".to_string(),
                key_id: None,
                timestamp: Utc::now(),
                extra: BTreeMap::new(),
            })
            .await;
        self.shut_down.store(true, Ordering::SeqCst);
        tracing::info!("key core shut down");
        Ok(())
    }

    fn inner(&self) -> Result<&Inner> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Err(CoreError::NotInitialized);
        }
        self.inner.get().ok_or(CoreError::NotInitialized)
    }

    /// Generate a new key pair for `purpose`.
    pub async fn generate(&self, purpose: KeyPurpose, algorithm: Option<KeyAlgorithm>) -> Result<Key> {
        self.inner()?.engine.generate(purpose, algorithm).await
    }

    /// Hybrid-encrypt `plaintext` under a caller-supplied recipient
    /// Kyber-1024 public key. Stateless: the Core does not need to know
    /// or hold the recipient's key.
    pub async fn encrypt(&self, recipient_public_key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        self.inner()?.engine.encrypt(recipient_public_key, plaintext).await
    }

    /// Hybrid-decrypt `ciphertext` using `key_id`'s private key.
    pub async fn decrypt(&self, key_id: &str, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.inner()?.engine.decrypt(key_id, ciphertext).await
    }

    /// Sign `message` under `key_id`'s private key.
    pub async fn sign(&self, key_id: &str, message: &[u8]) -> Result<Vec<u8>> {
        self.inner()?.engine.sign(key_id, message).await
    }

    /// Verify `signature` over `message`, either against a stored key
    /// (`VerifyTarget::KeyId`) or a caller-supplied public key
    /// (`VerifyTarget::PublicKey`).
    pub async fn verify(&self, target: VerifyTarget, message: &[u8], signature: &[u8]) -> Result<bool> {
        self.inner()?.engine.verify(target, message, signature).await
    }

    /// Rotate `key_id` on demand (e.g. an administrator-initiated rotation,
    /// distinct from the scheduler's own `scheduled_rotation` calls).
    pub async fn rotate(&self, key_id: &str, reason: &str) -> Result<Key> {
        self.inner()?.engine.rotate(key_id, reason, "api").await
    }

    /// Revoke `key_id` immediately.
    pub async fn revoke(&self, key_id: &str, reason: &str) -> Result<()> {
        self.inner()?.engine.revoke(key_id, reason, "api").await
    }

    /// Aggregate backend and operation health.
    pub async fn health(&self) -> Result<CoreHealth> {
        let inner = self.inner()?;
        let backends = inner.protector.health().await;
        let operations = inner.metrics.summary();
        let status = if backends.iter().all(|b| b.available) && operations.error_rate_percent < self.config.error_rate_threshold_percent {
            "healthy"
        } else if backends.iter().any(|b| b.available) {
            "degraded"
        } else {
            "unavailable"
        };
        Ok(CoreHealth { backends, operations, status })
    }

    /// Total number of keys currently persisted, active or not.
    pub async fn key_count(&self) -> Result<u64> {
        self.inner()?.store.count_keys().await
    }
}

/// Ensure an active `master-encryption` and `master-signature` key exist,
/// generating whichever is missing. Runs once per fresh database: a
/// restart against an already-bootstrapped store finds both keys via
/// [`KeyStore::find_active_by_purpose`] and generates nothing.
async fn bootstrap_master_keys(engine: &Engine, store: &KeyStore) -> Result<()> {
    let mut generated = Vec::new();
    for purpose in [KeyPurpose::MasterEncryption, KeyPurpose::MasterSignature] {
        if store.find_active_by_purpose(purpose).await?.is_none() {
            let key = engine.generate(purpose, None).await?;
            generated.push(key.key_id);
        }
    }
    if !generated.is_empty() {
        engine
            .emit_security_event(SecurityEvent {
                event_id: Uuid::new_v4().simple().to_string(),
                event_type: "master_keys_generated".to_string(),
                severity: SecuritySeverity::Medium,
                description: format!("bootstrapped {} master key(s)", generated.len()),
                key_id: None,
                timestamp: Utc::now(),
                extra: BTreeMap::from([("key_ids".to_string(), generated.join(","))]),
            })
            .await;
    }
    Ok(())
}
