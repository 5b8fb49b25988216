//! Operations Engine: the cryptographic and lifecycle verbs
//! (`generate`, `encrypt`, `decrypt`, `sign`, `verify`, `rotate`,
//! `revoke`) wired to the Key Store, Key Cache, Secret Protector, Audit
//! Log, and Operation Metrics. Every mutating call against a given
//! `key_id` is serialized through a per-key `tokio::sync::Mutex` so two
//! concurrent rotations (or a rotation racing a revoke) can't interleave.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::audit::AuditLog;
use crate::cache::{CachedKey, KeyCache};
use crate::config::CoreConfig;
use crate::crypto::{envelope, primitive};
use crate::error::{CoreError, Result};
use crate::metrics::OperationMetrics;
use crate::model::{
    Key, KeyAlgorithm, KeyPurpose, KeyStatus, OperationRecord, RotationHistoryEntry, SecurityEvent,
    SecuritySeverity, UsageLogEntry, UsageOperation, UsageOutcome,
};
use crate::protector::Protector;
use crate::store::KeyStore;

/// What `verify` checks a signature against: either a stored key (looked
/// up, with `expired` permitted but annotated and `compromised` rejected)
/// or a raw public key the caller already holds, per the Core's contract
/// that verification does not require the Core to know the signer.
#[derive(Debug, Clone)]
pub enum VerifyTarget {
    /// Look up `key_id` in the Key Store/Cache.
    KeyId(String),
    /// Verify directly against a caller-supplied Dilithium-5 public key.
    PublicKey(Vec<u8>),
}

/// Bundles the collaborators every operation needs. Cheaply cloneable:
/// every field is an `Arc`.
#[derive(Clone)]
pub struct Engine {
    store: Arc<KeyStore>,
    cache: Arc<KeyCache>,
    protector: Arc<Protector>,
    audit: Arc<AuditLog>,
    metrics: Arc<OperationMetrics>,
    locks: Arc<DashMap<String, Arc<AsyncMutex<()>>>>,
    rotation_interval: chrono::Duration,
}

impl Engine {
    pub fn new(
        store: Arc<KeyStore>,
        cache: Arc<KeyCache>,
        protector: Arc<Protector>,
        audit: Arc<AuditLog>,
        metrics: Arc<OperationMetrics>,
        config: &CoreConfig,
    ) -> Self {
        Self {
            store,
            cache,
            protector,
            audit,
            metrics,
            locks: Arc::new(DashMap::new()),
            rotation_interval: chrono::Duration::seconds(config.key_rotation_interval_secs),
        }
    }

    fn lock_for(&self, key_id: &str) -> Arc<AsyncMutex<()>> {
        Arc::clone(self.locks.entry(key_id.to_string()).or_insert_with(|| Arc::new(AsyncMutex::new(()))))
    }

    /// Record an operation's outcome against every audience that cares
    /// about it: the in-process metrics rollup, the per-key forensic
    /// `usage_log` (only when a `key_id` is known), and the
    /// key-agnostic `operation_records` table that also answers
    /// `encrypt`-against-a-raw-public-key calls.
    #[allow(clippy::too_many_arguments)]
    async fn record(
        &self,
        operation: UsageOperation,
        key_id: Option<&str>,
        algorithm: Option<KeyAlgorithm>,
        data_size: usize,
        started: Instant,
        result: &Result<()>,
    ) {
        let outcome = if result.is_ok() { UsageOutcome::Success } else { UsageOutcome::Failure };
        let duration = started.elapsed();
        self.metrics.record(operation, result.is_ok(), duration);
        let details = result.as_ref().err().map(|e| e.to_string()).unwrap_or_default();
        let error_class = result.as_ref().err().map(|e| e.class().to_string()).unwrap_or_default();
        let now = Utc::now();

        if let Some(key_id) = key_id {
            let _ = self
                .store
                .append_usage(UsageLogEntry { key_id: key_id.to_string(), operation, outcome, timestamp: now, details })
                .await;
        }

        let _ = self
            .store
            .append_operation_record(OperationRecord {
                operation_id: new_id(),
                key_id: key_id.map(str::to_string),
                algorithm,
                data_size,
                duration_ms: duration.as_millis() as u64,
                success: result.is_ok(),
                error_class,
                timestamp: now,
            })
            .await;
    }

    /// Persist a `SecurityEvent` to the durable store (≥ 90 day retention
    /// per the Core's audit contract) before surfacing it in the
    /// in-memory ring the health endpoint reads from. Persisted after the
    /// store write it describes, per the Core's audit-ordering rule.
    ///
    /// `pub(crate)` so `KeyCore::initialize`/`shutdown` can emit the
    /// system-lifecycle events (`system_initialized`, `master_keys_generated`,
    /// `system_initialization_failed`, `system_shutdown`) through the same path.
    pub(crate) async fn emit_security_event(&self, event: SecurityEvent) {
        let _ = self.store.append_security_event(event.clone()).await;
        self.audit.record(event);
    }

    async fn load_cached(&self, key_id: &str, require_active: bool) -> Result<CachedKey> {
        if let Some(cached) = self.cache.get(key_id) {
            if require_active && cached.status != KeyStatus::Active {
                return Err(CoreError::KeyNotActive(key_id.to_string()));
            }
            return Ok(cached);
        }
        let key = if require_active { self.store.get_active(key_id).await? } else { self.store.get_any(key_id).await? };
        let private_key = self.protector.unprotect(key.purpose, &key.private_key_protected).await?;
        let cached = CachedKey::from_key(&key, private_key);
        self.cache.insert(cached.clone());
        Ok(cached)
    }

    /// Generate a new key pair for `purpose`, using `algorithm` if given
    /// or the purpose's canonical algorithm otherwise.
    pub async fn generate(&self, purpose: KeyPurpose, algorithm: Option<KeyAlgorithm>) -> Result<Key> {
        let started = Instant::now();
        let result = self.generate_inner(purpose, algorithm).await;
        self.record(
            UsageOperation::Generate,
            result.as_ref().ok().map(|k: &Key| k.key_id.as_str()),
            result.as_ref().ok().map(|k| k.algorithm),
            0,
            started,
            &result.as_ref().map(|_| ()).map_err(clone_err),
        )
        .await;
        result
    }

    async fn generate_inner(&self, purpose: KeyPurpose, algorithm: Option<KeyAlgorithm>) -> Result<Key> {
        let algorithm = algorithm.unwrap_or(match purpose {
            KeyPurpose::Signature | KeyPurpose::MasterSignature => KeyAlgorithm::Dilithium5,
            _ => KeyAlgorithm::Kyber1024,
        });
        if !purpose.accepts(algorithm) {
            return Err(CoreError::InvalidParameter(format!("purpose {purpose} does not accept algorithm {algorithm}")));
        }

        let (public_key, private_key) = primitive::generate_keypair(algorithm)?;
        let private_key = Zeroizing::new(private_key);
        let protected = self.protector.protect(purpose, &private_key).await?;

        let key_id = new_id();
        let now = Utc::now();
        let key = Key {
            key_id: key_id.clone(),
            algorithm,
            purpose,
            public_key,
            private_key_protected: protected,
            status: KeyStatus::Active,
            created_at: now,
            expires_at: now + self.rotation_interval,
            last_rotated_at: None,
            rotation_count: 0,
            metadata: BTreeMap::new(),
        };
        self.store.insert(key.clone()).await?;
        self.cache.insert(CachedKey::from_key(&key, private_key.to_vec()));
        Ok(key)
    }

    /// Hybrid-encrypt `plaintext` for the holder of `recipient_public_key`.
    /// Stateless with respect to the Core: the caller supplies the
    /// recipient's public key directly (e.g. from a prior `generate`
    /// call's returned [`Key::public_key`]), so no Key Store or Cache
    /// lookup happens and no per-key usage-log entry is produced — only
    /// the key-agnostic `operation_records` row.
    pub async fn encrypt(&self, recipient_public_key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let started = Instant::now();
        let result = envelope::encrypt(plaintext, recipient_public_key);
        self.record(
            UsageOperation::Encrypt,
            None,
            Some(KeyAlgorithm::Kyber1024),
            plaintext.len(),
            started,
            &result.as_ref().map(|_| ()).map_err(clone_err),
        )
        .await;
        result
    }

    /// Hybrid-decrypt `ciphertext` using `key_id`'s private key.
    pub async fn decrypt(&self, key_id: &str, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let started = Instant::now();
        let result = self.decrypt_inner(key_id, ciphertext).await;
        self.record(
            UsageOperation::Decrypt,
            Some(key_id),
            Some(KeyAlgorithm::Kyber1024),
            ciphertext.len(),
            started,
            &result.as_ref().map(|_| ()).map_err(clone_err),
        )
        .await;
        result
    }

    async fn decrypt_inner(&self, key_id: &str, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cached = self.load_cached(key_id, true).await?;
        if cached.algorithm != KeyAlgorithm::Kyber1024 {
            return Err(CoreError::InvalidParameter("decrypt requires a kyber-1024 key".into()));
        }
        envelope::decrypt(ciphertext, &cached.private_key)
    }

    /// Sign `message` under `key_id`'s private key.
    pub async fn sign(&self, key_id: &str, message: &[u8]) -> Result<Vec<u8>> {
        let started = Instant::now();
        let result = self.sign_inner(key_id, message).await;
        self.record(
            UsageOperation::Sign,
            Some(key_id),
            Some(KeyAlgorithm::Dilithium5),
            message.len(),
            started,
            &result.as_ref().map(|_| ()).map_err(clone_err),
        )
        .await;
        result
    }

    async fn sign_inner(&self, key_id: &str, message: &[u8]) -> Result<Vec<u8>> {
        let cached = self.load_cached(key_id, true).await?;
        if cached.algorithm != KeyAlgorithm::Dilithium5 {
            return Err(CoreError::InvalidParameter("sign requires a dilithium-5 key".into()));
        }
        primitive::dilithium_sign(&cached.private_key, message)
    }

    /// Verify `signature` over `message` against `target`, either a stored
    /// `key_id` (`expired` permitted, since signatures made before
    /// rotation must still verify; `compromised` rejected, since a
    /// compromised key's material is untrusted) or a raw public key the
    /// Core has no record of.
    pub async fn verify(&self, target: VerifyTarget, message: &[u8], signature: &[u8]) -> Result<bool> {
        let started = Instant::now();
        let key_id = match &target {
            VerifyTarget::KeyId(id) => Some(id.clone()),
            VerifyTarget::PublicKey(_) => None,
        };
        let result = self.verify_inner(target, message, signature).await;
        self.record(
            UsageOperation::Verify,
            key_id.as_deref(),
            Some(KeyAlgorithm::Dilithium5),
            message.len(),
            started,
            &result.as_ref().map(|_| ()).map_err(clone_err),
        )
        .await;
        result
    }

    async fn verify_inner(&self, target: VerifyTarget, message: &[u8], signature: &[u8]) -> Result<bool> {
        let public_key = match target {
            VerifyTarget::KeyId(key_id) => {
                let cached = self.load_cached(&key_id, false).await?;
                if cached.status == KeyStatus::Compromised {
                    return Err(CoreError::KeyNotActive(key_id));
                }
                if cached.algorithm != KeyAlgorithm::Dilithium5 {
                    return Err(CoreError::InvalidParameter("verify requires a dilithium-5 key".into()));
                }
                if cached.status != KeyStatus::Active {
                    tracing::info!(key_id = %key_id, status = %cached.status, "verifying against a non-active key");
                }
                cached.public_key
            }
            VerifyTarget::PublicKey(public_key) => public_key,
        };
        primitive::dilithium_verify(&public_key, message, signature)
    }

    /// Rotate `key_id`: generate a replacement of the same algorithm and
    /// purpose, mark the old key `expired`, and record the lineage link.
    /// Serialized per-key so two concurrent rotations of the same key
    /// can't both succeed.
    pub async fn rotate(&self, key_id: &str, reason: &str, initiated_by: &str) -> Result<Key> {
        let started = Instant::now();
        let lock = self.lock_for(key_id);
        let _guard = lock.lock().await;
        let result = self.rotate_inner(key_id, reason, initiated_by).await;
        self.record(
            UsageOperation::Rotate,
            Some(key_id),
            result.as_ref().ok().map(|k| k.algorithm),
            0,
            started,
            &result.as_ref().map(|_| ()).map_err(clone_err),
        )
        .await;
        result
    }

    async fn rotate_inner(&self, key_id: &str, reason: &str, initiated_by: &str) -> Result<Key> {
        let old = self.store.get_any(key_id).await?;
        if old.status.is_terminal() {
            // Lost the race to another rotation of the same key while
            // waiting on the per-key lock. If it lost to a rotation (not a
            // revocation), resolve to the winner's new key rather than
            // surfacing a bare error — concurrent callers observe the same
            // outcome, per the Core's tie-break rule.
            if old.status == KeyStatus::Expired {
                if let Some(new_key_id) = self.store.latest_rotation_new_key_id(key_id).await? {
                    return self.store.get_any(&new_key_id).await;
                }
            }
            return Err(CoreError::KeyNotActive(key_id.to_string()));
        }

        let new_key = self.generate_inner(old.purpose, Some(old.algorithm)).await?;

        if old.status == KeyStatus::Active {
            self.store.update_status(&old.key_id, KeyStatus::PendingRotation).await?;
        }
        self.store.update_status(&old.key_id, KeyStatus::Expired).await?;
        self.cache.invalidate(&old.key_id);

        let now = Utc::now();
        self.store
            .record_rotation(RotationHistoryEntry {
                old_key_id: old.key_id.clone(),
                new_key_id: new_key.key_id.clone(),
                reason: reason.to_string(),
                initiated_by: initiated_by.to_string(),
                rotated_at: now,
            })
            .await?;

        self.emit_security_event(SecurityEvent {
            event_id: new_id(),
            event_type: "key_rotated".to_string(),
            severity: SecuritySeverity::Low,
            description: format!("key {} rotated to {}", old.key_id, new_key.key_id),
            key_id: Some(old.key_id.clone()),
            timestamp: now,
            extra: BTreeMap::new(),
        })
        .await;

        Ok(new_key)
    }

    /// Revoke `key_id` immediately, marking it `compromised`.
    /// Serialized per-key against a concurrent rotation of the same key.
    pub async fn revoke(&self, key_id: &str, reason: &str, initiated_by: &str) -> Result<()> {
        let started = Instant::now();
        let lock = self.lock_for(key_id);
        let _guard = lock.lock().await;
        let result = self.revoke_inner(key_id, reason, initiated_by).await;
        self.record(UsageOperation::Revoke, Some(key_id), None, 0, started, &result.as_ref().map(|_| ()).map_err(clone_err)).await;
        result
    }

    async fn revoke_inner(&self, key_id: &str, reason: &str, initiated_by: &str) -> Result<()> {
        let key = self.store.get_any(key_id).await?;
        if key.status == KeyStatus::Compromised {
            return Ok(());
        }
        if key.status.is_terminal() {
            return Err(CoreError::KeyNotActive(key_id.to_string()));
        }
        self.store.update_status(key_id, KeyStatus::Compromised).await?;
        self.cache.invalidate(key_id);

        self.emit_security_event(SecurityEvent {
            event_id: new_id(),
            event_type: "key_revoked".to_string(),
            severity: SecuritySeverity::High,
            description: format!("key {key_id} revoked: {reason}"),
            key_id: Some(key_id.to_string()),
            timestamp: Utc::now(),
            extra: BTreeMap::from([("initiated_by".to_string(), initiated_by.to_string())]),
        })
        .await;
        Ok(())
    }
}

fn clone_err(e: &CoreError) -> CoreError {
    // `CoreError` doesn't derive `Clone` (it wraps opaque library errors);
    // `record`'s logging path only needs the message, never the original.
    match e {
        CoreError::InvalidParameter(s) => CoreError::InvalidParameter(s.clone()),
        CoreError::NotInitialized => CoreError::NotInitialized,
        CoreError::KeyNotFound(s) => CoreError::KeyNotFound(s.clone()),
        CoreError::KeyNotActive(s) => CoreError::KeyNotActive(s.clone()),
        CoreError::BackendUnavailable(s) => CoreError::BackendUnavailable(s.clone()),
        CoreError::StorageFailure(s) => CoreError::StorageFailure(s.clone()),
        CoreError::PrimitiveFailure(s) => CoreError::PrimitiveFailure(s.clone()),
        CoreError::ConcurrencyConflict(s) => CoreError::ConcurrencyConflict(s.clone()),
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
