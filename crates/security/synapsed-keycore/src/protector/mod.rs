//! Secret Protector: encrypts/decrypts private-key material using the
//! backend chosen at initialization (HSM, KMS, or Local-Derived).
//!
//! The protected blob is self-describing: its leading bytes identify which
//! backend produced it, so [`Protector::unprotect`] dispatches on the tag
//! rather than probing backends by exception.

pub mod hsm;
pub mod kms;
pub mod local;

use async_trait::async_trait;

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::model::KeyPurpose;

/// Capability set every Secret Protector backend implements.
#[async_trait]
pub trait SecretProtector: Send + Sync {
    /// Encrypt `plaintext` private-key material, binding it to `purpose`.
    async fn protect(&self, purpose: KeyPurpose, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt a blob this backend produced. Fails if `purpose` does not
    /// match the one the blob was protected under.
    async fn unprotect(&self, purpose: KeyPurpose, blob: &[u8]) -> Result<Vec<u8>>;

    /// Lightweight reachability/health probe for this backend.
    async fn health(&self) -> Result<BackendHealth>;
}

/// Outcome of a backend health probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendHealth {
    /// Backend name, e.g. `"hsm"`, `"kms"`, `"local"`.
    pub backend: &'static str,
    /// Whether the backend is currently reachable/usable.
    pub available: bool,
    /// Human-readable detail.
    pub detail: String,
}

const KMS_TAG: &[u8] = b"{\"b\":\"kms\"";
const HSM_TAG: &[u8] = b"H1:";
const LOCAL_TAG: &[u8] = b"L1";

/// Dispatches to whichever backends are configured. HSM takes precedence
/// over KMS for `protect` when both are enabled; Local-Derived is always
/// available as the fallback used when neither is enabled.
pub struct Protector {
    hsm: Option<hsm::HsmProtector>,
    kms: Option<kms::KmsProtector>,
    local: Option<local::LocalProtector>,
}

impl Protector {
    /// Build a protector from validated configuration. Local-Derived is only
    /// constructed when neither HSM nor KMS is enabled: it hard-requires a
    /// resolved master secret, which an HSM-only or KMS-only deployment
    /// never sets.
    pub fn from_config(config: &CoreConfig) -> Result<Self> {
        let hsm = if config.hsm_enabled { Some(hsm::HsmProtector::from_config(config)?) } else { None };
        let kms = if config.kms_enabled { Some(kms::KmsProtector::from_config(config)?) } else { None };
        let local = if !config.hsm_enabled && !config.kms_enabled {
            Some(local::LocalProtector::from_config(config)?)
        } else {
            None
        };
        Ok(Self { hsm, kms, local })
    }

    /// Encrypt `plaintext`, bound to `purpose`, via the precedence-selected backend.
    pub async fn protect(&self, purpose: KeyPurpose, plaintext: &[u8]) -> Result<Vec<u8>> {
        if let Some(hsm) = &self.hsm {
            return hsm.protect(purpose, plaintext).await;
        }
        if let Some(kms) = &self.kms {
            return kms.protect(purpose, plaintext).await;
        }
        let local = self
            .local
            .as_ref()
            .ok_or_else(|| CoreError::BackendUnavailable("no secret protector backend configured".into()))?;
        local.protect(purpose, plaintext).await
    }

    /// Decrypt `blob`, dispatching on its self-describing tag.
    pub async fn unprotect(&self, purpose: KeyPurpose, blob: &[u8]) -> Result<Vec<u8>> {
        if blob.starts_with(HSM_TAG) {
            let hsm = self
                .hsm
                .as_ref()
                .ok_or_else(|| CoreError::BackendUnavailable("HSM backend not configured".into()))?;
            return hsm.unprotect(purpose, blob).await;
        }
        if blob.starts_with(KMS_TAG) {
            let kms = self
                .kms
                .as_ref()
                .ok_or_else(|| CoreError::BackendUnavailable("KMS backend not configured".into()))?;
            return kms.unprotect(purpose, blob).await;
        }
        if blob.starts_with(LOCAL_TAG) {
            let local = self
                .local
                .as_ref()
                .ok_or_else(|| CoreError::BackendUnavailable("Local-Derived backend not configured".into()))?;
            return local.unprotect(purpose, blob).await;
        }
        Err(CoreError::PrimitiveFailure("unrecognized protected-blob tag".into()))
    }

    /// Health of every configured backend, local included.
    pub async fn health(&self) -> Vec<BackendHealth> {
        let mut out = Vec::new();
        if let Some(hsm) = &self.hsm {
            out.push(hsm.health().await.unwrap_or(BackendHealth {
                backend: "hsm",
                available: false,
                detail: "health probe failed".into(),
            }));
        }
        if let Some(kms) = &self.kms {
            out.push(kms.health().await.unwrap_or(BackendHealth {
                backend: "kms",
                available: false,
                detail: "health probe failed".into(),
            }));
        }
        if let Some(local) = &self.local {
            out.push(local.health().await.unwrap_or(BackendHealth {
                backend: "local",
                available: false,
                detail: "health probe failed".into(),
            }));
        }
        out
    }
}
