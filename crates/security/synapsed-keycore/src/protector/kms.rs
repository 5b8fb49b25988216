//! KMS Secret Protector: models a cloud key-management service through
//! locally-simulated envelope encryption keyed by a per-`key_name` data
//! key, so the crate has no live-network dependency on a real KMS.
//!
//! Protected blobs are JSON: `{"b":"kms","ciphertext":"<base64>",
//! "nonce":"<base64>","key_name":"...","context":{"purpose":"..."}}`.
//! [`super::Protector::unprotect`] recognizes the blob by its leading
//! `{"b":"kms"` bytes.

use std::collections::BTreeMap;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::Digest;

use super::{BackendHealth, SecretProtector};
use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::model::KeyPurpose;
use async_trait::async_trait;

const NONCE_LEN: usize = 12;

#[derive(Debug, Serialize, Deserialize)]
struct KmsBlob {
    #[serde(rename = "b")]
    backend: String,
    ciphertext: String,
    nonce: String,
    key_name: String,
    context: BTreeMap<String, String>,
}

pub struct KmsProtector {
    master_secret: String,
    key_name: String,
}

impl KmsProtector {
    pub fn from_config(config: &CoreConfig) -> Result<Self> {
        let master_secret = config
            .resolved_master_secret()
            .ok_or_else(|| CoreError::InvalidParameter("master_secret is required for the kms backend".into()))?
            .to_string();
        if config.kms.key_ring.is_empty() {
            return Err(CoreError::InvalidParameter("kms.key_ring must be set when kms_enabled".into()));
        }
        let key_name = format!("{}/{}/{}", config.kms.project_id, config.kms.location, config.kms.key_ring);
        Ok(Self { master_secret, key_name })
    }

    /// The simulated data-encryption key for this key ring: a KMS never
    /// ships raw key bytes to the caller, so this stands in for a real
    /// `Decrypt`/`Encrypt` RPC against a data key the service holds.
    fn data_key(&self) -> [u8; 32] {
        let mut hasher = sha3::Sha3_256::new();
        hasher.update(self.master_secret.as_bytes());
        hasher.update(b"|");
        hasher.update(self.key_name.as_bytes());
        hasher.finalize().into()
    }
}

#[async_trait]
impl SecretProtector for KmsProtector {
    async fn protect(&self, purpose: KeyPurpose, plaintext: &[u8]) -> Result<Vec<u8>> {
        let key = self.data_key();
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ct = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CoreError::BackendUnavailable("kms simulated encrypt failed".into()))?;

        let mut context = BTreeMap::new();
        context.insert("purpose".to_string(), purpose.to_string());

        let blob = KmsBlob {
            backend: "kms".to_string(),
            ciphertext: B64.encode(ct),
            nonce: B64.encode(nonce_bytes),
            key_name: self.key_name.clone(),
            context,
        };
        serde_json::to_vec(&blob)
            .map_err(|e| CoreError::PrimitiveFailure(format!("failed to serialize kms blob: {e}")))
    }

    async fn unprotect(&self, purpose: KeyPurpose, blob: &[u8]) -> Result<Vec<u8>> {
        let blob: KmsBlob = serde_json::from_slice(blob)
            .map_err(|e| CoreError::PrimitiveFailure(format!("malformed kms blob: {e}")))?;
        if blob.key_name != self.key_name {
            return Err(CoreError::BackendUnavailable(format!(
                "blob references unknown key ring: {}",
                blob.key_name
            )));
        }
        let expected_purpose = purpose.to_string();
        if blob.context.get("purpose") != Some(&expected_purpose) {
            return Err(CoreError::PrimitiveFailure("kms blob purpose mismatch".into()));
        }

        let nonce_bytes = B64
            .decode(&blob.nonce)
            .map_err(|e| CoreError::PrimitiveFailure(format!("malformed kms nonce: {e}")))?;
        let ct = B64
            .decode(&blob.ciphertext)
            .map_err(|e| CoreError::PrimitiveFailure(format!("malformed kms ciphertext: {e}")))?;

        let key = self.data_key();
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
        let nonce = Nonce::from_slice(&nonce_bytes);
        cipher
            .decrypt(nonce, ct.as_slice())
            .map_err(|_| CoreError::BackendUnavailable("kms simulated decrypt failed".into()))
    }

    async fn health(&self) -> Result<BackendHealth> {
        Ok(BackendHealth {
            backend: "kms",
            available: true,
            detail: format!("key ring {}", self.key_name),
        })
    }
}
