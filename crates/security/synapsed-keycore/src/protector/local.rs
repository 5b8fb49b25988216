//! Local-Derived Secret Protector: no external dependency, keys derived
//! from a process-wide master secret via scrypt.
//!
//! Tag format: `"L1"` ‖ `nonce(12B)` ‖ `gcm_ciphertext‖tag`. A distinct
//! derived key is used per [`KeyPurpose`] so that a blob protected for
//! one purpose cannot be unprotected under another.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::RngCore;
use scrypt::Params;

use super::{BackendHealth, LOCAL_TAG, SecretProtector};
use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::model::KeyPurpose;
use async_trait::async_trait;

const NONCE_LEN: usize = 12;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// `log2` of the smallest power of two `>= iterations`, clamped to scrypt's
/// valid range.
fn log_n_for(iterations: u32) -> u8 {
    let iterations = iterations.max(2);
    let log_n = (u32::BITS - (iterations - 1).leading_zeros()) as u8;
    log_n.clamp(1, 24)
}

pub struct LocalProtector {
    master_secret: String,
    log_n: u8,
    kdf_output_bytes: usize,
}

impl LocalProtector {
    pub fn from_config(config: &CoreConfig) -> Result<Self> {
        let master_secret = config
            .resolved_master_secret()
            .ok_or_else(|| CoreError::InvalidParameter("master_secret is required for the local backend".into()))?
            .to_string();
        Ok(Self {
            master_secret,
            log_n: log_n_for(config.kdf_iterations),
            kdf_output_bytes: config.kdf_output_bytes,
        })
    }

    /// Derives `kdf_output_bytes` of scrypt output (the full width the
    /// configuration requires, `>= 64`) and keys AES-256-GCM off its
    /// first 32 bytes; the remaining bytes are discarded. Deriving the
    /// full configured width — rather than exactly 32 bytes — keeps the
    /// KDF's work factor tied to `kdf_output_bytes` the way the config
    /// contract describes it, independent of how many of those bytes
    /// the cipher actually consumes.
    fn derive_key(&self, purpose: KeyPurpose) -> Result<[u8; 32]> {
        let salt = format!("synapsed-keycore/local/{purpose}");
        let params = Params::new(self.log_n, SCRYPT_R, SCRYPT_P, self.kdf_output_bytes)
            .map_err(|e| CoreError::PrimitiveFailure(format!("invalid scrypt params: {e}")))?;
        let mut derived = vec![0u8; self.kdf_output_bytes];
        scrypt::scrypt(self.master_secret.as_bytes(), salt.as_bytes(), &params, &mut derived)
            .map_err(|e| CoreError::PrimitiveFailure(format!("scrypt derivation failed: {e}")))?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&derived[..32]);
        Ok(out)
    }
}

#[async_trait]
impl SecretProtector for LocalProtector {
    async fn protect(&self, purpose: KeyPurpose, plaintext: &[u8]) -> Result<Vec<u8>> {
        let key = self.derive_key(purpose)?;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ct = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CoreError::PrimitiveFailure("local AES-GCM encryption failed".into()))?;

        let mut out = Vec::with_capacity(LOCAL_TAG.len() + NONCE_LEN + ct.len());
        out.extend_from_slice(LOCAL_TAG);
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ct);
        Ok(out)
    }

    async fn unprotect(&self, purpose: KeyPurpose, blob: &[u8]) -> Result<Vec<u8>> {
        if !blob.starts_with(LOCAL_TAG) {
            return Err(CoreError::PrimitiveFailure("not a local-derived protected blob".into()));
        }
        let body = &blob[LOCAL_TAG.len()..];
        if body.len() < NONCE_LEN {
            return Err(CoreError::PrimitiveFailure("local protected blob truncated".into()));
        }
        let nonce_bytes = &body[..NONCE_LEN];
        let ct = &body[NONCE_LEN..];

        let key = self.derive_key(purpose)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
        let nonce = Nonce::from_slice(nonce_bytes);
        cipher
            .decrypt(nonce, ct)
            .map(|pt| pt)
            .map_err(|_| CoreError::PrimitiveFailure("local AES-GCM decryption failed".into()))
    }

    async fn health(&self) -> Result<BackendHealth> {
        Ok(BackendHealth { backend: "local", available: true, detail: "always available".into() })
    }
}
