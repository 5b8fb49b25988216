//! Hybrid encrypt/decrypt envelope built on top of the Kyber KEM.
//!
//! A KEM alone only establishes a shared secret; this module expands that
//! secret with HKDF and uses it to authenticated-encrypt the caller's
//! plaintext with AES-256-GCM. `synapsed-crypto::api::encrypt` ships an
//! illustrative XOR cipher that is explicitly not production-safe — this
//! replaces it rather than reuses it.
//!
//! Wire format: `kem_ct_len(u32 BE) ‖ kem_ct ‖ nonce(12B) ‖ gcm_ct‖tag`.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use hkdf::Hkdf;
use rand::RngCore;
use sha3::Sha3_256;

use crate::crypto::primitive;
use crate::error::{CoreError, Result};

const NONCE_LEN: usize = 12;

fn derive_aes_key(shared_secret: &[u8]) -> Result<[u8; 32]> {
    let hk = Hkdf::<Sha3_256>::new(None, shared_secret);
    let mut key = [0u8; 32];
    hk.expand(b"synapsed-keycore/hybrid-encrypt", &mut key)
        .map_err(|_| CoreError::PrimitiveFailure("HKDF expand failed".into()))?;
    Ok(key)
}

/// Encrypt `plaintext` for the holder of `recipient_public_key` (Kyber-1024).
pub fn encrypt(plaintext: &[u8], recipient_public_key: &[u8]) -> Result<Vec<u8>> {
    let (kem_ct, shared_secret) = primitive::kyber_encapsulate(recipient_public_key)?;
    let aes_key = derive_aes_key(&shared_secret)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&aes_key));
    let nonce = Nonce::from_slice(&nonce_bytes);
    let gcm_ct = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CoreError::PrimitiveFailure("AES-GCM encryption failed".into()))?;

    let mut out = Vec::with_capacity(4 + kem_ct.len() + NONCE_LEN + gcm_ct.len());
    out.extend_from_slice(&(kem_ct.len() as u32).to_be_bytes());
    out.extend_from_slice(&kem_ct);
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&gcm_ct);
    Ok(out)
}

/// Decrypt a ciphertext produced by [`encrypt`] using the matching secret key.
pub fn decrypt(ciphertext: &[u8], secret_key: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.len() < 4 {
        return Err(CoreError::PrimitiveFailure("ciphertext too short".into()));
    }
    let kem_ct_len = u32::from_be_bytes(ciphertext[0..4].try_into().unwrap()) as usize;
    let rest = &ciphertext[4..];
    if rest.len() < kem_ct_len + NONCE_LEN {
        return Err(CoreError::PrimitiveFailure("ciphertext truncated".into()));
    }
    let kem_ct = &rest[..kem_ct_len];
    let nonce_bytes = &rest[kem_ct_len..kem_ct_len + NONCE_LEN];
    let gcm_ct = &rest[kem_ct_len + NONCE_LEN..];

    let shared_secret = primitive::kyber_decapsulate(secret_key, kem_ct)?;
    let aes_key = derive_aes_key(&shared_secret)?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&aes_key));
    let nonce = Nonce::from_slice(nonce_bytes);
    cipher
        .decrypt(nonce, gcm_ct)
        .map_err(|_| CoreError::PrimitiveFailure("AES-GCM decryption failed".into()))
}
