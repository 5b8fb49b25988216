//! Primitive Adapter: a uniform, binary-safe wrapper over the Kyber and
//! Dilithium operations exposed by `synapsed-crypto`.
//!
//! This module never implements a cryptographic primitive itself; it only
//! adapts `synapsed_crypto::api` to the fixed algorithm choices this Core
//! supports (Kyber-1024, Dilithium-5) and converts its error type into
//! [`CoreError::PrimitiveFailure`].

use synapsed_crypto::api::{self, KemAlgorithm, SignatureAlgorithm};
use synapsed_crypto::random::DefaultRng;

use crate::error::{CoreError, Result};
use crate::model::KeyAlgorithm;

fn kem_algorithm(algorithm: KeyAlgorithm) -> Result<KemAlgorithm> {
    match algorithm {
        KeyAlgorithm::Kyber1024 => Ok(KemAlgorithm::Kyber1024),
        KeyAlgorithm::Dilithium5 => {
            Err(CoreError::InvalidParameter("dilithium-5 is not a KEM algorithm".into()))
        }
    }
}

fn signature_algorithm(algorithm: KeyAlgorithm) -> Result<SignatureAlgorithm> {
    match algorithm {
        KeyAlgorithm::Dilithium5 => Ok(SignatureAlgorithm::Dilithium5),
        KeyAlgorithm::Kyber1024 => {
            Err(CoreError::InvalidParameter("kyber-1024 is not a signature algorithm".into()))
        }
    }
}

/// Generate a Kyber-1024 keypair. Returns `(public_key, secret_key)`.
pub fn kyber_keypair() -> Result<(Vec<u8>, Vec<u8>)> {
    let mut rng = DefaultRng::default();
    api::generate_keypair(KemAlgorithm::Kyber1024, &mut rng).map_err(CoreError::from)
}

/// Encapsulate a shared secret under `public_key`. Returns `(ciphertext, shared_secret)`.
pub fn kyber_encapsulate(public_key: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut rng = DefaultRng::default();
    api::encapsulate(KemAlgorithm::Kyber1024, public_key, &mut rng).map_err(CoreError::from)
}

/// Recover the shared secret from `ciphertext` under `secret_key`.
pub fn kyber_decapsulate(secret_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    api::decapsulate(KemAlgorithm::Kyber1024, secret_key, ciphertext).map_err(CoreError::from)
}

/// Generate a Dilithium-5 keypair. Returns `(public_key, secret_key)`.
pub fn dilithium_keypair() -> Result<(Vec<u8>, Vec<u8>)> {
    let mut rng = DefaultRng::default();
    api::generate_signing_keypair(SignatureAlgorithm::Dilithium5, &mut rng).map_err(CoreError::from)
}

/// Sign `message` with `secret_key`.
pub fn dilithium_sign(secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut rng = DefaultRng::default();
    api::sign(SignatureAlgorithm::Dilithium5, secret_key, message, &mut rng).map_err(CoreError::from)
}

/// Verify `signature` over `message` under `public_key`.
pub fn dilithium_verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
    api::verify(SignatureAlgorithm::Dilithium5, public_key, message, signature).map_err(CoreError::from)
}

/// Generate a keypair for `algorithm`, dispatching to the matching primitive.
///
/// Fails up front with `InvalidParameter` if `algorithm` has no matching
/// capability, rather than discovering the gap mid-operation.
pub fn generate_keypair(algorithm: KeyAlgorithm) -> Result<(Vec<u8>, Vec<u8>)> {
    match algorithm {
        KeyAlgorithm::Kyber1024 => {
            kem_algorithm(algorithm)?;
            kyber_keypair()
        }
        KeyAlgorithm::Dilithium5 => {
            signature_algorithm(algorithm)?;
            dilithium_keypair()
        }
    }
}
