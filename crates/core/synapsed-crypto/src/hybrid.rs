//! Hybrid classical/post-quantum cryptographic modes
//! 
//! This module provides hybrid modes that combine classical cryptographic algorithms
//! with post-quantum algorithms for defense in depth during the transition period.

use crate::Result;
use crate::traits::SecureRandom;

/// Hybrid key encapsulation mechanism that combines classical and post-quantum KEMs
pub trait HybridKem: Send + Sync {
    /// Generate a hybrid keypair
    fn generate_keypair<R: SecureRandom>(&self, rng: &mut R) -> Result<(Vec<u8>, Vec<u8>)>;
    
    /// Encapsulate using hybrid mode
    fn encapsulate<R: SecureRandom>(
        &self, 
        public_key: &[u8], 
        rng: &mut R
    ) -> Result<(Vec<u8>, Vec<u8>)>;
    
    /// Decapsulate using hybrid mode
    fn decapsulate(&self, secret_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// Hybrid signature scheme that combines classical and post-quantum signatures
pub trait HybridSignature: Send + Sync {
    /// Generate a hybrid signing keypair
    fn generate_keypair<R: SecureRandom>(&self, rng: &mut R) -> Result<(Vec<u8>, Vec<u8>)>;
    
    /// Sign a message using hybrid mode
    fn sign<R: SecureRandom>(
        &self,
        secret_key: &[u8],
        message: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>>;
    
    /// Verify a hybrid signature
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool>;
}

/// Basic implementation of hybrid KEM (placeholder for now)
#[derive(Debug)]
pub struct BasicHybridKem<C, P> {
    #[allow(dead_code)]
    classical: C,
    #[allow(dead_code)]
    post_quantum: P,
}

impl<C, P> BasicHybridKem<C, P> {
    /// Create a new hybrid KEM
    pub fn new(classical: C, post_quantum: P) -> Self {
        Self { classical, post_quantum }
    }
}

/// Basic implementation of hybrid signature (placeholder for now)
#[derive(Debug)]
pub struct BasicHybridSignature<C, P> {
    #[allow(dead_code)]
    classical: C,
    #[allow(dead_code)]
    post_quantum: P,
}

impl<C, P> BasicHybridSignature<C, P> {
    /// Create a new hybrid signature scheme
    pub fn new(classical: C, post_quantum: P) -> Self {
        Self { classical, post_quantum }
    }
}

// Note: Full implementations would require specific classical algorithms
// (e.g., ECDH, ECDSA) to be integrated. For now, these are placeholder
// structures and traits that define the interface for hybrid modes.
