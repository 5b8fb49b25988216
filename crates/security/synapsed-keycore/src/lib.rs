//! Post-quantum key-lifecycle and cryptographic-operations core.
//!
//! [`KeyCore`] generates, stores, and operates Kyber-1024 (encryption)
//! and Dilithium-5 (signature) key pairs, protecting each key's private
//! material at rest with a pluggable [`protector::SecretProtector`]
//! backend (HSM, KMS, or a locally-derived key). Keys move through a
//! small lifecycle state machine — `active` → `pending_rotation` →
//! `expired`, with `compromised` reachable from either non-terminal
//! state — enforced by [`model::KeyStatus`] and driven either by an
//! explicit [`KeyCore::rotate`]/[`KeyCore::revoke`] call or by the
//! background [`scheduler::RotationScheduler`].
//!
//! ```no_run
//! use synapsed_keycore::{CoreConfig, KeyCore, KeyPurpose};
//!
//! # async fn run() -> synapsed_keycore::Result<()> {
//! let config = CoreConfig { master_secret: Some("change-me".into()), ..CoreConfig::default() };
//! let core = KeyCore::new(config)?;
//! core.initialize().await?;
//!
//! let key = core.generate(KeyPurpose::Encryption, None).await?;
//! let ciphertext = core.encrypt(&key.public_key, b"hello").await?;
//! let plaintext = core.decrypt(&key.key_id, &ciphertext).await?;
//! assert_eq!(plaintext, b"hello");
//!
//! core.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cache;
pub mod config;
pub mod crypto;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod model;
pub mod protector;
pub mod scheduler;
pub mod store;

mod core;

pub use config::CoreConfig;
pub use core::{CoreHealth, KeyCore};
pub use engine::VerifyTarget;
pub use error::{CoreError, Result};
pub use model::{Key, KeyAlgorithm, KeyPurpose, KeyStatus};
