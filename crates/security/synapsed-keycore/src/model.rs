//! Data model: keys and their lifecycle metadata, usage and rotation
//! history, operation records, and security events.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Post-quantum algorithm a key was generated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    /// Kyber-1024 key-encapsulation mechanism.
    Kyber1024,
    /// Dilithium-5 digital-signature scheme.
    Dilithium5,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Kyber1024 => write!(f, "kyber-1024"),
            KeyAlgorithm::Dilithium5 => write!(f, "dilithium-5"),
        }
    }
}

impl FromStr for KeyAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kyber-1024" => Ok(KeyAlgorithm::Kyber1024),
            "dilithium-5" => Ok(KeyAlgorithm::Dilithium5),
            other => Err(CoreError::InvalidParameter(format!("unknown algorithm: {other}"))),
        }
    }
}

/// The purpose a key was issued for. Gates which algorithm is valid and
/// participates in Secret Protector derivation/context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPurpose {
    /// Asymmetric encryption (Kyber).
    Encryption,
    /// Digital signatures (Dilithium).
    Signature,
    /// Internal master-key material used to protect other key material.
    MasterEncryption,
    /// Internal master-key material used to protect signing material.
    MasterSignature,
    /// Unscoped / general purpose.
    General,
}

impl fmt::Display for KeyPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyPurpose::Encryption => "encryption",
            KeyPurpose::Signature => "signature",
            KeyPurpose::MasterEncryption => "master-encryption",
            KeyPurpose::MasterSignature => "master-signature",
            KeyPurpose::General => "general",
        };
        write!(f, "{s}")
    }
}

impl FromStr for KeyPurpose {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encryption" => Ok(KeyPurpose::Encryption),
            "signature" => Ok(KeyPurpose::Signature),
            "master-encryption" => Ok(KeyPurpose::MasterEncryption),
            "master-signature" => Ok(KeyPurpose::MasterSignature),
            "general" => Ok(KeyPurpose::General),
            other => Err(CoreError::InvalidParameter(format!("unknown purpose: {other}"))),
        }
    }
}

impl KeyPurpose {
    /// Whether `algorithm` is the correct family for this purpose.
    pub fn accepts(&self, algorithm: KeyAlgorithm) -> bool {
        match self {
            KeyPurpose::Encryption | KeyPurpose::MasterEncryption => {
                algorithm == KeyAlgorithm::Kyber1024
            }
            KeyPurpose::Signature | KeyPurpose::MasterSignature => {
                algorithm == KeyAlgorithm::Dilithium5
            }
            KeyPurpose::General => true,
        }
    }
}

/// Lifecycle state of a `Key` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyStatus {
    /// Usable for operational encrypt/sign/decrypt.
    Active,
    /// Inside its rotation window; still usable until replaced.
    PendingRotation,
    /// Terminal: replaced by a newer key via rotation.
    Expired,
    /// Terminal: forcibly revoked.
    Compromised,
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyStatus::Active => "active",
            KeyStatus::PendingRotation => "pending_rotation",
            KeyStatus::Expired => "expired",
            KeyStatus::Compromised => "compromised",
        };
        write!(f, "{s}")
    }
}

impl FromStr for KeyStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(KeyStatus::Active),
            "pending_rotation" => Ok(KeyStatus::PendingRotation),
            "expired" => Ok(KeyStatus::Expired),
            "compromised" => Ok(KeyStatus::Compromised),
            other => Err(CoreError::InvalidParameter(format!("unknown status: {other}"))),
        }
    }
}

impl KeyStatus {
    /// Terminal statuses never transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, KeyStatus::Expired | KeyStatus::Compromised)
    }

    /// Whether a status transition from `self` to `next` is permitted.
    ///
    /// `active -> pending_rotation -> expired`, and `active|pending_rotation
    /// -> compromised`. Terminal states accept no further transition
    /// (revoking an already-compromised key is handled as a no-op by the
    /// caller, not as a state transition here).
    pub fn can_transition_to(&self, next: KeyStatus) -> bool {
        use KeyStatus::*;
        matches!(
            (self, next),
            (Active, PendingRotation)
                | (PendingRotation, Expired)
                | (Active, Compromised)
                | (PendingRotation, Compromised)
        )
    }
}

/// The central entity: an asymmetric key pair and its lifecycle metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    /// Opaque 32-char lowercase-hex identifier, globally unique and immutable.
    pub key_id: String,
    /// Algorithm this key pair was generated under.
    pub algorithm: KeyAlgorithm,
    /// Purpose this key was issued for.
    pub purpose: KeyPurpose,
    /// Public key bytes, immutable for the key's life.
    pub public_key: Vec<u8>,
    /// Output of the Secret Protector for this key's private material.
    pub private_key_protected: Vec<u8>,
    /// Current lifecycle state.
    pub status: KeyStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// `created_at + rotation_interval`, set once at insert.
    pub expires_at: DateTime<Utc>,
    /// Timestamp of the most recent rotation that produced this key, if any.
    pub last_rotated_at: Option<DateTime<Utc>>,
    /// Number of times this key's lineage has been rotated.
    pub rotation_count: u32,
    /// Small key-value map: backend hints, purpose echo, etc.
    pub metadata: BTreeMap<String, String>,
}

/// A single cryptographic or lifecycle operation against a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageOperation {
    /// Key generation.
    Generate,
    /// Encryption.
    Encrypt,
    /// Decryption.
    Decrypt,
    /// Signing.
    Sign,
    /// Signature verification.
    Verify,
    /// Rotation.
    Rotate,
    /// Revocation.
    Revoke,
    /// The caller's cancellation token fired mid-operation.
    Cancelled,
}

impl fmt::Display for UsageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UsageOperation::Generate => "generate",
            UsageOperation::Encrypt => "encrypt",
            UsageOperation::Decrypt => "decrypt",
            UsageOperation::Sign => "sign",
            UsageOperation::Verify => "verify",
            UsageOperation::Rotate => "rotate",
            UsageOperation::Revoke => "revoke",
            UsageOperation::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a `UsageLogEntry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed.
    Failure,
}

impl fmt::Display for UsageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageOutcome::Success => write!(f, "success"),
            UsageOutcome::Failure => write!(f, "failure"),
        }
    }
}

/// A write-once per-key forensic trail entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageLogEntry {
    /// Key this entry concerns.
    pub key_id: String,
    /// Which operation was attempted.
    pub operation: UsageOperation,
    /// Whether it succeeded.
    pub outcome: UsageOutcome,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// Free-form detail, e.g. an error class. Never private-key material.
    pub details: String,
}

/// Links a replaced key to its replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationHistoryEntry {
    /// The key that was replaced (now `expired`).
    pub old_key_id: String,
    /// The key that replaced it (now `active`).
    pub new_key_id: String,
    /// Why the rotation happened, e.g. `"scheduled_rotation"`, `"admin"`.
    pub reason: String,
    /// Who/what initiated it.
    pub initiated_by: String,
    /// When the rotation completed.
    pub rotated_at: DateTime<Utc>,
}

/// Metrics/forensics record for a single operation invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Unique id for this invocation.
    pub operation_id: String,
    /// Key involved, if any (`encrypt` against a raw public key has none).
    pub key_id: Option<String>,
    /// Algorithm involved, if any.
    pub algorithm: Option<KeyAlgorithm>,
    /// Size of the input/output payload in bytes.
    pub data_size: usize,
    /// Wall-clock duration of the call.
    pub duration_ms: u64,
    /// Whether the call succeeded.
    pub success: bool,
    /// Stable error class (see `CoreError::class`), empty on success.
    pub error_class: String,
    /// When the call happened.
    pub timestamp: DateTime<Utc>,
}

/// Severity of a `SecurityEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SecuritySeverity {
    /// Informational.
    Low,
    /// Notable but not urgent.
    Medium,
    /// Requires attention.
    High,
    /// Requires immediate attention.
    Critical,
}

impl fmt::Display for SecuritySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SecuritySeverity::Low => "low",
            SecuritySeverity::Medium => "medium",
            SecuritySeverity::High => "high",
            SecuritySeverity::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// Append-only security-relevant event, retained at least 90 days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Unique event id.
    pub event_id: String,
    /// Event type, e.g. `"key_revoked"`, `"system_initialized"`.
    pub event_type: String,
    /// Severity.
    pub severity: SecuritySeverity,
    /// Human-readable description.
    pub description: String,
    /// Key this event concerns, if any.
    pub key_id: Option<String>,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Additional structured context.
    pub extra: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_round_trips_through_display_and_parse() {
        for alg in [KeyAlgorithm::Kyber1024, KeyAlgorithm::Dilithium5] {
            let parsed: KeyAlgorithm = alg.to_string().parse().unwrap();
            assert_eq!(parsed, alg);
        }
    }

    #[test]
    fn purpose_gates_algorithm_family() {
        assert!(KeyPurpose::Encryption.accepts(KeyAlgorithm::Kyber1024));
        assert!(!KeyPurpose::Encryption.accepts(KeyAlgorithm::Dilithium5));
        assert!(KeyPurpose::Signature.accepts(KeyAlgorithm::Dilithium5));
        assert!(!KeyPurpose::Signature.accepts(KeyAlgorithm::Kyber1024));
    }

    #[test]
    fn status_transitions_follow_the_state_machine() {
        assert!(KeyStatus::Active.can_transition_to(KeyStatus::PendingRotation));
        assert!(KeyStatus::PendingRotation.can_transition_to(KeyStatus::Expired));
        assert!(KeyStatus::Active.can_transition_to(KeyStatus::Compromised));
        assert!(!KeyStatus::Expired.can_transition_to(KeyStatus::Active));
        assert!(!KeyStatus::Compromised.can_transition_to(KeyStatus::Active));
        assert!(KeyStatus::Expired.is_terminal());
        assert!(KeyStatus::Compromised.is_terminal());
    }
}
