//! Configuration for the key-lifecycle core.
//!
//! Options mirror the normative names from the external configuration
//! surface: `hsm_enabled`, `kms_enabled`, `key_rotation_interval`,
//! `encryption_algorithm`, `signature_algorithm`, `kdf_iterations`,
//! `kdf_output_bytes`, `database_path`, `hsm.*`, `kms.*`. Layered loading
//! (defaults → optional TOML file → `KEYCORE_`-prefixed environment
//! variables) follows the same builder idiom `synapsed-storage::config`
//! uses for its backend configs.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::model::KeyAlgorithm;

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_rotation_interval_secs() -> i64 {
    90 * 24 * 3600 // 90 days
}

fn default_kdf_iterations() -> u32 {
    32_768
}

fn default_kdf_output_bytes() -> usize {
    64
}

fn default_database_path() -> String {
    "keycore.sqlite3".to_string()
}

fn default_rotation_scan_interval_secs() -> u64 {
    3600 // hourly
}

fn default_rotation_lookahead_secs() -> i64 {
    7 * 24 * 3600 // 7 days
}

fn default_slow_operation_threshold_ms() -> u64 {
    5000
}

fn default_hsm_timeout_secs() -> u64 {
    30
}

/// HSM backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HsmConfig {
    /// Base URL of the HSM service.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer API key presented on every request.
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout, in seconds.
    #[serde(default = "default_hsm_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HsmConfig {
    fn default() -> Self {
        Self { endpoint: String::new(), api_key: String::new(), timeout_secs: default_hsm_timeout_secs() }
    }
}

/// KMS backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KmsConfig {
    /// Cloud project id the key ring lives under.
    #[serde(default)]
    pub project_id: String,
    /// Region/location of the key ring.
    #[serde(default)]
    pub location: String,
    /// Key ring name.
    #[serde(default)]
    pub key_ring: String,
    /// Master secret backing the locally-simulated envelope data key.
    #[serde(default)]
    pub master_secret: Option<String>,
}

impl Default for KmsConfig {
    fn default() -> Self {
        Self { project_id: String::new(), location: String::new(), key_ring: String::new(), master_secret: None }
    }
}

/// Full configuration surface for the Core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Selects the HSM backend for the Secret Protector.
    #[serde(default = "default_false")]
    pub hsm_enabled: bool,
    /// Selects the KMS backend for the Secret Protector.
    #[serde(default = "default_false")]
    pub kms_enabled: bool,
    /// Seconds until a freshly generated key expires.
    #[serde(default = "default_rotation_interval_secs")]
    pub key_rotation_interval_secs: i64,
    /// Default algorithm used for `purpose = encryption`.
    #[serde(default = "default_encryption_algorithm")]
    pub encryption_algorithm: KeyAlgorithm,
    /// Default algorithm used for `purpose = signature`.
    #[serde(default = "default_signature_algorithm")]
    pub signature_algorithm: KeyAlgorithm,
    /// scrypt effective iteration count (`N`), must be >= 32768.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
    /// scrypt derived output length in bytes, must be >= 64.
    #[serde(default = "default_kdf_output_bytes")]
    pub kdf_output_bytes: usize,
    /// Path to the on-disk sqlite store.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Process-wide master secret backing the Local-Derived backend.
    /// Its absence is a fatal initialization error when neither HSM nor
    /// KMS is enabled.
    #[serde(default)]
    pub master_secret: Option<String>,
    /// HSM backend settings, used when `hsm_enabled`.
    #[serde(default)]
    pub hsm: HsmConfig,
    /// KMS backend settings, used when `kms_enabled`.
    #[serde(default)]
    pub kms: KmsConfig,
    /// How often the Rotation Scheduler ticks, in seconds.
    #[serde(default = "default_rotation_scan_interval_secs")]
    pub rotation_scan_interval_secs: u64,
    /// How far ahead of `expires_at` a key becomes a rotation candidate.
    #[serde(default = "default_rotation_lookahead_secs")]
    pub rotation_lookahead_secs: i64,
    /// Operations slower than this emit a `WARN` log, in milliseconds.
    #[serde(default = "default_slow_operation_threshold_ms")]
    pub slow_operation_threshold_ms: u64,
    /// Error-rate threshold, in percent, above which health flips to `degraded`.
    #[serde(default = "default_error_rate_threshold")]
    pub error_rate_threshold_percent: f64,
}

fn default_encryption_algorithm() -> KeyAlgorithm {
    KeyAlgorithm::Kyber1024
}

fn default_signature_algorithm() -> KeyAlgorithm {
    KeyAlgorithm::Dilithium5
}

fn default_error_rate_threshold() -> f64 {
    5.0
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            hsm_enabled: false,
            kms_enabled: false,
            key_rotation_interval_secs: default_rotation_interval_secs(),
            encryption_algorithm: default_encryption_algorithm(),
            signature_algorithm: default_signature_algorithm(),
            kdf_iterations: default_kdf_iterations(),
            kdf_output_bytes: default_kdf_output_bytes(),
            database_path: default_database_path(),
            master_secret: None,
            hsm: HsmConfig::default(),
            kms: KmsConfig::default(),
            rotation_scan_interval_secs: default_rotation_scan_interval_secs(),
            rotation_lookahead_secs: default_rotation_lookahead_secs(),
            slow_operation_threshold_ms: default_slow_operation_threshold_ms(),
            error_rate_threshold_percent: default_error_rate_threshold(),
        }
    }
}

impl CoreConfig {
    /// Layered load: built-in defaults, then an optional TOML file at
    /// `path`, then `KEYCORE_`-prefixed environment variables
    /// (double-underscore separated for nested keys, e.g.
    /// `KEYCORE_HSM__ENDPOINT`). Validates before returning.
    #[cfg(feature = "file-config")]
    pub fn load(path: Option<&std::path::Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&CoreConfig::default()).map_err(|e| {
                CoreError::InvalidParameter(format!("failed to seed config defaults: {e}"))
            })?);
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("KEYCORE").separator("__").try_parsing(true),
        );
        let built = builder
            .build()
            .map_err(|e| CoreError::InvalidParameter(format!("failed to build config: {e}")))?;
        let config: CoreConfig = built
            .try_deserialize()
            .map_err(|e| CoreError::InvalidParameter(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings weak enough to undermine the backends before `initialize()` proceeds.
    pub fn validate(&self) -> Result<()> {
        if self.kdf_iterations < 32_768 {
            return Err(CoreError::InvalidParameter(format!(
                "kdf_iterations must be >= 32768, got {}",
                self.kdf_iterations
            )));
        }
        if self.kdf_output_bytes < 64 {
            return Err(CoreError::InvalidParameter(format!(
                "kdf_output_bytes must be >= 64, got {}",
                self.kdf_output_bytes
            )));
        }
        if self.key_rotation_interval_secs <= 0 {
            return Err(CoreError::InvalidParameter("key_rotation_interval must be positive".into()));
        }
        if !self.hsm_enabled && !self.kms_enabled && self.master_secret.is_none() {
            return Err(CoreError::InvalidParameter(
                "master_secret is required when neither hsm_enabled nor kms_enabled is set".into(),
            ));
        }
        Ok(())
    }

    /// The process-wide master secret, resolved from `master_secret` or,
    /// failing that, `kms.master_secret` (the KMS backend's simulated
    /// envelope data key is derived from the same value).
    pub fn resolved_master_secret(&self) -> Option<&str> {
        self.master_secret.as_deref().or(self.kms.master_secret.as_deref())
    }
}
