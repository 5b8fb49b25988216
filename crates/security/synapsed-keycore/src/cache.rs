//! Key Cache: an in-memory `DashMap` fronting the Key Store so hot-path
//! operations (`encrypt`/`decrypt`/`sign`/`verify`) avoid a round trip to
//! sqlite and a Secret Protector unwrap on every call. Private-key bytes
//! held in the cache are wrapped in `Zeroizing` so they are scrubbed when
//! an entry is evicted or the cache is dropped.

use dashmap::DashMap;
use zeroize::Zeroizing;

use crate::model::{Key, KeyAlgorithm, KeyPurpose, KeyStatus};

/// A cached key with its private material already unwrapped by the
/// Secret Protector.
#[derive(Clone)]
pub struct CachedKey {
    pub key_id: String,
    pub algorithm: KeyAlgorithm,
    pub purpose: KeyPurpose,
    pub status: KeyStatus,
    pub public_key: Vec<u8>,
    pub private_key: Zeroizing<Vec<u8>>,
}

impl CachedKey {
    pub fn from_key(key: &Key, private_key: Vec<u8>) -> Self {
        Self {
            key_id: key.key_id.clone(),
            algorithm: key.algorithm,
            purpose: key.purpose,
            status: key.status,
            public_key: key.public_key.clone(),
            private_key: Zeroizing::new(private_key),
        }
    }
}

/// Process-wide cache of unwrapped keys, keyed by `key_id`.
#[derive(Default)]
pub struct KeyCache {
    entries: DashMap<String, CachedKey>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self { entries: DashMap::new() }
    }

    pub fn get(&self, key_id: &str) -> Option<CachedKey> {
        self.entries.get(key_id).map(|entry| entry.clone())
    }

    pub fn insert(&self, key: CachedKey) {
        self.entries.insert(key.key_id.clone(), key);
    }

    /// Drop a single entry, e.g. after rotation or revocation.
    pub fn invalidate(&self, key_id: &str) {
        self.entries.remove(key_id);
    }

    /// Drop everything, e.g. on `shutdown()`.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample() -> Key {
        Key {
            key_id: "k1".into(),
            algorithm: KeyAlgorithm::Kyber1024,
            purpose: KeyPurpose::Encryption,
            public_key: vec![1, 2, 3],
            private_key_protected: vec![],
            status: KeyStatus::Active,
            created_at: chrono::Utc::now(),
            expires_at: chrono::Utc::now(),
            last_rotated_at: None,
            rotation_count: 0,
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn insert_then_get_round_trips() {
        let cache = KeyCache::new();
        cache.insert(CachedKey::from_key(&sample(), vec![9, 9, 9]));
        let cached = cache.get("k1").unwrap();
        assert_eq!(&*cached.private_key, &[9, 9, 9]);
    }

    #[test]
    fn invalidate_removes_the_entry() {
        let cache = KeyCache::new();
        cache.insert(CachedKey::from_key(&sample(), vec![1]));
        cache.invalidate("k1");
        assert!(cache.get("k1").is_none());
    }
}
