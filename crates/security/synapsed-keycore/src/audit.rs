//! Security audit trail: a bounded in-memory ring of recent
//! `SecurityEvent`s for fast introspection, backed by the durable
//! `security_events` table in the Key Store for anything older.

use std::collections::VecDeque;

use parking_lot::RwLock;

use crate::model::{SecurityEvent, SecuritySeverity};

const MAX_IN_MEMORY_EVENTS: usize = 1000;

/// In-memory tail of the security-event log.
pub struct AuditLog {
    events: RwLock<VecDeque<SecurityEvent>>,
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditLog {
    pub fn new() -> Self {
        Self { events: RwLock::new(VecDeque::with_capacity(MAX_IN_MEMORY_EVENTS)) }
    }

    /// Record `event`, evicting the oldest entry once the ring is full.
    pub fn record(&self, event: SecurityEvent) {
        let mut events = self.events.write();
        if events.len() >= MAX_IN_MEMORY_EVENTS {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// The `n` most recent events, newest first.
    pub fn recent(&self, n: usize) -> Vec<SecurityEvent> {
        let events = self.events.read();
        events.iter().rev().take(n).cloned().collect()
    }

    /// Count of currently-buffered events at or above `min_severity`.
    pub fn count_at_least(&self, min_severity: SecuritySeverity) -> usize {
        self.events.read().iter().filter(|e| e.severity >= min_severity).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn event(id: &str, severity: SecuritySeverity) -> SecurityEvent {
        SecurityEvent {
            event_id: id.into(),
            event_type: "test_event".into(),
            severity,
            description: "".into(),
            key_id: None,
            timestamp: chrono::Utc::now(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn evicts_oldest_once_full() {
        let log = AuditLog::new();
        for i in 0..(MAX_IN_MEMORY_EVENTS + 5) {
            log.record(event(&i.to_string(), SecuritySeverity::Low));
        }
        assert_eq!(log.recent(usize::MAX).len(), MAX_IN_MEMORY_EVENTS);
        assert!(log.recent(usize::MAX).iter().all(|e| e.event_id != "0"));
    }

    #[test]
    fn counts_only_events_at_or_above_the_threshold() {
        let log = AuditLog::new();
        log.record(event("a", SecuritySeverity::Low));
        log.record(event("b", SecuritySeverity::Critical));
        assert_eq!(log.count_at_least(SecuritySeverity::High), 1);
    }
}
