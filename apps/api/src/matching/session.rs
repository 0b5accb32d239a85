//! In-memory match sessions. A session remembers the last match run in it so
//! the report can be produced on a later request.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::matching::ranking::MatchOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct MatchSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_match: Option<MatchOutcome>,
}

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<Uuid, MatchSession>,
    /// Creation order, oldest first.
    order: VecDeque<Uuid>,
}

/// Bounded session map. Creating a session beyond capacity evicts the oldest.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Inner>>,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            capacity: capacity.max(1),
        }
    }

    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        while inner.order.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.sessions.remove(&oldest);
                debug!(session_id = %oldest, "Evicted oldest session");
            }
        }

        inner.order.push_back(id);
        inner.sessions.insert(
            id,
            MatchSession {
                id,
                created_at: Utc::now(),
                last_match: None,
            },
        );
        id
    }

    pub fn get(&self, id: Uuid) -> Option<MatchSession> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.sessions.get(&id).cloned()
    }

    /// Replaces the session's last match. Returns `false` for unknown ids.
    pub fn record_match(&self, id: Uuid, outcome: MatchOutcome) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        match inner.sessions.get_mut(&id) {
            Some(session) => {
                session.last_match = Some(outcome);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::requirements::JobRequirement;
    use crate::matching::scoring::ScoreWeights;

    fn outcome(years: u32) -> MatchOutcome {
        MatchOutcome {
            requirement: JobRequirement {
                years_required: years,
                ..Default::default()
            },
            candidates: vec![],
            weights: ScoreWeights::default(),
            anonymized: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_session_has_no_match() {
        let store = SessionStore::new(4);
        let id = store.create();
        let session = store.get(id).unwrap();
        assert_eq!(session.id, id);
        assert!(session.last_match.is_none());
    }

    #[test]
    fn test_record_replaces_last_match() {
        let store = SessionStore::new(4);
        let id = store.create();
        assert!(store.record_match(id, outcome(1)));
        assert!(store.record_match(id, outcome(3)));
        let last = store.get(id).unwrap().last_match.unwrap();
        assert_eq!(last.requirement.years_required, 3);
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::new(4);
        assert!(store.get(Uuid::new_v4()).is_none());
        assert!(!store.record_match(Uuid::new_v4(), outcome(1)));
    }

    #[test]
    fn test_oldest_session_evicted_at_capacity() {
        let store = SessionStore::new(2);
        let first = store.create();
        let second = store.create();
        let third = store.create();

        assert_eq!(store.len(), 2);
        assert!(store.get(first).is_none());
        assert!(store.get(second).is_some());
        assert!(store.get(third).is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new(2);
        let handle = store.clone();
        let id = store.create();
        assert!(handle.get(id).is_some());
    }
}
