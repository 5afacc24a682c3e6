// src/core/session.rs
//! Per-browser session state for the three-step flow

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::FlowError;
use crate::types::{ResumeRecord, TemplateSelector};

pub const RESUME_KEY: &str = "resume_data";
pub const TEMPLATE_KEY: &str = "resume_template";

/// Key/value state of one user session. Values are replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    values: HashMap<String, serde_json::Value>,
}

impl SessionState {
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Discarding undecodable session value {}: {}", key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), FlowError> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn record(&self) -> Option<ResumeRecord> {
        self.get(RESUME_KEY)
    }

    /// The record, or `StateMissing` when the details step was not completed
    pub fn require_record(&self) -> Result<ResumeRecord, FlowError> {
        self.record().ok_or(FlowError::StateMissing)
    }

    pub fn set_record(&mut self, record: &ResumeRecord) -> Result<(), FlowError> {
        self.set(RESUME_KEY, record)
    }

    pub fn template(&self) -> Option<TemplateSelector> {
        self.get(TEMPLATE_KEY)
    }

    pub fn set_template(&mut self, template: TemplateSelector) -> Result<(), FlowError> {
        self.set(TEMPLATE_KEY, &template)
    }
}

struct SessionEntry {
    state: SessionState,
    last_seen: DateTime<Utc>,
}

/// All live sessions, keyed by the id held in the session cookie
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Snapshot of the session. Unknown or expired ids start out empty.
    pub fn load(&self, session_id: &str) -> SessionState {
        self.load_at(session_id, Utc::now())
    }

    /// Replace the whole session state; the last writer wins
    pub fn save(&self, session_id: &str, state: SessionState) {
        self.save_at(session_id, state, Utc::now())
    }

    pub fn clear(&self, session_id: &str) {
        if self.lock().remove(session_id).is_some() {
            info!("Cleared session {}", session_id);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load_at(&self, session_id: &str, now: DateTime<Utc>) -> SessionState {
        let mut sessions = self.lock();
        self.purge_expired(&mut sessions, now);

        match sessions.get_mut(session_id) {
            Some(entry) => {
                entry.last_seen = now;
                entry.state.clone()
            }
            None => {
                debug!("Starting empty session {}", session_id);
                SessionState::default()
            }
        }
    }

    fn save_at(&self, session_id: &str, state: SessionState, now: DateTime<Utc>) {
        let mut sessions = self.lock();
        self.purge_expired(&mut sessions, now);
        sessions.insert(
            session_id.to_string(),
            SessionEntry {
                state,
                last_seen: now,
            },
        );
    }

    fn purge_expired(&self, sessions: &mut HashMap<String, SessionEntry>, now: DateTime<Utc>) {
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= self.ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            info!("Expired {} idle sessions", expired);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionEntry>> {
        // Poisoned state is plain data and stays usable
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::resume::sample_record;

    #[test]
    fn test_state_get_set() {
        let mut state = SessionState::default();
        assert!(state.is_empty());
        assert!(matches!(state.require_record(), Err(FlowError::StateMissing)));
        assert_eq!(state.template(), None);

        let record = sample_record();
        state.set_record(&record).unwrap();
        state.set_template(TemplateSelector::Modern).unwrap();

        assert_eq!(state.require_record().unwrap(), record);
        assert_eq!(state.template(), Some(TemplateSelector::Modern));
    }

    #[test]
    fn test_set_replaces_previous_record() {
        let mut state = SessionState::default();
        let mut record = sample_record();
        state.set_record(&record).unwrap();

        record.name = "Grace Hopper".to_string();
        state.set_record(&record).unwrap();
        assert_eq!(state.record().unwrap().name, "Grace Hopper");
    }

    #[test]
    fn test_store_roundtrip_and_isolation() {
        let store = SessionStore::new(Duration::minutes(30));
        let mut state = store.load("a");
        state.set_template(TemplateSelector::Modern).unwrap();
        store.save("a", state);

        assert_eq!(store.load("a").template(), Some(TemplateSelector::Modern));
        assert!(store.load("b").is_empty());
        assert_eq!(store.len(), 1);

        store.clear("a");
        assert!(store.is_empty());
    }

    #[test]
    fn test_idle_sessions_expire() {
        let store = SessionStore::new(Duration::minutes(30));
        let start = Utc::now();

        let mut state = SessionState::default();
        state.set_template(TemplateSelector::Modern).unwrap();
        store.save_at("a", state, start);

        let later = start + Duration::minutes(10);
        assert_eq!(store.load_at("a", later).template(), Some(TemplateSelector::Modern));

        let much_later = later + Duration::minutes(31);
        assert!(store.load_at("a", much_later).is_empty());
        assert!(store.is_empty());
    }
}
