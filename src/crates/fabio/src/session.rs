//! Per-user conversation history.
//!
//! History is linear and append-only within a session; a session whose
//! last activity is older than the configured TTL is evicted wholesale.
//! History only provides context continuation for the LLM paths, the
//! router's decision for each message depends on that message alone.

use chrono::{DateTime, Utc};
use llm::Message;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Who produced a stored turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

/// One stored conversation turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Storage for per-user conversation history.
pub trait SessionStore: Send + Sync {
    /// The session transcript as LLM messages, with the given system
    /// instruction prepended.
    fn history(&self, user_id: &str, system_instruction: &str) -> Vec<Message>;

    /// Append a turn to the user's session, refreshing its activity.
    fn append(&self, user_id: &str, role: TurnRole, text: &str);

    /// Drop sessions idle for longer than `ttl`.
    fn evict_idle(&self, ttl: Duration);
}

#[derive(Debug)]
struct Session {
    turns: Vec<Turn>,
    last_active: DateTime<Utc>,
}

/// In-process [`SessionStore`] keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions, for diagnostics and tests.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn history(&self, user_id: &str, system_instruction: &str) -> Vec<Message> {
        let sessions = self.sessions.lock();

        let mut messages = vec![Message::system(system_instruction)];
        if let Some(session) = sessions.get(user_id) {
            for turn in &session.turns {
                messages.push(match turn.role {
                    TurnRole::User => Message::user(turn.text.clone()),
                    TurnRole::Assistant => Message::assistant(turn.text.clone()),
                });
            }
        }
        messages
    }

    fn append(&self, user_id: &str, role: TurnRole, text: &str) {
        let now = Utc::now();
        let mut sessions = self.sessions.lock();

        let session = sessions.entry(user_id.to_string()).or_insert(Session {
            turns: Vec::new(),
            last_active: now,
        });
        session.turns.push(Turn {
            role,
            text: text.to_string(),
            timestamp: now,
        });
        session.last_active = now;
    }

    fn evict_idle(&self, ttl: Duration) {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::hours(24));
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, session| session.last_active >= cutoff);

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "evicted idle sessions");
        }
    }
}
