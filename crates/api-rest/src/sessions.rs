//! In-memory assessment sessions.
//!
//! Each session owns one [`ResultsMapping`]. Sessions live only as long as the process, and
//! ending a session drops its results.
//!
//! Clients that never call `DELETE /sessions/{id}` are cleaned up by [`SessionLimits`]: a session
//! untouched for `idle_timeout` is treated as ended, and once `max_sessions` are open the least
//! recently used one is evicted to make room.

use ccm_core::ResultsMapping;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Bounds on how long and how many sessions are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub idle_timeout: Duration,
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::minutes(30),
            max_sessions: 10_000,
        }
    }
}

impl SessionLimits {
    /// Builds limits from `CCM_SESSION_IDLE_MINUTES` and `CCM_MAX_SESSIONS` values.
    ///
    /// Absent or empty values keep the defaults.
    pub fn from_env_values(
        idle_minutes: Option<String>,
        max_sessions: Option<String>,
    ) -> Result<Self, std::num::ParseIntError> {
        let defaults = Self::default();
        let non_empty = |value: Option<String>| {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let idle_timeout = non_empty(idle_minutes)
            .map(|v| v.parse::<u32>().map(|m| Duration::minutes(i64::from(m))))
            .transpose()?
            .unwrap_or(defaults.idle_timeout);
        let max_sessions = non_empty(max_sessions)
            .map(|v| v.parse::<usize>())
            .transpose()?
            .unwrap_or(defaults.max_sessions);

        Ok(Self {
            idle_timeout,
            max_sessions,
        })
    }
}

#[derive(Debug)]
struct Session {
    results: ResultsMapping,
    last_seen: DateTime<Utc>,
}

/// Shared handle to all open sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            inner: Arc::default(),
            limits,
        }
    }

    /// Opens a new empty session, first dropping idle sessions and, at capacity, the least
    /// recently used one.
    pub fn create(&self) -> (Uuid, DateTime<Utc>) {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let mut sessions = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let before = sessions.len();
        sessions.retain(|_, session| !self.is_idle(session, now));
        if sessions.len() < before {
            tracing::info!(expired = before - sessions.len(), "idle sessions expired");
        }

        while !sessions.is_empty() && sessions.len() >= self.limits.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_seen)
                .map(|(id, _)| *id);
            let Some(oldest) = oldest else { break };
            sessions.remove(&oldest);
            tracing::warn!(session = %oldest, "session limit reached, evicted least recently used");
        }

        sessions.insert(
            id,
            Session {
                results: ResultsMapping::new(),
                last_seen: now,
            },
        );
        tracing::debug!(session = %id, "session opened");
        (id, now)
    }

    /// Ends a session. Returns `false` if it did not exist.
    pub fn end(&self, id: Uuid) -> bool {
        let removed = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            tracing::debug!(session = %id, "session ended");
        }
        removed
    }

    /// Runs `f` against the session's results, or returns `None` for an unknown or expired
    /// session.
    pub fn read<R>(&self, id: Uuid, f: impl FnOnce(&ResultsMapping) -> R) -> Option<R> {
        self.with_live_session(id, |session| f(&session.results))
    }

    pub fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut ResultsMapping) -> R) -> Option<R> {
        self.with_live_session(id, |session| f(&mut session.results))
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_idle(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now - session.last_seen > self.limits.idle_timeout
    }

    // Every access counts as activity, so reads take the write lock.
    fn with_live_session<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let now = Utc::now();
        let mut sessions = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let idle = self.is_idle(sessions.get(&id)?, now);
        if idle {
            sessions.remove(&id);
            tracing::debug!(session = %id, "session expired");
            return None;
        }
        let session = sessions.get_mut(&id)?;
        session.last_seen = now;
        Some(f(session))
    }
}
