use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::config::{DEFAULT_SESSION_TTL_SECONDS, MAX_SESSION_TTL_SECONDS};
use crate::error::SessionError;
use crate::metrics::{QUESTIONS_SHUFFLED_TOTAL, SESSIONS_ACTIVE, SESSIONS_TOTAL};
use crate::models::Question;
use crate::services::question_bank::{QuestionBank, QuestionChooser};

/// Holds the question currently shown to one user.
pub struct QuestionSession {
    bank: Arc<QuestionBank>,
    chooser: Arc<dyn QuestionChooser>,
    current: Option<usize>,
}

impl QuestionSession {
    pub fn new(bank: Arc<QuestionBank>, chooser: Arc<dyn QuestionChooser>) -> Self {
        Self {
            bank,
            chooser,
            current: None,
        }
    }

    /// Picks a question if none is set yet. Idempotent.
    pub fn initialize(&mut self) {
        if self.current.is_none() {
            self.current = Some(self.bank.pick(self.chooser.as_ref()));
        }
    }

    /// Independent draw; may repeat the previous question.
    pub fn reselect(&mut self) {
        self.current = Some(self.bank.pick(self.chooser.as_ref()));
    }

    pub fn current(&self) -> Result<&Question, SessionError> {
        self.current
            .and_then(|index| self.bank.get(index))
            .ok_or(SessionError::Uninitialized)
    }
}

struct SessionEntry {
    session: QuestionSession,
    last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub question: Question,
    pub expires_at: DateTime<Utc>,
    pub created: bool,
}

/// Process-local map of live sessions keyed by the session cookie.
pub struct SessionStore {
    bank: Arc<QuestionBank>,
    chooser: Arc<dyn QuestionChooser>,
    ttl: Duration,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new(
        bank: Arc<QuestionBank>,
        chooser: Arc<dyn QuestionChooser>,
        ttl_seconds: i64,
    ) -> Self {
        let ttl = Duration::try_seconds(ttl_seconds.clamp(1, MAX_SESSION_TTL_SECONDS))
            .unwrap_or_else(|| Duration::seconds(DEFAULT_SESSION_TTL_SECONDS));
        Self {
            bank,
            chooser,
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Resolves `id` to a live session, creating and initializing one when the
    /// id is missing, unknown or expired.
    pub fn open(&self, id: Option<Uuid>) -> Result<SessionSnapshot, SessionError> {
        self.open_at(id, Utc::now())
    }

    pub fn open_at(
        &self,
        id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<SessionSnapshot, SessionError> {
        let mut sessions = self.lock();
        let (id, created) = self.resolve(&mut sessions, id, now);
        self.touch(&mut sessions, id, created, now, false)
    }

    /// Replaces the current question of the resolved session.
    pub fn reselect(&self, id: Option<Uuid>) -> Result<SessionSnapshot, SessionError> {
        self.reselect_at(id, Utc::now())
    }

    pub fn reselect_at(
        &self,
        id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<SessionSnapshot, SessionError> {
        let mut sessions = self.lock();
        let (id, created) = self.resolve(&mut sessions, id, now);
        let snapshot = self.touch(&mut sessions, id, created, now, true)?;
        QUESTIONS_SHUFFLED_TOTAL.inc();
        tracing::debug!("Question reselected for session {}", id);
        Ok(snapshot)
    }

    /// Drops sessions idle for longer than the TTL.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, entry| now - entry.last_seen <= ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            SESSIONS_TOTAL
                .with_label_values(&["expired"])
                .inc_by(removed as u64);
            SESSIONS_ACTIVE.sub(removed as i64);
            tracing::info!("Expired {} idle sessions", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn resolve(
        &self,
        sessions: &mut HashMap<Uuid, SessionEntry>,
        id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> (Uuid, bool) {
        if let Some(id) = id {
            match sessions.get(&id) {
                Some(entry) if now - entry.last_seen <= self.ttl => return (id, false),
                Some(_) => {
                    sessions.remove(&id);
                    SESSIONS_TOTAL.with_label_values(&["expired"]).inc();
                    SESSIONS_ACTIVE.dec();
                    tracing::debug!("Session {} expired, starting a new one", id);
                }
                None => {}
            }
        }

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            SessionEntry {
                session: QuestionSession::new(self.bank.clone(), self.chooser.clone()),
                last_seen: now,
            },
        );
        SESSIONS_TOTAL.with_label_values(&["created"]).inc();
        SESSIONS_ACTIVE.inc();
        tracing::info!("Session created: {}", id);
        (id, true)
    }

    fn touch(
        &self,
        sessions: &mut HashMap<Uuid, SessionEntry>,
        id: Uuid,
        created: bool,
        now: DateTime<Utc>,
        reselect: bool,
    ) -> Result<SessionSnapshot, SessionError> {
        let entry = sessions.get_mut(&id).ok_or(SessionError::Uninitialized)?;
        entry.session.initialize();
        if reselect {
            entry.session.reselect();
        }
        entry.last_seen = now;

        Ok(SessionSnapshot {
            id,
            question: entry.session.current()?.clone(),
            expires_at: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            created,
        })
    }
}
