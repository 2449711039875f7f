use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::{sync::RwLock, time::Instant};
use uuid::Uuid;

use crate::{errors::AppResult, models::domain::quiz_session::QuizSession};

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Storage for in-flight quiz sessions, keyed by session id.
#[async_trait]
pub trait QuizSessionRepository: Send + Sync {
    async fn create(&self, session: &QuizSession) -> AppResult<Uuid>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<QuizSession>>;
    async fn update(&self, id: Uuid, session: &QuizSession) -> AppResult<bool>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

struct StoredSession {
    document: String,
    touched: Instant,
}

/// Keeps each session as its serialized JSON document, so every request
/// works on a fresh copy rebuilt from the stored fields.
///
/// Sessions idle for longer than `ttl` are dropped, and once `capacity`
/// sessions are stored the least recently touched one makes room for a new
/// one. Both are enforced when a session is created.
pub struct InMemoryQuizSessionRepository {
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for InMemoryQuizSessionRepository {
    fn default() -> Self {
        Self::with_limits(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl InMemoryQuizSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn evict(&self, sessions: &mut HashMap<Uuid, StoredSession>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, stored| now.duration_since(stored.touched) <= self.ttl);

        while sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, stored)| stored.touched)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        let evicted = before - sessions.len();
        if evicted > 0 {
            log::debug!("Evicted {} quiz sessions", evicted);
        }
    }
}

#[async_trait]
impl QuizSessionRepository for InMemoryQuizSessionRepository {
    async fn create(&self, session: &QuizSession) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let document = serde_json::to_string(session)?;
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        self.evict(&mut sessions, now);
        sessions.insert(
            id,
            StoredSession {
                document,
                touched: now,
            },
        );
        log::debug!("Stored new quiz session {}", id);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<QuizSession>> {
        let sessions = self.sessions.read().await;
        match sessions.get(&id) {
            Some(stored) if stored.touched.elapsed() <= self.ttl => {
                Ok(Some(serde_json::from_str(&stored.document)?))
            }
            _ => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, session: &QuizSession) -> AppResult<bool> {
        let document = serde_json::to_string(session)?;
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(stored) if stored.touched.elapsed() <= self.ttl => {
                stored.document = document;
                stored.touched = Instant::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }
}
