//! Application state: text generator, keyword list and in-memory sessions

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use clause_engine::{SessionState, TextGenerator};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ServerError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub keywords: Arc<Vec<String>>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, keywords: Vec<String>) -> Self {
        Self {
            generator,
            keywords: Arc::new(keywords),
            sessions: SessionStore::default(),
        }
    }
}

/// One session, locked for the whole duration of an action
pub type SessionHandle = Arc<Mutex<SessionState>>;

struct SessionEntry {
    session: SessionHandle,
    last_seen: Instant,
}

/// Sessions keyed by id. Actions on one session run one at a time; actions
/// on different sessions never wait for each other.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionStore {
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(
            id,
            SessionEntry {
                session: Arc::new(Mutex::new(SessionState::new())),
                last_seen: Instant::now(),
            },
        );
        info!(session = %id, "Session created");
        id
    }

    /// Look up a session and mark it as active
    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, ServerError> {
        let mut sessions = self.inner.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or(ServerError::SessionNotFound(id))?;
        entry.last_seen = Instant::now();
        Ok(entry.session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), ServerError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| info!(session = %id, "Session ended"))
            .ok_or(ServerError::SessionNotFound(id))
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    /// End every session idle for at least `ttl`. Sessions with an action in
    /// flight are kept.
    pub async fn sweep_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = entry.last_seen.elapsed() < ttl || Arc::strong_count(&entry.session) > 1;
            if !keep {
                debug!(session = %id, "Session expired");
            }
            keep
        });
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Expired {} idle sessions", removed);
        }
        removed
    }
}
