//! Session store
//!
//! Sessions live in process memory only. Each session sits behind its own
//! async mutex, held for a whole answer step, so concurrent steps on one
//! session serialize while different sessions never contend.

use crate::sequencer::Session;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// Shared, lockable session
pub type SessionHandle = Arc<Mutex<Session>>;

/// Keyed session storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session, replacing any with the same id
    async fn insert(&self, session: Session) -> SessionHandle;

    async fn get(&self, id: &str) -> Option<SessionHandle>;

    /// Returns whether a session was removed
    async fn remove(&self, id: &str) -> bool;

    async fn len(&self) -> usize;

    /// Drop sessions idle for longer than `ttl`. Sessions locked by an
    /// in-flight step are never evicted.
    async fn evict_idle(&self, ttl: chrono::Duration) -> usize;
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> SessionHandle {
        let id = session.id.clone();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        handle
    }

    async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn evict_idle(&self, ttl: chrono::Duration) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => !session.is_idle_for(ttl, now),
            Err(_) => true,
        });
        before - sessions.len()
    }
}

/// Settings for abandoned-session eviction
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Idle time after which a session is dropped; `None` disables eviction
    pub ttl: Option<Duration>,
    pub sweep_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Some(Duration::from_secs(3600)),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ttl = match std::env::var("OLIVE_SESSION_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.ttl,
        };
        // Sweep often enough relative to short TTLs
        let sweep_interval = ttl.map_or(defaults.sweep_interval, |t| {
            defaults.sweep_interval.min(t).max(Duration::from_secs(1))
        });
        Self {
            ttl,
            sweep_interval,
        }
    }
}

/// Periodically evict idle sessions. Returns `None` when eviction is disabled.
pub fn spawn_sweeper(
    store: Arc<dyn SessionStore>,
    config: &SessionConfig,
) -> Option<JoinHandle<()>> {
    let ttl = chrono::Duration::from_std(config.ttl?).ok()?;
    let interval = config.sweep_interval;
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let evicted = store.evict_idle(ttl).await;
            if evicted > 0 {
                tracing::info!(evicted, "Evicted idle sessions");
            }
        }
    }))
}
