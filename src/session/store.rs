//! In-memory session store for the chat UI.
//!
//! Sessions live behind an async mutex so a turn can hold its session across
//! the endpoint call; that lock is what keeps one turn in flight per session.
//! Sessions idle for longer than the store's TTL are evicted, either when a
//! new session is created or by the background sweeper.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ChatSession, SessionOptions};

/// Idle time after which a session is dropped (1 hour).
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<ChatSession>>;

#[derive(Debug)]
struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Entry>,
    options: SessionOptions,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl SessionStore {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            sessions: DashMap::new(),
            options,
            idle_ttl: DEFAULT_IDLE_TTL,
        }
    }

    pub fn with_idle_ttl(mut self, idle_ttl: Duration) -> Self {
        self.idle_ttl = idle_ttl;
        self
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    /// Look up `id`, or start a fresh session under a new id.
    ///
    /// Unknown ids are never adopted; the returned id is the one to hand back
    /// to the client. The flag is `true` when a session was created.
    pub fn get_or_create(&self, id: Option<&str>) -> (String, SessionHandle, bool) {
        if let Some(id) = id {
            if let Some(handle) = self.get(id) {
                return (id.to_string(), handle, false);
            }
        }
        self.evict_idle();
        let id = Uuid::new_v4().to_string();
        let handle = Arc::new(Mutex::new(ChatSession::new(id.clone(), self.options)));
        self.sessions.insert(
            id.clone(),
            Entry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(session = %id, "created chat session");
        (id, handle, true)
    }

    /// Look up `id` and mark it as seen.
    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.get_mut(id).map(|mut entry| {
            entry.last_seen = Instant::now();
            entry.handle.clone()
        })
    }

    /// End a session, dropping its history. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::debug!(session = %id, "ended chat session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than the TTL. Returns how many went.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now())
    }

    /// Eviction against an explicit clock. A session whose lock is held has
    /// a turn in flight and is always kept.
    pub fn evict_idle_at(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        let ttl = self.idle_ttl;
        self.sessions.retain(|_, entry| {
            entry.handle.try_lock().is_err()
                || now.saturating_duration_since(entry.last_seen) < ttl
        });
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::debug!(
                evicted,
                remaining = self.sessions.len(),
                "evicted idle chat sessions"
            );
        }
        evicted
    }

    /// Run [`evict_idle`](Self::evict_idle) every `every` until the store is
    /// dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match store.upgrade() {
                    Some(store) => {
                        store.evict_idle();
                    }
                    None => break,
                }
            }
        })
    }
}
