//! MCP session management.
//!
//! One session per connected client, identified by a server-issued UUID in
//! the `Mcp-Session-Id` header. Each session owns the API credential used
//! for its tool calls and a broadcast channel feeding its SSE stream.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// Events delivered to a session's SSE subscribers.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// A JSON-RPC message to push to the client.
    JsonRpc(String),
}

/// One client's conversation with the server.
#[derive(Debug)]
pub struct Session {
    /// Unique session identifier, generated by the server.
    pub id: String,
    /// When the session was created.
    pub created_at: Instant,
    /// API key used for this session's tool calls. May be absent until the
    /// client supplies one ("discovery mode").
    pub credential: Option<String>,
    /// Broadcast sender for SSE events.
    pub event_tx: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Create a new session with a fresh ID and an optional initial credential.
    pub fn new(credential: Option<String>) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Instant::now(),
            credential,
            event_tx,
        }
    }

    /// Subscribe to session events for SSE streaming.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }
}

/// Registry of open sessions.
///
/// The only shared mutable resource in the server. Lookups take the read
/// lock; credential updates and terminations take the write lock, so
/// operations on different session ids never corrupt each other.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a session after its initialize request has been handled
    /// successfully. Sessions that fail to start are never registered.
    pub async fn register(&self, session: Session) -> String {
        let id = session.id.clone();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id.clone(), session);
        info!("Registered MCP session: {}", id);
        id
    }

    /// Check if a session exists.
    pub async fn exists(&self, id: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions.contains_key(id)
    }

    /// Current credential for a session, or `None` if the session is
    /// unknown or has no credential yet.
    pub async fn credential(&self, id: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions.get(id).and_then(|s| s.credential.clone())
    }

    /// Store a freshly supplied credential for a session.
    ///
    /// Last supplied credential always wins; callers only invoke this when
    /// a request actually carried one, so absence never erases a stored key.
    pub async fn set_credential(&self, id: &str, credential: String) -> bool {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(id) {
            session.credential = Some(credential);
            debug!("Refreshed credential for MCP session {}", id);
            true
        } else {
            false
        }
    }

    /// Subscribe to a session's event stream.
    pub async fn subscribe(&self, id: &str) -> Option<broadcast::Receiver<SessionEvent>> {
        let sessions = self.sessions.read().await;
        sessions.get(id).map(|s| s.subscribe())
    }

    /// Terminate a session, removing it and discarding its credential.
    /// Removal is unconditional: a session with a dead event channel is
    /// still removed.
    pub async fn terminate(&self, id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.remove(id) {
            info!(
                "Terminated MCP session: {} (age: {}s)",
                id,
                session.created_at.elapsed().as_secs()
            );
            true
        } else {
            false
        }
    }

    /// Number of open sessions.
    pub async fn count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Close all sessions. Used on process shutdown: the id set is
    /// snapshotted first so terminating one entry cannot disturb
    /// iteration over the rest.
    pub async fn shutdown(&self) {
        let ids: Vec<String> = {
            let sessions = self.sessions.read().await;
            sessions.keys().cloned().collect()
        };
        for id in ids {
            if !self.terminate(&id).await {
                debug!("Session {} already closed during shutdown", id);
            }
        }
        info!("All MCP sessions closed");
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
