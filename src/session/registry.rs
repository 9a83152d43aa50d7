//! Session registry
//!
//! The authoritative collection of active sessions, and the only shared
//! mutable state in the server. All access goes through the mutex here; the
//! order sessions joined in is the order they are stored and delivered in.

use tokio::sync::Mutex;

use crate::session::Session;

/// Registry of active sessions.
///
/// Usernames are not deduplicated: two sessions may register the same name
/// and both stay independently subscribed to every broadcast. `remove` takes
/// the first match only, which mirrors that permissiveness.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<Vec<Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a session unconditionally. No uniqueness check, no capacity
    /// bound; callers wanting either apply it themselves.
    pub async fn add(&self, session: Session) {
        self.sessions.lock().await.push(session);
    }

    /// Removes the first session registered under `username`, returning it
    /// if one was found.
    pub async fn remove(&self, username: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let index = sessions.iter().position(|s| s.username() == username)?;
        Some(sessions.remove(index))
    }

    /// Point-in-time copy of the registry, safe to iterate while other
    /// handlers keep mutating the registry itself.
    pub async fn snapshot(&self) -> Vec<Session> {
        self.sessions.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::tcp::OwnedWriteHalf;
    use tokio::net::{TcpListener, TcpStream};

    // Registry entries carry a real write half, so build one from a local
    // socket pair.
    async fn writer() -> OwnedWriteHalf {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (client, _) = tokio::join!(TcpStream::connect(addr), listener.accept());
        client.unwrap().into_split().1
    }

    async fn session(username: &str) -> Session {
        Session::new(username.to_string(), writer().await)
    }

    #[tokio::test]
    async fn add_appends_without_deduplicating() {
        let registry = SessionRegistry::new();
        registry.add(session("bob").await).await;
        registry.add(session("bob").await).await;
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn remove_takes_first_match_only() {
        let registry = SessionRegistry::new();
        registry.add(session("alice").await).await;
        registry.add(session("bob").await).await;
        registry.add(session("bob").await).await;

        assert!(registry.remove("bob").await.is_some());
        assert_eq!(registry.len().await, 2);
        assert!(registry.remove("bob").await.is_some());
        assert!(registry.remove("bob").await.is_none());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn remove_of_unknown_username_finds_nothing() {
        let registry = SessionRegistry::new();
        registry.add(session("alice").await).await;
        assert!(registry.remove("mallory").await.is_none());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn snapshot_is_isolated_from_later_mutation() {
        let registry = SessionRegistry::new();
        registry.add(session("alice").await).await;
        registry.add(session("bob").await).await;

        let snapshot = registry.snapshot().await;
        registry.remove("alice").await;

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].username(), "alice");
        assert_eq!(snapshot[1].username(), "bob");
        assert_eq!(registry.len().await, 1);
    }
}
