use crate::domain::SessionUser;
use crate::ports::SessionProvider;
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

/// Session table keyed by opaque bearer token. Tokens are random v4
/// uuids handed to the browser as a cookie; sessions live until revoked
/// or the process exits.
pub struct MemorySessionProvider {
    sessions: DashMap<String, SessionUser>,
}

impl MemorySessionProvider {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for MemorySessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionProvider for MemorySessionProvider {
    async fn resolve_session(&self, token: &str) -> Option<SessionUser> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    async fn create_session(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), user);
        token
    }

    async fn revoke_session(&self, token: &str) {
        self.sessions.remove(token);
    }
}
