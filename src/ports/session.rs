use crate::domain::SessionUser;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Identity provider surface: zero-or-one active session per token.
///
/// Returning `None` is the normal signed-out case; protected pages react
/// with a redirect, not an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn resolve_session(&self, token: &str) -> Option<SessionUser>;

    /// Start a session for the given identity and return its token.
    async fn create_session(&self, user: SessionUser) -> String;

    async fn revoke_session(&self, token: &str);
}
