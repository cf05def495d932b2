use std::sync::RwLock;

/// Source of the bearer token attached to outgoing requests.
///
/// Asked once per request, so implementations may change their answer at any
/// time (login, logout, refresh).
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Never authenticates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// A token fixed at construction, e.g. a service API key.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// The signed-in user's token; empty until `set` is called.
#[derive(Debug, Default)]
pub struct SessionToken {
    token: RwLock<Option<String>>,
}

impl SessionToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

impl CredentialProvider for SessionToken {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_follows_set_and_clear() {
        let session = SessionToken::new();
        assert_eq!(session.bearer_token(), None);

        session.set("abc");
        assert_eq!(session.bearer_token().as_deref(), Some("abc"));

        session.set("def");
        assert_eq!(session.bearer_token().as_deref(), Some("def"));

        session.clear();
        assert_eq!(session.bearer_token(), None);
    }

    #[test]
    fn fixed_providers() {
        assert_eq!(NoCredentials.bearer_token(), None);
        assert_eq!(StaticToken::new("key").bearer_token().as_deref(), Some("key"));
    }
}
