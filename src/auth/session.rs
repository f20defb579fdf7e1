use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// In-process map of opaque session token to SPOC name. One entry per logged
/// in client; entries die with the process, there is no persistence and no
/// timeout-based expiry.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh token for `username`.
    pub fn create(&self, username: &str) -> Uuid {
        let token = Uuid::new_v4();
        self.inner
            .write()
            .expect("session lock poisoned")
            .insert(token, username.to_string());
        token
    }

    pub fn username_for(&self, token: &Uuid) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .get(token)
            .cloned()
    }

    /// Drop the session. Returns false if the token was already gone.
    pub fn remove(&self, token: &Uuid) -> bool {
        self.inner
            .write()
            .expect("session lock poisoned")
            .remove(token)
            .is_some()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

/// Extracts the logged-in SPOC from `Authorization: Bearer <token>`. Rejects
/// with `Unauthenticated` when the header is missing, malformed, or the token
/// is not a live session.
#[derive(Debug)]
pub struct SessionUser {
    pub token: Uuid,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionStore::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .and_then(|t| Uuid::parse_str(t.trim()).ok())
            .ok_or(ApiError::Unauthenticated)?;

        let username = sessions
            .username_for(&token)
            .ok_or(ApiError::Unauthenticated)?;

        Ok(SessionUser { token, username })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_then_logout_lifecycle() {
        let sessions = SessionStore::new();
        let token = sessions.create("alice");
        assert_eq!(sessions.username_for(&token).as_deref(), Some("alice"));

        assert!(sessions.remove(&token));
        assert_eq!(sessions.username_for(&token), None);
        assert!(!sessions.remove(&token));
    }

    #[test]
    fn session_user_renders_in_handler_spans() {
        // Handlers record the extracted user in their tracing spans, which
        // formats it via Debug.
        let user = SessionUser {
            token: Uuid::nil(),
            username: "alice".into(),
        };
        let rendered = format!("{user:?}");
        assert!(rendered.contains("alice"));
    }

    #[test]
    fn tokens_are_per_client() {
        let sessions = SessionStore::new();
        let alice = sessions.create("alice");
        let bob = sessions.create("bob");
        assert_ne!(alice, bob);
        assert_eq!(sessions.username_for(&alice).as_deref(), Some("alice"));
        assert_eq!(sessions.username_for(&bob).as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn extractor_rejects_missing_and_stale_tokens() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let state = crate::state::AppState::fake();

        let (mut parts, _) = Request::builder().uri("/").body(()).unwrap().into_parts();
        assert!(SessionUser::from_request_parts(&mut parts, &state)
            .await
            .is_err());

        let stale = Uuid::new_v4();
        let (mut parts, _) = Request::builder()
            .uri("/")
            .header("authorization", format!("Bearer {stale}"))
            .body(())
            .unwrap()
            .into_parts();
        assert!(SessionUser::from_request_parts(&mut parts, &state)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn extractor_accepts_a_live_token() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let state = crate::state::AppState::fake();
        let token = state.sessions.create("alice");
        let (mut parts, _) = Request::builder()
            .uri("/")
            .header("authorization", format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts();
        let user = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .expect("live token should extract");
        assert_eq!(user.username, "alice");
        assert_eq!(user.token, token);
    }
}
