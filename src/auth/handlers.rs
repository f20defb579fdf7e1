use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, MessageResponse, PublicUser, RegisterRequest,
            RegisterResponse,
        },
        service,
        session::SessionUser,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let credential = service::register(&state, &payload.username, &payload.password).await?;
    info!(username = %credential.username, "SPOC registered");
    Ok(Json(RegisterResponse {
        user: PublicUser {
            username: credential.username,
        },
        message: "Registration successful! Please login now.".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = service::login(&state, &payload.username, &payload.password).await?;
    info!(username = %payload.username.trim(), "SPOC logged in");
    Ok(Json(LoginResponse {
        session_token: token,
        user: PublicUser {
            username: payload.username.trim().to_string(),
        },
    }))
}

#[instrument(skip(state))]
pub async fn logout(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.sessions.remove(&user.token);
    info!(username = %user.username, "SPOC logged out");
    Ok(Json(MessageResponse {
        message: "Logged out successfully.".into(),
    }))
}

#[instrument(skip(_state))]
pub async fn get_me(
    State(_state): State<AppState>,
    user: SessionUser,
) -> Json<PublicUser> {
    Json(PublicUser {
        username: user.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn register_alice(state: &AppState) {
        register(
            State(state.clone()),
            Json(RegisterRequest {
                username: "alice".into(),
                password: "pw".into(),
            }),
        )
        .await
        .expect("register alice");
    }

    #[tokio::test]
    async fn register_then_login_roundtrip() {
        let state = AppState::fake();
        register_alice(&state).await;

        let Json(resp) = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "alice".into(),
                password: "pw".into(),
            }),
        )
        .await
        .expect("login alice");

        assert_eq!(resp.user.username, "alice");
        assert_eq!(
            state.sessions.username_for(&resp.session_token).as_deref(),
            Some("alice")
        );
    }

    #[tokio::test]
    async fn duplicate_register_conflicts() {
        let state = AppState::fake();
        register_alice(&state).await;

        let err = register(
            State(state.clone()),
            Json(RegisterRequest {
                username: "alice".into(),
                password: "other".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::AlreadyExists));
    }

    #[tokio::test]
    async fn login_trims_the_username() {
        let state = AppState::fake();
        register_alice(&state).await;

        let Json(resp) = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "  alice  ".into(),
                password: "pw".into(),
            }),
        )
        .await
        .expect("login with padded name");
        assert_eq!(resp.user.username, "alice");
    }

    #[tokio::test]
    async fn logout_drops_the_session() {
        let state = AppState::fake();
        let token = state.sessions.create("alice");

        logout(
            State(state.clone()),
            SessionUser {
                token,
                username: "alice".into(),
            },
        )
        .await
        .expect("logout");

        assert_eq!(state.sessions.username_for(&token), None);
    }
}
