use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for SPOC registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public part of a credential returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: PublicUser,
    pub message: String,
}

/// Returned after login; the token goes back in `Authorization: Bearer`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub session_token: Uuid,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
