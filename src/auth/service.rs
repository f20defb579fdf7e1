use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::warn;
use uuid::Uuid;

use crate::auth::repo::{self, Credential};
use crate::error::ApiError;
use crate::state::AppState;

/// Salted argon2id digest in PHC string form. The sheet's `password` column
/// stores this string verbatim.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("argon2 hash: {e}"))?;
    Ok(hash.to_string())
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("malformed password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Create a credential. Blank input is rejected before any store I/O; the
/// existence check is a full scan and is not atomic with the append that
/// follows, so two concurrent registrations for the same name can both land.
pub async fn register(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<Credential, ApiError> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(ApiError::EmptyInput);
    }

    let existing = repo::find_by_username(state.sheets.as_ref(), username)
        .await
        .map_err(ApiError::StoreRead)?;
    if existing.is_some() {
        warn!(%username, "registration for existing SPOC name");
        return Err(ApiError::AlreadyExists);
    }

    let credential = Credential::new(username, hash_password(password)?);
    repo::append(state.sheets.as_ref(), &credential)
        .await
        .map_err(ApiError::StoreWrite)?;
    Ok(credential)
}

/// Check credentials and mint a session token. Unknown name and wrong
/// password collapse into the same `InvalidCredentials` so the response does
/// not reveal which names exist.
pub async fn login(state: &AppState, username: &str, password: &str) -> Result<Uuid, ApiError> {
    let username = username.trim();
    let credential = repo::find_by_username(state.sheets.as_ref(), username)
        .await
        .map_err(ApiError::StoreRead)?;

    let credential = match credential {
        Some(c) => c,
        None => {
            warn!(%username, "login for unknown SPOC name");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(password, &credential.password_hash)? {
        warn!(%username, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    Ok(state.sessions.create(username))
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse-battery-staple").unwrap();
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-input").unwrap();
        let b = hash_password("same-input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        // Legacy rows holding a bare sha256 digest are not valid PHC strings.
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
