//! Login, logout and current session.

use api_types::user::{Login, LoginResponse, SessionView};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::{EngineError, Identity};

use crate::{
    ServerError,
    server::{ServerState, SessionToken},
};

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<Json<LoginResponse>, ServerError> {
    let Login { username, password } = payload;

    // Argon2 is slow: verify off the async workers and without holding the lock.
    let attempt = state.engine.read().await.login_attempt(&username);
    let verified = tokio::task::spawn_blocking(move || attempt.verify(&password))
        .await
        .map_err(|err| EngineError::Password(err.to_string()))?;

    let session = state
        .engine
        .write()
        .await
        .complete_login(&username, verified)?;

    Ok(Json(LoginResponse {
        token: session.token,
        username: session.identity.to_string(),
    }))
}

pub async fn logout(
    Extension(SessionToken(token)): Extension<SessionToken>,
    State(state): State<ServerState>,
) -> StatusCode {
    state.engine.write().await.logout(&token);
    StatusCode::NO_CONTENT
}

pub async fn session(Extension(identity): Extension<Identity>) -> Json<SessionView> {
    Json(SessionView {
        username: identity.to_string(),
    })
}
