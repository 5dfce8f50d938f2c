use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use burrow_core::{TokenService, identity};
use burrow_db::Database;
use burrow_types::api::{LoginRequest, TokenResponse};

use crate::run_blocking;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenService,
}

/// Exchange email + password for a bearer token. Failure is a bare 401
/// either way; the response never says whether the email or the password
/// was the wrong half.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let token = run_blocking(move || {
        identity::authenticate(&state.db, &state.tokens, &req.email, &req.password)
    })
    .await?;

    Ok(Json(TokenResponse::bearer(token)))
}
