use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};

use burrow_core::identity;

use crate::auth::AppState;
use crate::run_blocking;

/// Extract the bearer token, resolve it to a user, and stash the user as
/// a request extension for downstream handlers. Everything under this
/// layer runs with a verified identity, reads included.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    let user = run_blocking(move || identity::resolve(&state.db, &state.tokens, &token)).await?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
