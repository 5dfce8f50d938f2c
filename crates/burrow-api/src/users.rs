use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use burrow_core::{CoreError, Store, identity, validate};
use burrow_types::api::RegisterRequest;

use crate::auth::AppState;
use crate::error::to_status;
use crate::run_blocking;

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    validate::email(&req.email).map_err(to_status)?;
    validate::password(&req.password).map_err(to_status)?;

    let user =
        run_blocking(move || identity::register(&state.db, &req.email, &req.password)).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let user = run_blocking(move || {
        state
            .db
            .find_user_by_id(id)?
            .ok_or(CoreError::NotFound("user"))
    })
    .await?;

    Ok(Json(user))
}
