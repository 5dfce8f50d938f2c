use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use burrow_core::store::PostFilter;
use burrow_core::{ledger, posts, validate};
use burrow_types::api::PostDraft;
use burrow_types::models::User;

use crate::auth::AppState;
use crate::error::to_status;
use crate::run_blocking;

const MAX_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct PostQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub search: String,
}

fn default_limit() -> u32 {
    10
}

pub async fn list_posts(
    State(state): State<AppState>,
    Extension(_user): Extension<User>,
    Query(query): Query<PostQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let filter = PostFilter {
        search: query.search,
        limit: query.limit.min(MAX_PAGE),
        offset: query.skip,
    };

    let rows = run_blocking(move || ledger::list_posts(&state.db, &filter)).await?;
    Ok(Json(rows))
}

pub async fn get_post(
    State(state): State<AppState>,
    Extension(_user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let row = run_blocking(move || ledger::post_with_votes(&state.db, id)).await?;
    Ok(Json(row))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(draft): Json<PostDraft>,
) -> Result<impl IntoResponse, StatusCode> {
    validate::post_draft(&draft).map_err(to_status)?;

    let post = run_blocking(move || posts::create_post(&state.db, &user, &draft)).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(draft): Json<PostDraft>,
) -> Result<impl IntoResponse, StatusCode> {
    validate::post_draft(&draft).map_err(to_status)?;

    let post = run_blocking(move || posts::update_post(&state.db, &user, id, &draft)).await?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    run_blocking(move || posts::delete_post(&state.db, &user, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
