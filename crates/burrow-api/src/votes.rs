use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use burrow_core::ledger::{self, VoteOutcome};
use burrow_core::validate;
use burrow_types::api::VoteRequest;
use burrow_types::models::User;

use crate::auth::AppState;
use crate::error::to_status;
use crate::run_blocking;

/// Toggle endpoint: `dir = 1` casts the acting user's vote, `dir = 0`
/// retracts it. Duplicate casts 409, retracting a vote that is not there
/// 404, anything other than 0/1 422.
pub async fn cast_vote(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<VoteRequest>,
) -> Result<Response, StatusCode> {
    let direction = validate::vote_direction(req.dir).map_err(to_status)?;

    let outcome =
        run_blocking(move || ledger::cast_vote(&state.db, &user, req.post_id, direction)).await?;

    Ok(match outcome {
        VoteOutcome::Cast => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "message": "vote cast" })),
        )
            .into_response(),
        VoteOutcome::Retracted => StatusCode::NO_CONTENT.into_response(),
    })
}
