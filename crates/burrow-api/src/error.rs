use axum::http::StatusCode;
use tracing::error;

use burrow_core::CoreError;

/// Boundary translation of the core error taxonomy. The three token
/// failures never reach here individually — identity resolution already
/// folded them into `Unauthorized`.
pub fn to_status(err: CoreError) -> StatusCode {
    match err {
        CoreError::Unauthorized => StatusCode::UNAUTHORIZED,
        CoreError::Forbidden => StatusCode::FORBIDDEN,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Corrupt(msg) => {
            // Stored data is damaged; this needs an operator, not a retry.
            error!("data corruption: {}", msg);
            StatusCode::INTERNAL_SERVER_ERROR
        }
        CoreError::Storage(e) => {
            error!("storage failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::StoreError;

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(to_status(CoreError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(to_status(CoreError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(to_status(CoreError::NotFound("post")), StatusCode::NOT_FOUND);
        assert_eq!(to_status(CoreError::Conflict("vote")), StatusCode::CONFLICT);
        assert_eq!(
            to_status(CoreError::Validation("bad".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            to_status(CoreError::Corrupt("bad hash".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            to_status(CoreError::Storage(StoreError::Backend(
                anyhow::anyhow!("disk gone")
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
