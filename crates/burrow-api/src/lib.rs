pub mod auth;
pub mod error;
pub mod middleware;
pub mod posts;
pub mod users;
pub mod votes;

use axum::http::StatusCode;
use tracing::error;

use burrow_core::CoreError;

/// Run a core operation (argon2 work, SQLite access) off the async
/// runtime and map its failure to an HTTP status.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, StatusCode>
where
    F: FnOnce() -> Result<T, CoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("blocking task join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(error::to_status)
}
