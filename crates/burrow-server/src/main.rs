use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use burrow_api::auth::{self, AppState, AppStateInner};
use burrow_api::middleware::require_auth;
use burrow_api::{posts, users, votes};
use burrow_core::TokenService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "burrow=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret = match std::env::var("BURROW_JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            warn!("BURROW_JWT_SECRET not set, using development secret");
            "dev-secret-change-me".into()
        }
    };
    let ttl_minutes: i64 = std::env::var("BURROW_TOKEN_TTL_MIN")
        .unwrap_or_else(|_| "30".into())
        .parse()?;
    let db_path = std::env::var("BURROW_DB_PATH").unwrap_or_else(|_| "burrow.db".into());
    let host = std::env::var("BURROW_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("BURROW_PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()?;

    // Init database
    let db = burrow_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        tokens: TokenService::new(jwt_secret, ttl_minutes),
    });

    // Routes
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/users", post(users::create_user))
        .route("/users/{id}", get(users::get_user))
        .route("/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/vote", post(votes::cast_vote))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Burrow server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Comma-separated origin allowlist from the environment; wide open when
/// unset (development).
fn cors_layer() -> CorsLayer {
    match std::env::var("BURROW_ALLOWED_ORIGINS") {
        Ok(raw) => {
            let origins: Vec<axum::http::HeaderValue> =
                raw.split(',').filter_map(|o| o.trim().parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        Err(_) => CorsLayer::permissive(),
    }
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "burrow is running" }))
}
