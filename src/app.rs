use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::require_identity;
use crate::state::AppState;

/// Assembles every route with its middleware stack
pub fn build_app(state: AppState) -> Router {
    let config = state.config.clone();

    let response_level = if config.api.enable_request_logging { Level::INFO } else { Level::DEBUG };

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(response_level)))
                .layer(cors_layer(&config.security)),
        )
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(public::health))
        .route("/users", post(public::user_register))
        .route("/users/token", post(public::user_token))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Collection
        .route("/blogs", get(protected::blog_list).post(protected::blog_create))
        // Individual record
        .route(
            "/blogs/:id",
            get(protected::blog_retrieve)
                .put(protected::blog_update)
                .patch(protected::blog_partial_update)
                .delete(protected::blog_destroy),
        )
        .route("/users/me", get(protected::user_me))
        .route_layer(from_fn_with_state(state, require_identity))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Serves until ctrl-c
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    let app = build_app(state);

    tracing::info!("Blog API listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
