//! # REST Routes

use crate::api::rest::handlers::{
    AppState, calculate_all, calculate_one, health, list_offerings, list_providers,
    normalize_bank, normalize_offerings, refresh_offerings, translate,
};
use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the `/api/v1` router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/osago/providers", get(list_providers))
        .route("/osago/calculate", post(calculate_all))
        .route("/osago/{provider}/calculate", post(calculate_one))
        .route("/translate", post(translate))
        .route("/banks/normalize", post(normalize_bank))
        .route("/offerings/normalize", post(normalize_offerings))
        .route("/offerings/{category}", get(list_offerings))
        .route("/offerings/{category}/refresh", post(refresh_offerings));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
