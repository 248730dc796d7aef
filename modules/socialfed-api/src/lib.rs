//! HTTP surface of the federation layer: one GET endpoint per operation.

pub mod rest;

use std::sync::Arc;

use axum::{routing::get, Router};

use socialfed_query::Federation;

pub struct AppState {
    pub federation: Federation,
}

/// All routes, with CORS and request tracing applied.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health checks
        .route("/", get(|| async { "ok" }))
        .route("/health", get(rest::api_health))
        // Lookups
        .route("/api/queryLookUp1", get(rest::api_people_by_location))
        .route("/api/queryLookUp2", get(rest::api_people_by_comment_tag))
        .route("/api/queryLookUp3", get(rest::api_forums_by_post_language))
        // Analytics
        .route("/api/queryAnalitica1", get(rest::api_university_likes))
        .route("/api/queryAnalitica2", get(rest::api_moderator_acquaintance_age))
        .route("/api/queryAnalitica3", get(rest::api_tag_gender_dominance))
        .with_state(state)
        // The GUI is served from another origin
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Method + path only; query strings carry names
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
        )
}
