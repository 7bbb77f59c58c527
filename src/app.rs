use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{create_item, get_item, get_stats, healthcheck, list_items, route_not_found},
    state::AppState,
};

/// Wires the HTTP surface. CORS is restricted to the single configured
/// origin; everything unmatched falls through to a JSON 404.
pub fn build_router(state: AppState, allow_origin: HeaderValue) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/{id}", get(get_item))
        .route("/api/stats", get(get_stats))
        .fallback(route_not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(allow_origin)
                .allow_headers([header::CONTENT_TYPE])
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
