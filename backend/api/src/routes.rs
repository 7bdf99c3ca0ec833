use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{handlers, observability, session, state::AppState};

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(handlers::metrics_endpoint))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

/// Dashboard routes, all behind the session gate
pub fn school_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/schools",
            get(handlers::list_schools).post(handlers::create_school),
        )
        .route("/api/schools/stats", get(handlers::get_stats))
        .route("/api/schools/validate", post(handlers::validate_school_payload))
        .route(
            "/api/schools/validate/:field",
            post(handlers::validate_single_field),
        )
        .route(
            "/api/schools/:id",
            get(handlers::get_school).put(handlers::update_school),
        )
        .route_layer(middleware::from_fn_with_state(state, session::require_session))
}

/// Assemble the full application router
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(school_routes(state.clone()))
        .merge(health_routes())
        .merge(observability_routes())
        .fallback(handlers::route_not_found)
        .layer(middleware::from_fn(observability::request_logger))
        .layer(cors)
        .with_state(state)
}
