//! Axum router configuration with middleware.
//!
//! JSON routes live under `/api/v1/`; rendered pages under `/sites/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/websites",
            get(handlers::website::list_websites)
                .post(handlers::website::save_website)
                .delete(handlers::website::clear_websites),
        )
        .route("/websites/import", post(handlers::website::import_website))
        .route("/websites/count", get(handlers::website::count_websites))
        .route(
            "/websites/{slug}",
            get(handlers::website::get_website).delete(handlers::website::delete_website),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/sites/{slug}", get(handlers::site::view_site))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
