use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all registry endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/preview", get(handler::preview_handler))
        .route("/v1/generate", post(handler::generate_handler))
        .route("/v1/confirm", post(handler::confirm_handler))
        .route(
            "/v1/ids/:id",
            get(handler::lookup_handler).delete(handler::delete_handler),
        )
        .route("/v1/suspend", post(handler::suspend_handler))
        .route("/v1/resume", post(handler::resume_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
