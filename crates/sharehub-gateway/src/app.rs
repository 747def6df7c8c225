use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sharehub_services::Dispatcher;
use std::sync::Arc;

use crate::allow::AllowList;

/// Central shared state, passed as Arc<AppState> to all Axum handlers.
///
/// Read-only after startup; nothing here changes between requests.
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub allow: AllowList,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, allow: AllowList) -> Self {
        Self { dispatcher, allow }
    }
}

/// Assemble the full Axum router. The allow-list wraps every route,
/// including the 404/405 fallbacks.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(crate::http::share::share_handler))
        .route("/health", get(crate::http::health::health_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::allow::ip_filter,
        ))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
