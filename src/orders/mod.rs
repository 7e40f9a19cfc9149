pub mod handlers;

use crate::{auth::middleware::require_auth, state::AppState};
use axum::{middleware, Router};

/// Protected routes: every request passes through the bearer-token gate.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(handlers::orders_routes())
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_auth,
        ))
}
