//! Axum router wiring.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{api, app_state::AppState, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .route("/api/pages", get(api::pages::list).post(api::pages::create))
        .route("/api/pages/:id/hits", get(api::pages::hits))
        .route("/api/pages/:id/hit", post(api::pages::hit));

    if state.cfg().dashboard.enabled {
        router = router.route("/", get(ops::dashboard));
    }

    router
        .fallback(ops::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), obs::trace::track))
        .with_state(state)
}
