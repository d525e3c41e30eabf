//! Web presentation layer: routes and HTML rendering.

pub mod handlers;
pub mod render;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::apa::StatsApi;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<StatsApi>,
}

impl AppState {
    pub fn new(api: StatsApi) -> Self {
        Self { api: Arc::new(api) }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/lookup", get(handlers::lookup))
        .route("/divisions/{division_id}", get(handlers::division))
        .route(
            "/divisions/{division_id}/weeks/{week}",
            get(handlers::division_week),
        )
        .route("/teams/{team_id}", get(handlers::team))
        .route("/players/{player_id}", get(handlers::player))
        .fallback(handlers::not_found)
        .with_state(state)
}
