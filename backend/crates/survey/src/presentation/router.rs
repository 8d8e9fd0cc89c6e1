//! Survey Router

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use platform::clock::{Clock, SystemClock};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::application::config::SurveyConfig;
use crate::domain::repository::SurveyLog;
use crate::infra::jsonl::JsonlSurveyLog;
use crate::presentation::handlers::{self, SurveyAppState};

/// Create the full router (`/ping` and `/v1/*`) backed by the JSON-lines log
pub fn survey_router(log: JsonlSurveyLog, config: SurveyConfig) -> Router {
    survey_router_generic(log, Arc::new(SystemClock), config)
}

/// Create the full router for any log implementation and clock
pub fn survey_router_generic<L>(log: L, clock: Arc<dyn Clock>, config: SurveyConfig) -> Router
where
    L: SurveyLog + Send + Sync + 'static,
{
    let state = SurveyAppState {
        log: Arc::new(log),
        clock,
        config: Arc::new(config),
    };

    let v1 = Router::new()
        .route("/survey", post(handlers::submit_survey::<L>))
        .layer(v1_cors());

    Router::new()
        .route("/ping", get(handlers::ping::<L>))
        .nest("/v1", v1)
        .with_state(state)
}

/// Cross-origin access from any origin for `/v1/*`
pub fn v1_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::any())
}
