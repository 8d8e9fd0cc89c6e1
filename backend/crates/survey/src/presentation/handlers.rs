//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::SecondsFormat;
use platform::clock::Clock;
use std::sync::Arc;

use crate::application::config::SurveyConfig;
use crate::application::{SubmitSurveyInput, SubmitSurveyUseCase};
use crate::domain::repository::SurveyLog;
use crate::error::SurveyResult;
use crate::presentation::dto::{PingResponse, SubmitResponse};
use crate::presentation::extract::{ClientIp, JsonPayload};

/// Shared state for survey handlers
pub struct SurveyAppState<L>
where
    L: SurveyLog + Send + Sync + 'static,
{
    pub log: Arc<L>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<SurveyConfig>,
}

// Manual impl: the log itself does not need to be `Clone`
impl<L> Clone for SurveyAppState<L>
where
    L: SurveyLog + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
        }
    }
}

/// GET /ping
pub async fn ping<L>(State(state): State<SurveyAppState<L>>) -> Json<PingResponse>
where
    L: SurveyLog + Send + Sync + 'static,
{
    Json(PingResponse {
        status: "ok",
        message: "API is alive",
        utc_time: state
            .clock
            .now()
            .to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}

/// POST /v1/survey
pub async fn submit_survey<L>(
    State(state): State<SurveyAppState<L>>,
    ClientIp(ip): ClientIp,
    JsonPayload(payload): JsonPayload,
) -> SurveyResult<impl IntoResponse>
where
    L: SurveyLog + Send + Sync + 'static,
{
    let use_case = SubmitSurveyUseCase::new(
        state.log.clone(),
        state.clock.clone(),
        state.config.clone(),
    );

    use_case.execute(SubmitSurveyInput { payload, ip }).await?;

    Ok((StatusCode::CREATED, Json(SubmitResponse { status: "ok" })))
}
