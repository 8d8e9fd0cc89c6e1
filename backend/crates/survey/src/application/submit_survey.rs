//! Submit Survey Use Case

use platform::clock::Clock;
use serde_json::Value;
use std::sync::Arc;

use crate::application::config::SurveyConfig;
use crate::domain::repository::SurveyLog;
use crate::domain::services::{RequestContext, process_submission};
use crate::domain::validation::validate_submission;
use crate::error::{SurveyError, SurveyResult};

/// Input DTO for submit survey
#[derive(Debug, Clone)]
pub struct SubmitSurveyInput {
    /// Parsed but unvalidated request body
    pub payload: Value,
    /// Best-effort client address
    pub ip: String,
}

/// Output DTO for submit survey
#[derive(Debug, Clone)]
pub struct SubmitSurveyOutput {
    pub submission_id: String,
}

/// Submit Survey Use Case
///
/// validate → redact → append. Nothing is persisted unless every step
/// succeeds.
pub struct SubmitSurveyUseCase<L>
where
    L: SurveyLog,
{
    log: Arc<L>,
    clock: Arc<dyn Clock>,
    config: Arc<SurveyConfig>,
}

impl<L> SubmitSurveyUseCase<L>
where
    L: SurveyLog,
{
    pub fn new(log: Arc<L>, clock: Arc<dyn Clock>, config: Arc<SurveyConfig>) -> Self {
        Self { log, clock, config }
    }

    pub async fn execute(&self, input: SubmitSurveyInput) -> SurveyResult<SubmitSurveyOutput> {
        let submission = validate_submission(&input.payload).map_err(SurveyError::Validation)?;

        let received_at = self.clock.now();
        let context = RequestContext {
            received_at,
            received_at_local: self.clock.to_local(received_at),
            ip: input.ip,
        };

        let record = process_submission(submission, context, self.config.submission_id_policy);
        self.log.append(&record).await?;

        tracing::info!(
            submission_id = %record.submission_id(),
            policy = %self.config.submission_id_policy,
            "Survey submission recorded"
        );

        Ok(SubmitSurveyOutput {
            submission_id: record.submission_id().to_string(),
        })
    }
}
