//! Application Configuration
//!
//! Configuration for the survey application layer.

use std::env;
use std::path::PathBuf;

pub use crate::domain::value_objects::{SubmissionIdPolicy, UnknownPolicy};

/// Environment variable holding the survey log path
pub const ENV_LOG_PATH: &str = "SURVEY_LOG_PATH";
/// Environment variable selecting the [`SubmissionIdPolicy`]
pub const ENV_SUBMISSION_ID_POLICY: &str = "SUBMISSION_ID_POLICY";

/// Survey application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyConfig {
    /// JSON-lines file receiving one record per accepted submission
    pub log_path: PathBuf,
    /// How the persisted `submission_id` is chosen
    pub submission_id_policy: SubmissionIdPolicy,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("data/survey.ndjson"),
            submission_id_policy: SubmissionIdPolicy::Legacy,
        }
    }
}

impl SurveyConfig {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self, UnknownPolicy> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, falling back to [`Default`] per key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, UnknownPolicy>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_path = lookup(ENV_LOG_PATH)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);

        let submission_id_policy = match lookup(ENV_SUBMISSION_ID_POLICY) {
            Some(policy) if !policy.trim().is_empty() => policy.parse()?,
            _ => defaults.submission_id_policy,
        };

        Ok(Self {
            log_path,
            submission_id_policy,
        })
    }

    pub fn with_policy(self, submission_id_policy: SubmissionIdPolicy) -> Self {
        Self {
            submission_id_policy,
            ..self
        }
    }
}
