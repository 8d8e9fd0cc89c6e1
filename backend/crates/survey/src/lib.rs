//! Survey Intake Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Submission entities, value objects, validation, redaction pipeline
//! - `application/` - Configuration and the submit use case
//! - `infra/` - Survey log implementations (JSON lines, in-memory)
//! - `presentation/` - HTTP handlers, extractors, router
//!
//! ## Privacy Model
//! - `email` and `age` are replaced by SHA-256 hex digests before anything is written
//! - The persisted `submission_id` is chosen by an explicit [`SubmissionIdPolicy`]
//! - Client-supplied identifiers are only honoured under `SubmissionIdPolicy::TrustClient`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{SubmissionIdPolicy, SurveyConfig};
pub use error::{SurveyError, SurveyResult};
pub use infra::{InMemorySurveyLog, JsonlSurveyLog};
pub use presentation::router::{survey_router, survey_router_generic};

#[cfg(test)]
mod tests;
