//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod config;
pub mod submit_survey;

pub use submit_survey::{SubmitSurveyInput, SubmitSurveyOutput, SubmitSurveyUseCase};
