//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (SurveySubmission, StoredSurveyRecord)
//! - Domain value objects (Email, Age, SubmissionIdPolicy)
//! - Payload validation
//! - Domain services (identity & redaction pipeline)
//! - Repository traits (the append-only survey log)

pub mod entities;
pub mod repository;
pub mod services;
pub mod validation;
pub mod value_objects;
