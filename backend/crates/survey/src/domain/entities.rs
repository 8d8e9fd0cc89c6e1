//! Domain Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Age, Email};

/// A validated survey response, still holding the raw values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveySubmission {
    pub email: Email,
    pub age: Age,
    /// Client-supplied identifier; empty strings are already folded into `None`
    pub submission_id: Option<String>,
}

/// The record appended to the survey log
///
/// `email` and `age` hold SHA-256 hex digests. New records are built only by
/// [`crate::domain::services::process_submission`]; `Deserialize` exists for
/// reading the log back and trusts whatever the file contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSurveyRecord {
    email: String,
    age: String,
    submission_id: String,
    received_at: DateTime<Utc>,
    ip: String,
}

impl StoredSurveyRecord {
    pub(crate) fn new(
        email_digest: String,
        age_digest: String,
        submission_id: String,
        received_at: DateTime<Utc>,
        ip: String,
    ) -> Self {
        Self {
            email: email_digest,
            age: age_digest,
            submission_id,
            received_at,
            ip,
        }
    }

    /// SHA-256 hex of the normalized email
    pub fn email(&self) -> &str {
        &self.email
    }

    /// SHA-256 hex of the decimal age
    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }
}
