//! Domain Services
//!
//! The identity & redaction pipeline: pure functions from a validated
//! submission plus request context to the record that gets persisted.

use chrono::{DateTime, FixedOffset, Utc};
use platform::clock::hour_stamp;
use platform::crypto::sha256_hex;

use crate::domain::entities::{StoredSurveyRecord, SurveySubmission};
use crate::domain::value_objects::{Email, SubmissionIdPolicy};

/// Per-request facts the pipeline needs besides the submission
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Single clock reading taken when the request arrived
    pub received_at: DateTime<Utc>,
    /// `received_at` in the host's local time zone
    pub received_at_local: DateTime<FixedOffset>,
    /// Best-effort client address
    pub ip: String,
}

/// One-way digest used for every redacted field
pub fn redact(value: &str) -> String {
    sha256_hex(value)
}

/// `sha256(normalized email + UTC YYYYMMDDHH)`
///
/// Stable for the same address within one UTC hour.
pub fn candidate_submission_id(email: &Email, at: &DateTime<Utc>) -> String {
    sha256_hex(&format!("{}{}", email.as_str(), hour_stamp(at)))
}

/// `sha256(email digest + local YYYYMMDDHH)`
pub fn legacy_submission_id(email_digest: &str, at_local: &DateTime<FixedOffset>) -> String {
    sha256_hex(&format!("{}{}", email_digest, hour_stamp(at_local)))
}

/// Run the pipeline and build the record to persist
///
/// `email` and `age` are always replaced by their digests; `age` never feeds
/// the identifier.
pub fn process_submission(
    submission: SurveySubmission,
    context: RequestContext,
    policy: SubmissionIdPolicy,
) -> StoredSurveyRecord {
    let email_digest = redact(submission.email.as_str());
    let age_digest = redact(&submission.age.to_string());

    let submission_id = match policy {
        SubmissionIdPolicy::Legacy => {
            legacy_submission_id(&email_digest, &context.received_at_local)
        }
        SubmissionIdPolicy::TrustClient => submission
            .submission_id
            .unwrap_or_else(|| candidate_submission_id(&submission.email, &context.received_at)),
        SubmissionIdPolicy::AlwaysDerive => {
            candidate_submission_id(&submission.email, &context.received_at)
        }
    };

    StoredSurveyRecord::new(
        email_digest,
        age_digest,
        submission_id,
        context.received_at,
        context.ip,
    )
}
