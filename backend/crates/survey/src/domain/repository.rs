//! Repository Traits
//!
//! Interfaces for persistence. Implementations live in the infra layer.

use crate::domain::entities::StoredSurveyRecord;
use crate::error::SurveyResult;

/// Append-only survey log
///
/// Implementations must keep each record whole when called concurrently.
#[trait_variant::make(SurveyLog: Send)]
pub trait LocalSurveyLog {
    /// Persist one record. Fails only on I/O-level problems.
    async fn append(&self, record: &StoredSurveyRecord) -> SurveyResult<()>;
}
