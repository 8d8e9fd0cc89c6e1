//! In-memory survey log

use tokio::sync::Mutex;

use crate::domain::entities::StoredSurveyRecord;
use crate::domain::repository::SurveyLog;
use crate::error::SurveyResult;

/// Keeps records in process memory; nothing survives a restart
#[derive(Default)]
pub struct InMemorySurveyLog {
    records: Mutex<Vec<StoredSurveyRecord>>,
}

impl InMemorySurveyLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far
    pub async fn records(&self) -> Vec<StoredSurveyRecord> {
        self.records.lock().await.clone()
    }
}

impl SurveyLog for InMemorySurveyLog {
    async fn append(&self, record: &StoredSurveyRecord) -> SurveyResult<()> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}
