//! JSON-lines file log

use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::entities::StoredSurveyRecord;
use crate::domain::repository::SurveyLog;
use crate::error::{SurveyError, SurveyResult};

/// Appends one JSON object per line to a file
///
/// The file handle is opened once and shared; the mutex keeps concurrent
/// appends from interleaving inside a line.
pub struct JsonlSurveyLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlSurveyLog {
    /// Open (creating parent directories and the file if needed) for appending
    pub async fn open(path: impl Into<PathBuf>) -> SurveyResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        tracing::info!(path = %path.display(), "Survey log opened");

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record back, in append order
    pub async fn read_all(&self) -> SurveyResult<Vec<StoredSurveyRecord>> {
        let contents = fs::read_to_string(&self.path).await?;
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str::<StoredSurveyRecord>(line).map_err(SurveyError::from))
            .collect()
    }
}

impl SurveyLog for JsonlSurveyLog {
    async fn append(&self, record: &StoredSurveyRecord) -> SurveyResult<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        let committed_len = file.metadata().await?.len();

        if let Err(e) = write_line(&mut file, &line).await {
            self.truncate_to(&file, committed_len).await;
            return Err(e.into());
        }

        tracing::debug!(
            path = %self.path.display(),
            bytes = line.len(),
            "Survey record appended"
        );

        Ok(())
    }
}

/// Write and persist one line. Any error leaves the tail undefined.
async fn write_line(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    file.write_all(line).await?;
    file.flush().await?;
    file.sync_data().await
}

impl JsonlSurveyLog {
    /// Cut the file back to `len`, the size after the last whole record
    async fn truncate_to(&self, file: &File, len: u64) {
        match file.set_len(len).await {
            Ok(()) => tracing::warn!(
                path = %self.path.display(),
                len,
                "Failed survey append rolled back"
            ),
            Err(e) => tracing::error!(
                path = %self.path.display(),
                len,
                error = %e,
                "Survey log rollback failed; the tail may hold a partial record"
            ),
        }
    }
}
