//! File-based Answer Cache
//!
//! Stores cached answers as JSON lines and profiles as JSON files on disk,
//! organized by session id. This is the degraded-mode fallback when the
//! durable store is unreachable, so writes here must stay simple and
//! dependency free.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::foundation::SessionId;
use crate::domain::profile::PsychologicalProfile;
use crate::domain::session::Answer;
use crate::ports::{AnswerCache, StorageError};

/// File-based cache for answers and profiles.
///
/// # Example
/// ```ignore
/// let cache = FileAnswerCache::new("./data/cache");
/// ```
#[derive(Debug, Clone)]
pub struct FileAnswerCache {
    base_path: PathBuf,
}

impl FileAnswerCache {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_dir(&self, session_id: &SessionId) -> PathBuf {
        self.base_path.join(session_id.to_string())
    }

    fn answers_file_path(&self, session_id: &SessionId) -> PathBuf {
        self.session_dir(session_id).join("answers.jsonl")
    }

    fn profile_file_path(&self, session_id: &SessionId) -> PathBuf {
        self.session_dir(session_id).join("profile.json")
    }

    async fn ensure_dir(&self, path: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }
}

#[async_trait]
impl AnswerCache for FileAnswerCache {
    async fn cache_answer(
        &self,
        session_id: &SessionId,
        answer: &Answer,
    ) -> Result<(), StorageError> {
        let dir = self.session_dir(session_id);
        self.ensure_dir(&dir).await?;

        let mut line = serde_json::to_string(answer)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        line.push('\n');

        // Append-only, one JSON object per line
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.answers_file_path(session_id))
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(())
    }

    async fn cache_profile(
        &self,
        session_id: &SessionId,
        profile: &PsychologicalProfile,
    ) -> Result<(), StorageError> {
        let dir = self.session_dir(session_id);
        self.ensure_dir(&dir).await?;

        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        fs::write(self.profile_file_path(session_id), json)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(())
    }

    async fn cached_answers(&self, session_id: &SessionId) -> Result<Vec<Answer>, StorageError> {
        let file_path = self.answers_file_path(session_id);

        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&file_path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .collect()
    }
}
