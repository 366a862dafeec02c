//! JSON-file conversation stores
//!
//! Layout under the data directory:
//!
//! ```text
//! <data_dir>/
//! ├── conversations/
//! │   └── <id>.json     full record
//! └── index.json        listing index
//! ```

use async_trait::async_trait;
use council_application::{ConversationIndex, ConversationRepository, StoreError};
use council_domain::{Conversation, ConversationMetadata};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Ids become file names, so only a conservative character set is accepted.
fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Serialize `value` next to `path` and rename it into place.
async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// One JSON file per conversation
pub struct FileConversationRepository {
    dir: PathBuf,
}

impl FileConversationRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join("conversations"),
        }
    }

    fn record_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        if !is_safe_id(id) {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

#[async_trait]
impl ConversationRepository for FileConversationRepository {
    async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        // An id that could never have been stored is simply unknown
        let Ok(path) = self.record_path(id) else {
            return Ok(None);
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let path = self.record_path(&conversation.id)?;
        write_json_atomic(&path, conversation).await?;
        debug!("Saved conversation {} to {}", conversation.id, path.display());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let Ok(path) = self.record_path(id) else {
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Listing index kept in a single JSON array
///
/// Read-modify-write is serialized within this process only; separate
/// processes sharing the file race with last-write-wins.
pub struct FileConversationIndex {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileConversationIndex {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join("index.json"),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<ConversationMetadata>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ConversationIndex for FileConversationIndex {
    async fn list(&self) -> Result<Vec<ConversationMetadata>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    async fn upsert(&self, entry: ConversationMetadata) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        write_json_atomic(&self.path, &entries).await
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(());
        }
        write_json_atomic(&self.path, &entries).await
    }
}
