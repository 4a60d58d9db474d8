//! Asset repositories: loading authored dialogue sets by NPC name
//!
//! These deal in authored assets only; gameplay save state is out of
//! scope. The filesystem implementation stores one `<npc>.json` per set;
//! the in-memory implementation backs tests and embedded hosts.

use crate::storage;
use crate::types::tree::DialogueSet;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// Errors from asset storage and retrieval.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("dialogue set not found: {npc}")]
    NotFound { npc: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("invalid dialogue data: {message}")]
    InvalidFormat { message: String },
}

impl RepositoryError {
    pub fn not_found(npc: impl Into<String>) -> Self {
        Self::NotFound { npc: npc.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}

/// Contract for dialogue-set storage, independent of the backing medium.
#[async_trait]
pub trait DialogueRepository: Send + Sync {
    /// Load the set authored for the named NPC.
    async fn load(&self, npc: &str) -> Result<DialogueSet, RepositoryError>;

    /// Persist a set under its NPC name.
    async fn save(&self, set: &DialogueSet) -> Result<(), RepositoryError>;

    /// Whether a set exists for the named NPC.
    async fn exists(&self, npc: &str) -> Result<bool, RepositoryError>;

    /// NPC names with an authored set available.
    async fn list(&self) -> Result<Vec<String>, RepositoryError>;
}

/// Filesystem-backed repository: one JSON file per NPC under a base
/// directory.
pub struct FileSystemDialogueRepository {
    base_path: PathBuf,
}

impl FileSystemDialogueRepository {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn set_path(&self, npc: &str) -> PathBuf {
        self.base_path.join(format!("{npc}.json"))
    }
}

#[async_trait]
impl DialogueRepository for FileSystemDialogueRepository {
    async fn load(&self, npc: &str) -> Result<DialogueSet, RepositoryError> {
        let path = self.set_path(npc);
        if !path.exists() {
            return Err(RepositoryError::not_found(npc));
        }

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            RepositoryError::io(format!("failed to read {}: {e}", path.display()))
        })?;

        storage::load(&bytes)
            .map_err(|e| RepositoryError::invalid(format!("{}: {e}", path.display())))
    }

    async fn save(&self, set: &DialogueSet) -> Result<(), RepositoryError> {
        let path = self.set_path(&set.npc);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::io(format!("failed to create {}: {e}", parent.display())))?;
        }

        let bytes = storage::save(set).map_err(|e| RepositoryError::invalid(e.to_string()))?;
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            RepositoryError::io(format!("failed to write {}: {e}", path.display()))
        })
    }

    async fn exists(&self, npc: &str) -> Result<bool, RepositoryError> {
        Ok(self.set_path(npc).exists())
    }

    async fn list(&self) -> Result<Vec<String>, RepositoryError> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.base_path).await.map_err(|e| {
            RepositoryError::io(format!(
                "failed to read directory {}: {e}",
                self.base_path.display()
            ))
        })?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepositoryError::io(format!("failed to read directory entry: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

/// In-memory repository for tests and embedded use.
#[derive(Default)]
pub struct InMemoryDialogueRepository {
    sets: HashMap<String, DialogueSet>,
}

impl InMemoryDialogueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_set(&mut self, set: DialogueSet) {
        self.sets.insert(set.npc.clone(), set);
    }
}

#[async_trait]
impl DialogueRepository for InMemoryDialogueRepository {
    async fn load(&self, npc: &str) -> Result<DialogueSet, RepositoryError> {
        self.sets
            .get(npc)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(npc))
    }

    async fn save(&self, _set: &DialogueSet) -> Result<(), RepositoryError> {
        Err(RepositoryError::io(
            "in-memory repository is read-only".to_string(),
        ))
    }

    async fn exists(&self, npc: &str) -> Result<bool, RepositoryError> {
        Ok(self.sets.contains_key(npc))
    }

    async fn list(&self) -> Result<Vec<String>, RepositoryError> {
        let mut names: Vec<String> = self.sets.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
