use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::builtin;
use crate::error::Error;
use crate::types::Document;

// ── Storage interface ─────────────────────────────────────────────────────

/// Revision of the stored collection. A write must present the revision it
/// read; a mismatch is rejected with [`Error::Conflict`] instead of
/// silently dropping the other writer's update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Revision(pub u64);

/// A point-in-time view of the stored collection.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub documents: Vec<Document>,
    pub revision: Revision,
}

/// Whole-collection document storage. Every write replaces the full list;
/// ordering (most-recent-first) is owned by the caller. Implementations can
/// back this with anything that can read and replace a list atomically.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn read(&self) -> Result<Snapshot, Error>;

    async fn write(&self, documents: Vec<Document>, expected: Revision)
        -> Result<Revision, Error>;
}

// ── File backend ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    revision: u64,
    documents: Vec<Document>,
}

/// Flat-file JSON store: one `documents.json` under the data directory,
/// read fully and rewritten fully on every mutation. A missing file reads
/// as an empty collection. Writers go through an in-process mutex and the
/// persisted revision counter, so a stale read-modify-write is rejected
/// rather than overwriting someone else's append.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join("documents.json"),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<StoreFile, Error> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::Store(format!("corrupt store file {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(e) => Err(Error::store(e)),
        }
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn read(&self) -> Result<Snapshot, Error> {
        let file = self.load().await?;
        Ok(Snapshot {
            documents: file.documents,
            revision: Revision(file.revision),
        })
    }

    async fn write(
        &self,
        documents: Vec<Document>,
        expected: Revision,
    ) -> Result<Revision, Error> {
        let _guard = self.write_lock.lock().await;

        let current = self.load().await?;
        if current.revision != expected.0 {
            return Err(Error::Conflict);
        }

        let next = StoreFile {
            revision: expected.0 + 1,
            documents,
        };
        let json = serde_json::to_vec_pretty(&next).map_err(Error::store)?;

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(Error::store)?;
        }
        // Replace via temp file + rename; readers never see a partial file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await.map_err(Error::store)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(Error::store)?;

        debug!(
            revision = next.revision,
            count = next.documents.len(),
            "store written"
        );
        Ok(Revision(next.revision))
    }
}

// ── Store operations ──────────────────────────────────────────────────────

/// High-level operations over an injected [`DocumentStore`], shared by the
/// server actions.
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn DocumentStore>,
}

impl Store {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self { inner }
    }

    /// Stored documents only, most-recent-first.
    pub async fn read(&self) -> Result<Vec<Document>, Error> {
        Ok(self.inner.read().await?.documents)
    }

    /// Prepend a freshly analyzed document.
    pub async fn append(&self, document: Document) -> Result<(), Error> {
        let snapshot = self.inner.read().await?;
        let mut documents = snapshot.documents;
        documents.insert(0, document);
        self.inner.write(documents, snapshot.revision).await?;
        Ok(())
    }

    /// Remove one stored document. Built-in example ids are refused.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        if builtin::is_builtin(id) {
            return Err(Error::ProtectedRecord(id.to_string()));
        }

        let snapshot = self.inner.read().await?;
        let before = snapshot.documents.len();
        let documents: Vec<Document> = snapshot
            .documents
            .into_iter()
            .filter(|d| d.id != id)
            .collect();
        if documents.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }

        self.inner.write(documents, snapshot.revision).await?;
        info!(id, "document deleted");
        Ok(())
    }

    /// Merged listing: stored documents first in stored order, then the
    /// built-in examples whose ids are not shadowed by a stored document.
    pub async fn list_all(&self) -> Result<Vec<Document>, Error> {
        let mut documents = self.read().await?;
        let stored_ids: HashSet<String> = documents.iter().map(|d| d.id.clone()).collect();
        documents.extend(
            builtin::builtin_documents()
                .into_iter()
                .filter(|d| !stored_ids.contains(&d.id)),
        );
        Ok(documents)
    }

    /// Fetch one document from the merged view (built-ins are fetchable).
    pub async fn get(&self, id: &str) -> Result<Document, Error> {
        self.list_all()
            .await?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}
