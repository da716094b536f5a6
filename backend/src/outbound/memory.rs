//! In-memory `DocumentRepository` implementation.
//!
//! Documents live in an ordered map keyed by identifier, guarded by an
//! `RwLock` so one instance can be shared across request handlers. The lock is
//! never held across an `.await`.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError, StorageHealth};
use crate::domain::{Document, DocumentId};

/// Process-local document store.
///
/// # Examples
/// ```
/// use gitdoc::domain::ports::DocumentRepository;
/// use gitdoc::outbound::memory::InMemoryDocumentRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryDocumentRepository::new();
/// assert!(repo.list().await.expect("list succeeds").is_empty());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<BTreeMap<String, Document>>,
}

impl InMemoryDocumentRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Document>>, DocumentRepositoryError> {
        self.documents.read().map_err(map_poison)
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Document>>, DocumentRepositoryError> {
        self.documents.write().map_err(map_poison)
    }
}

fn map_poison<T>(_: PoisonError<T>) -> DocumentRepositoryError {
    error!("in-memory document store lock poisoned");
    DocumentRepositoryError::query("document store lock poisoned")
}

fn validate_id(id: &str) -> Result<DocumentId, DocumentRepositoryError> {
    DocumentId::parse(id).map_err(|_| DocumentRepositoryError::invalid_id(id))
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn add(&self, document: Document) -> Result<Document, DocumentRepositoryError> {
        let id = if document.needs_id() {
            DocumentId::generate()
        } else {
            validate_id(&document.id)?
        };
        let stored = document.with_id(id.into_inner());

        let mut documents = self.write()?;
        if documents.contains_key(&stored.id) {
            return Err(DocumentRepositoryError::query(format!(
                "duplicate document id {}",
                stored.id
            )));
        }
        documents.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: &str) -> Result<Document, DocumentRepositoryError> {
        let id = validate_id(id)?;
        self.read()?
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| DocumentRepositoryError::not_found(id.as_str()))
    }

    async fn update(&self, id: &str, document: Document) -> Result<(), DocumentRepositoryError> {
        let id = validate_id(id)?;
        let mut documents = self.write()?;
        let Some(slot) = documents.get_mut(id.as_str()) else {
            return Err(DocumentRepositoryError::not_found(id.as_str()));
        };
        *slot = document.with_id(id.into_inner());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DocumentRepositoryError> {
        let id = validate_id(id)?;
        self.write()?
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| DocumentRepositoryError::not_found(id.as_str()))
    }
}

#[async_trait]
impl StorageHealth for InMemoryDocumentRepository {
    async fn is_ready(&self) -> bool {
        self.documents.read().is_ok()
    }
}
