//! Document application service.
//!
//! The service owns one repository and forwards every call to it. It adds no
//! validation or translation: repository errors reach the caller unchanged so
//! the inbound adapter stays the only place that maps failures to statuses.

use std::sync::Arc;

use tracing::debug;

use crate::domain::Document;
use crate::domain::ports::{DocumentRepository, DocumentRepositoryError};

/// Application service exposing document use-cases to inbound adapters.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use gitdoc::domain::DocumentService;
/// use gitdoc::outbound::memory::InMemoryDocumentRepository;
///
/// let service = DocumentService::new(Arc::new(InMemoryDocumentRepository::new()));
/// let _copy = service.clone();
/// ```
#[derive(Clone)]
pub struct DocumentService {
    repository: Arc<dyn DocumentRepository>,
}

impl DocumentService {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// List every stored document.
    ///
    /// # Errors
    /// Propagates the repository error unchanged.
    pub async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        debug!("listing documents");
        self.repository.list().await
    }

    /// Add a new document, returning it with its identifier populated.
    ///
    /// # Errors
    /// Propagates the repository error unchanged.
    pub async fn add(&self, document: Document) -> Result<Document, DocumentRepositoryError> {
        debug!(id = %document.id, "adding document");
        self.repository.add(document).await
    }

    /// Fetch the document stored under `id`.
    ///
    /// # Errors
    /// Propagates the repository error unchanged.
    pub async fn get(&self, id: &str) -> Result<Document, DocumentRepositoryError> {
        debug!(%id, "fetching document");
        self.repository.get(id).await
    }

    /// Replace the document stored under `id`.
    ///
    /// # Errors
    /// Propagates the repository error unchanged.
    pub async fn update(&self, id: &str, document: Document) -> Result<(), DocumentRepositoryError> {
        debug!(%id, "updating document");
        self.repository.update(id, document).await
    }

    /// Delete the document stored under `id`.
    ///
    /// # Errors
    /// Propagates the repository error unchanged.
    pub async fn delete(&self, id: &str) -> Result<(), DocumentRepositoryError> {
        debug!(%id, "deleting document");
        self.repository.delete(id).await
    }
}

#[cfg(test)]
#[path = "document_service_tests.rs"]
mod tests;
