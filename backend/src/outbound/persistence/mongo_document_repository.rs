//! MongoDB-backed `DocumentRepository` implementation.
//!
//! Every call is bounded by [`OPERATION_TIMEOUT`]. Update and delete report
//! `NotFound` when their filter matched no record; a write that leaves the
//! stored fields unchanged still counts as a match.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError, StorageHealth};
use crate::domain::{Document, DocumentId};

use super::collection::{DocumentCollection, MongoDocumentCollection};
use super::models::DocumentRecord;

/// Upper bound for a single repository operation.
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound for the readiness ping.
pub const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// MongoDB implementation of the document repository port.
#[derive(Clone, Debug)]
pub struct MongoDocumentRepository<C = MongoDocumentCollection> {
    collection: C,
    timeout: Duration,
}

impl<C> MongoDocumentRepository<C> {
    /// Create a repository over `collection` using [`OPERATION_TIMEOUT`].
    pub fn new(collection: C) -> Self {
        Self {
            collection,
            timeout: OPERATION_TIMEOUT,
        }
    }

    /// Override the per-operation timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, DocumentRepositoryError>
where
    F: Future<Output = Result<T, DocumentRepositoryError>>,
{
    timeout(limit, fut).await.unwrap_or_else(|_| {
        Err(DocumentRepositoryError::connection(format!(
            "{operation} timed out after {}ms",
            limit.as_millis()
        )))
    })
}

fn validate_id(id: &str) -> Result<DocumentId, DocumentRepositoryError> {
    DocumentId::parse(id).map_err(|err| {
        warn!(%id, error = %err, "rejected malformed document id");
        DocumentRepositoryError::invalid_id(id)
    })
}

#[async_trait]
impl<C> DocumentRepository for MongoDocumentRepository<C>
where
    C: DocumentCollection,
{
    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let records = bounded(self.timeout, "list documents", self.collection.find_all())
            .await
            .inspect_err(|err| error!(error = %err, "error getting documents"))?;
        Ok(records.into_iter().map(Document::from).collect())
    }

    async fn add(&self, document: Document) -> Result<Document, DocumentRepositoryError> {
        let id = if document.needs_id() {
            DocumentId::generate()
        } else {
            validate_id(&document.id)?
        };
        let document = document.with_id(id.into_inner());

        bounded(
            self.timeout,
            "insert document",
            self.collection
                .insert_one(DocumentRecord::from(document.clone())),
        )
        .await
        .inspect_err(|err| error!(id = %document.id, error = %err, "cannot insert the document"))?;

        info!(id = %document.id, "document written");
        Ok(document)
    }

    async fn get(&self, id: &str) -> Result<Document, DocumentRepositoryError> {
        let id = validate_id(id)?;
        let record = bounded(
            self.timeout,
            "find document",
            self.collection.find_one(id.as_str()),
        )
        .await
        .inspect_err(|err| error!(%id, error = %err, "error getting document"))?;

        record
            .map(Document::from)
            .ok_or_else(|| DocumentRepositoryError::not_found(id.as_str()))
    }

    async fn update(&self, id: &str, document: Document) -> Result<(), DocumentRepositoryError> {
        let id = validate_id(id)?;
        let record = DocumentRecord::from(document.with_id(id.as_str()));
        let matched = bounded(
            self.timeout,
            "update document",
            self.collection.update_one(id.as_str(), record),
        )
        .await
        .inspect_err(|err| error!(%id, error = %err, "error updating the document"))?;

        if matched == 0 {
            warn!(%id, "update matched no document");
            return Err(DocumentRepositoryError::not_found(id.as_str()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DocumentRepositoryError> {
        let id = validate_id(id)?;
        let deleted = bounded(
            self.timeout,
            "delete document",
            self.collection.delete_one(id.as_str()),
        )
        .await
        .inspect_err(|err| error!(%id, error = %err, "error deleting the document"))?;

        if deleted == 0 {
            warn!(%id, "delete matched no document");
            return Err(DocumentRepositoryError::not_found(id.as_str()));
        }
        Ok(())
    }
}

#[async_trait]
impl<C> StorageHealth for MongoDocumentRepository<C>
where
    C: DocumentCollection,
{
    async fn is_ready(&self) -> bool {
        match bounded(READINESS_TIMEOUT, "ping", self.collection.ping()).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "mongodb readiness check failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "mongo_document_repository_tests.rs"]
mod tests;
