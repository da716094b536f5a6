//! Port abstraction for document storage backends and their errors.

use async_trait::async_trait;

use crate::domain::Document;

use super::define_port_error;

define_port_error! {
    /// Errors raised by document repository adapters.
    ///
    /// `Connection` and `Query` both describe backend failures whose cause is
    /// logged by the adapter but never exposed to clients.
    pub enum DocumentRepositoryError {
        /// The supplied identifier is malformed.
        InvalidId {
            /// Identifier as received from the caller.
            id: String,
        } => "invalid document id: {id}",
        /// No document matches the identifier.
        NotFound {
            /// Identifier that matched nothing.
            id: String,
        } => "cannot find the document with the ID {id}",
        /// The backend could not be reached or timed out.
        Connection {
            /// Driver-level description of the failure.
            message: String,
        } => "document repository connection failed: {message}",
        /// The backend rejected or failed the operation.
        Query {
            /// Driver-level description of the failure.
            message: String,
        } => "document repository query failed: {message}",
    }
}

/// Storage contract every document backend satisfies.
///
/// Identifiers passed to `get`, `update` and `delete` are raw caller input;
/// backends validate them and report [`DocumentRepositoryError::InvalidId`]
/// for malformed values.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Return every stored document; empty when none exist.
    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError>;

    /// Persist a new document, assigning a fresh identifier when `id` is
    /// empty. Returns the stored document.
    async fn add(&self, document: Document) -> Result<Document, DocumentRepositoryError>;

    /// Fetch the document with the given identifier.
    async fn get(&self, id: &str) -> Result<Document, DocumentRepositoryError>;

    /// Replace the document stored under `id`; the stored id is kept.
    async fn update(&self, id: &str, document: Document) -> Result<(), DocumentRepositoryError>;

    /// Remove the document stored under `id`.
    async fn delete(&self, id: &str) -> Result<(), DocumentRepositoryError>;
}
