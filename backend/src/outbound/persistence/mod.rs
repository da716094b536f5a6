//! MongoDB persistence adapter.
//!
//! Provides the MongoDB-backed implementation of the document repository
//! port. Documents live in a single collection keyed by a backend-managed
//! `uuid` field rather than the native `_id`.
//!
//! # Architecture
//!
//! - **Thin adapter**: the repository only translates between the
//!   `DocumentRecord` DAO and the domain `Document`, assigns missing
//!   identifiers, and turns "zero records matched" into `NotFound`.
//! - **Internal records**: `DocumentRecord` never crosses the repository
//!   boundary.
//! - **Driver seam**: driver calls sit behind [`DocumentCollection`] so the
//!   repository logic is testable without a running server.
//! - **Bounded calls**: every operation runs under a fixed timeout; nothing is
//!   retried.
//!
//! # Example
//!
//! ```no_run
//! use gitdoc::outbound::persistence::{MongoConfig, connect_document_repository};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoConfig::new("mongodb://localhost:27017");
//! let repo = connect_document_repository(&config).await?;
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod client;
mod collection;
mod models;
mod mongo_document_repository;
mod mongo_error_mapping;

pub use client::{
    DEFAULT_COLLECTION, DEFAULT_DATABASE, MongoClientError, MongoConfig,
    connect_document_repository,
};
#[cfg(test)]
pub use collection::MockDocumentCollection;
pub use collection::{DocumentCollection, MongoDocumentCollection};
pub use models::DocumentRecord;
pub use mongo_document_repository::{
    MongoDocumentRepository, OPERATION_TIMEOUT, READINESS_TIMEOUT,
};
