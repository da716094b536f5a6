//! Domain ports for the hexagonal boundary.
//!
//! Outbound adapters (in-memory map, MongoDB) implement these traits; the
//! application service and HTTP handlers only ever see the trait objects.

mod macros;
pub(crate) use macros::define_port_error;

mod document_repository;
mod storage_health;

#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use document_repository::{DocumentRepository, DocumentRepositoryError};
#[cfg(test)]
pub use storage_health::MockStorageHealth;
pub use storage_health::StorageHealth;
