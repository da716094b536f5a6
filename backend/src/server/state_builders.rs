//! Builders turning the storage configuration into domain ports.

use std::io;
use std::sync::Arc;

use gitdoc::domain::ports::{DocumentRepository, StorageHealth};
use gitdoc::outbound::memory::InMemoryDocumentRepository;
use gitdoc::outbound::persistence::connect_document_repository;
use tracing::info;

use super::config::StorageConfig;

/// Repository and readiness check backed by the same store.
pub(crate) struct StoragePorts {
    pub(crate) repository: Arc<dyn DocumentRepository>,
    pub(crate) health: Arc<dyn StorageHealth>,
}

impl StoragePorts {
    fn from_backend<B>(backend: B) -> Self
    where
        B: DocumentRepository + StorageHealth + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            repository: backend.clone(),
            health: backend,
        }
    }
}

/// Build the storage ports selected by `storage`.
///
/// # Errors
/// Returns an I/O error when the MongoDB backend cannot be initialised.
pub(crate) async fn build_storage(storage: &StorageConfig) -> io::Result<StoragePorts> {
    match storage {
        StorageConfig::Memory => {
            info!(backend = "memory", "document storage selected");
            Ok(StoragePorts::from_backend(InMemoryDocumentRepository::new()))
        }
        StorageConfig::MongoDb(config) => {
            info!(
                backend = "mongodb",
                database = config.database(),
                collection = config.collection(),
                "document storage selected"
            );
            let repository = connect_document_repository(config)
                .await
                .map_err(|err| io::Error::other(format!("mongodb storage unavailable: {err}")))?;
            Ok(StoragePorts::from_backend(repository))
        }
    }
}
