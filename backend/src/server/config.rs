//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use gitdoc::outbound::persistence::MongoConfig;

/// Storage backend the server runs against.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Process-local in-memory store.
    Memory,
    /// MongoDB collection described by the wrapped configuration.
    MongoDb(MongoConfig),
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: StorageConfig,
}

impl ServerConfig {
    /// Construct a configuration listening on `bind_addr` with in-memory
    /// storage.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            storage: StorageConfig::Memory,
        }
    }

    /// Select the storage backend.
    #[must_use]
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
