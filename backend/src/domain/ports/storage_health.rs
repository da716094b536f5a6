//! Port reporting whether the storage backend can serve traffic.

use async_trait::async_trait;

/// Readiness check for the configured storage backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageHealth: Send + Sync {
    /// Return `true` when the backend is reachable.
    async fn is_ready(&self) -> bool;
}
