//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the document service and an injected clock, and remain testable without
//! I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::DocumentService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Document use-cases.
    pub documents: DocumentService,
    /// Source of timestamps for fields a client leaves out.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from the document service and a clock.
    pub fn new(documents: DocumentService, clock: Arc<dyn Clock>) -> Self {
        Self { documents, clock }
    }
}
