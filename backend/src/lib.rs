//! gitdoc backend library.
//!
//! Exposes the document domain, its storage adapters, and the HTTP inbound
//! adapter so the binary and integration tests can assemble the service.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
