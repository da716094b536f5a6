//! Domain primitives, ports, and services.
//!
//! Purpose: define the document entity and the storage contract independent
//! of transport and persistence technology. Inbound adapters map these types
//! to wire DTOs; outbound adapters map them to persistence records.
//!
//! Public surface:
//! - Document / DocumentId: the document aggregate and identifier rules.
//! - Error / ErrorCode: API error payload shared by inbound adapters.
//! - DocumentService: application service delegating to a repository port.
//! - TraceId: request-scoped correlation identifier.

pub mod document;
pub mod document_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::document::{Document, DocumentId, DocumentIdError};
pub use self::document_service::DocumentService;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
