//! Outbound adapters implementing domain ports for storage infrastructure.
//!
//! - **memory**: ordered in-process map, used for local runs and tests
//! - **persistence**: MongoDB-backed repository
//!
//! Adapters are thin translators between domain types and backend-specific
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
