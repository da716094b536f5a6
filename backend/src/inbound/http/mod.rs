//! HTTP inbound adapter exposing the document REST endpoints.

pub mod documents;
pub mod documents_dto;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
