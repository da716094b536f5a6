//! Transport representations of a document and their mappers.
//!
//! Request bodies decode leniently: absent strings become empty and absent
//! timestamps stay `None`, so field rules rather than the JSON decoder decide
//! what is acceptable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Document;

/// Document payload accepted by the create and update endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentRequestDto {
    /// Optional client-chosen identifier. Ignored on update.
    #[schema(example = "release-notes")]
    pub id: String,
    /// Human-readable name.
    #[schema(example = "Release notes")]
    pub name: String,
    /// Free-text content.
    pub content: String,
    /// Creation timestamp; defaults to the current time on create and to
    /// the stored value on update.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp; defaults to the current time.
    pub last_updated_at: Option<DateTime<Utc>>,
    /// Identifier of the last editor.
    pub last_updated_by: String,
}

impl DocumentRequestDto {
    /// Map the payload to the domain, filling absent timestamps with `now`.
    #[must_use]
    pub fn into_document(self, now: DateTime<Utc>) -> Document {
        Document {
            id: self.id,
            name: self.name,
            content: self.content,
            created_at: self.created_at.unwrap_or(now),
            last_updated_at: self.last_updated_at.unwrap_or(now),
            last_updated_by: self.last_updated_by,
        }
    }
}

/// Document representation returned by the read endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponseDto {
    /// Stable identifier.
    #[schema(example = "5f0c8a4e-2b1d-4c4e-9a57-3f0f7d7c1b21")]
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Free-text content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub last_updated_at: DateTime<Utc>,
    /// Identifier of the last editor.
    pub last_updated_by: String,
}

impl From<Document> for DocumentResponseDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            name: document.name,
            content: document.content,
            created_at: document.created_at,
            last_updated_at: document.last_updated_at,
            last_updated_by: document.last_updated_by,
        }
    }
}
