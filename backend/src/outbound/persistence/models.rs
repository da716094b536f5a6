//! Persistence record for documents stored in MongoDB.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Document;

/// Name of the field holding the document identifier.
pub(crate) const ID_FIELD: &str = "uuid";

/// BSON shape of a stored document.
///
/// The identifier is stored under `uuid`, leaving `_id` to the driver. The
/// native `_id` is ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Backend-managed identifier.
    pub uuid: String,
    /// Document name.
    pub name: String,
    /// Document content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub last_updated_at: DateTime<Utc>,
    /// Identifier of the last updating user.
    pub last_updated_by: String,
}

impl From<Document> for DocumentRecord {
    fn from(document: Document) -> Self {
        let Document {
            id,
            name,
            content,
            created_at,
            last_updated_at,
            last_updated_by,
        } = document;
        Self {
            uuid: id,
            name,
            content,
            created_at,
            last_updated_at,
            last_updated_by,
        }
    }
}

impl From<DocumentRecord> for Document {
    fn from(record: DocumentRecord) -> Self {
        let DocumentRecord {
            uuid,
            name,
            content,
            created_at,
            last_updated_at,
            last_updated_by,
        } = record;
        Self {
            id: uuid,
            name,
            content,
            created_at,
            last_updated_at,
            last_updated_by,
        }
    }
}
