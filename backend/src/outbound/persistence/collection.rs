//! Driver seam for the documents collection.
//!
//! [`DocumentCollection`] exposes exactly the single-document primitives the
//! repository needs. [`MongoDocumentCollection`] implements it with the
//! official driver; tests substitute a mock.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, to_document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::domain::ports::DocumentRepositoryError;

use super::models::{DocumentRecord, ID_FIELD};
use super::mongo_error_mapping::map_mongo_error;

/// Single-document operations against the documents collection.
///
/// Write operations return the number of records the filter matched so the
/// repository can distinguish a missing target from a storage failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Load every record.
    async fn find_all(&self) -> Result<Vec<DocumentRecord>, DocumentRepositoryError>;

    /// Insert one record.
    async fn insert_one(&self, record: DocumentRecord) -> Result<(), DocumentRepositoryError>;

    /// Load the record whose identifier equals `id`.
    async fn find_one(&self, id: &str)
    -> Result<Option<DocumentRecord>, DocumentRepositoryError>;

    /// Overwrite the fields of the record whose identifier equals `id`,
    /// without upserting. Returns the matched count.
    async fn update_one(
        &self,
        id: &str,
        record: DocumentRecord,
    ) -> Result<u64, DocumentRepositoryError>;

    /// Delete the record whose identifier equals `id`. Returns the deleted
    /// count.
    async fn delete_one(&self, id: &str) -> Result<u64, DocumentRepositoryError>;

    /// Round-trip a `ping` command to the server.
    async fn ping(&self) -> Result<(), DocumentRepositoryError>;
}

/// Driver-backed [`DocumentCollection`].
#[derive(Clone, Debug)]
pub struct MongoDocumentCollection {
    database: Database,
    collection: Collection<DocumentRecord>,
}

impl MongoDocumentCollection {
    /// Bind to collection `name` inside `database`.
    #[must_use]
    pub fn new(database: &Database, name: &str) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(name),
        }
    }

    /// Create the unique index on the identifier field if it is missing.
    ///
    /// # Errors
    /// Returns a repository error when the server rejects the index.
    pub async fn ensure_indexes(&self) -> Result<(), DocumentRepositoryError> {
        let index = IndexModel::builder()
            .keys(doc! { ID_FIELD: 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("uuid_unique".to_owned())
                    .build(),
            )
            .build();
        self.collection
            .create_index(index)
            .await
            .map(|_| ())
            .map_err(|err| map_mongo_error(&err))
    }
}

#[async_trait]
impl DocumentCollection for MongoDocumentCollection {
    async fn find_all(&self) -> Result<Vec<DocumentRecord>, DocumentRepositoryError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|err| map_mongo_error(&err))?;
        cursor.try_collect().await.map_err(|err| map_mongo_error(&err))
    }

    async fn insert_one(&self, record: DocumentRecord) -> Result<(), DocumentRepositoryError> {
        self.collection
            .insert_one(record)
            .await
            .map(|_| ())
            .map_err(|err| map_mongo_error(&err))
    }

    async fn find_one(
        &self,
        id: &str,
    ) -> Result<Option<DocumentRecord>, DocumentRepositoryError> {
        self.collection
            .find_one(doc! { ID_FIELD: id })
            .await
            .map_err(|err| map_mongo_error(&err))
    }

    async fn update_one(
        &self,
        id: &str,
        record: DocumentRecord,
    ) -> Result<u64, DocumentRepositoryError> {
        let fields = to_document(&record).map_err(|err| {
            DocumentRepositoryError::query(format!("encode document record: {err}"))
        })?;
        self.collection
            .update_one(doc! { ID_FIELD: id }, doc! { "$set": fields })
            .await
            .map(|result| result.matched_count)
            .map_err(|err| map_mongo_error(&err))
    }

    async fn delete_one(&self, id: &str) -> Result<u64, DocumentRepositoryError> {
        self.collection
            .delete_one(doc! { ID_FIELD: id })
            .await
            .map(|result| result.deleted_count)
            .map_err(|err| map_mongo_error(&err))
    }

    async fn ping(&self) -> Result<(), DocumentRepositoryError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| map_mongo_error(&err))
    }
}
