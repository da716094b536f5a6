//! Connection setup for the MongoDB document store.
//!
//! Builds a driver client from a [`MongoConfig`], binds the documents
//! collection and makes sure its identifier index exists before the
//! repository is handed to the application.

use std::time::Duration;

use mongodb::Client;
use mongodb::options::ClientOptions;
use tokio::time::timeout;
use tracing::info;

use super::collection::MongoDocumentCollection;
use super::mongo_document_repository::{MongoDocumentRepository, OPERATION_TIMEOUT};

/// Default database name.
pub const DEFAULT_DATABASE: &str = "gitdoc";

/// Default collection name.
pub const DEFAULT_COLLECTION: &str = "documents";

const APP_NAME: &str = "gitdoc";

/// Errors raised while connecting to MongoDB.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MongoClientError {
    /// The connection string could not be parsed or resolved.
    #[error("invalid mongodb connection string: {message}")]
    InvalidUri {
        /// Driver description of the parse failure.
        message: String,
    },

    /// The client could not be constructed or the collection prepared.
    #[error("failed to initialise mongodb client: {message}")]
    Setup {
        /// Driver description of the setup failure.
        message: String,
    },
}

impl MongoClientError {
    /// Create an invalid URI error with the given message.
    pub fn invalid_uri(message: impl Into<String>) -> Self {
        Self::InvalidUri {
            message: message.into(),
        }
    }

    /// Create a setup error with the given message.
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup {
            message: message.into(),
        }
    }
}

/// Connection parameters for the MongoDB document store.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gitdoc::outbound::persistence::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017")
///     .with_database("docs")
///     .with_collection("drafts")
///     .with_operation_timeout(Duration::from_secs(5));
/// assert_eq!(config.database(), "docs");
/// ```
#[derive(Debug, Clone)]
pub struct MongoConfig {
    uri: String,
    database: String,
    collection: String,
    operation_timeout: Duration,
}

impl MongoConfig {
    /// Create a configuration for `uri`.
    ///
    /// Uses the defaults:
    /// - `database`: [`DEFAULT_DATABASE`]
    /// - `collection`: [`DEFAULT_COLLECTION`]
    /// - `operation_timeout`: [`OPERATION_TIMEOUT`]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_owned(),
            collection: DEFAULT_COLLECTION.to_owned(),
            operation_timeout: OPERATION_TIMEOUT,
        }
    }

    /// Set the database name.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the collection name.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the per-operation timeout.
    #[must_use]
    pub fn with_operation_timeout(mut self, limit: Duration) -> Self {
        self.operation_timeout = limit;
        self
    }

    /// Connection string.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database name.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Per-operation timeout.
    #[must_use]
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }
}

/// Connect to MongoDB and build a document repository.
///
/// The driver connects lazily, so an unreachable server surfaces as a timeout
/// while creating the identifier index rather than at client construction.
///
/// # Errors
///
/// Returns [`MongoClientError::InvalidUri`] for a malformed connection string
/// and [`MongoClientError::Setup`] when the client cannot be built or the
/// index cannot be created within the operation timeout.
pub async fn connect_document_repository(
    config: &MongoConfig,
) -> Result<MongoDocumentRepository, MongoClientError> {
    let mut options = ClientOptions::parse(config.uri())
        .await
        .map_err(|err| MongoClientError::invalid_uri(err.to_string()))?;
    options.app_name = Some(APP_NAME.to_owned());

    let client =
        Client::with_options(options).map_err(|err| MongoClientError::setup(err.to_string()))?;
    let database = client.database(config.database());
    let collection = MongoDocumentCollection::new(&database, config.collection());

    timeout(config.operation_timeout(), collection.ensure_indexes())
        .await
        .map_err(|_| {
            MongoClientError::setup(format!(
                "index creation timed out after {}ms",
                config.operation_timeout().as_millis()
            ))
        })?
        .map_err(|err| MongoClientError::setup(err.to_string()))?;

    info!(
        database = config.database(),
        collection = config.collection(),
        "connected to mongodb"
    );
    Ok(MongoDocumentRepository::new(collection).with_timeout(config.operation_timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn mongo_config_default_values() {
        let config = MongoConfig::new("mongodb://localhost:27017");

        assert_eq!(config.uri(), "mongodb://localhost:27017");
        assert_eq!(config.database(), DEFAULT_DATABASE);
        assert_eq!(config.collection(), DEFAULT_COLLECTION);
        assert_eq!(config.operation_timeout(), OPERATION_TIMEOUT);
    }

    #[rstest]
    fn mongo_config_builder_pattern() {
        let config = MongoConfig::new("mongodb://db:27017")
            .with_database("docs")
            .with_collection("drafts")
            .with_operation_timeout(Duration::from_secs(3));

        assert_eq!(config.database(), "docs");
        assert_eq!(config.collection(), "drafts");
        assert_eq!(config.operation_timeout(), Duration::from_secs(3));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_uri_is_rejected_before_connecting() {
        let config = MongoConfig::new("not-a-mongodb-uri");

        let error = connect_document_repository(&config)
            .await
            .expect_err("malformed uri");

        assert!(matches!(error, MongoClientError::InvalidUri { .. }));
    }

    #[rstest]
    fn client_error_display() {
        let invalid = MongoClientError::invalid_uri("missing scheme");
        let setup = MongoClientError::setup("index creation timed out");

        assert!(invalid.to_string().contains("missing scheme"));
        assert!(setup.to_string().contains("index creation timed out"));
    }
}
