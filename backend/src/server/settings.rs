//! Process settings loaded via OrthoConfig.
//!
//! Configuration files are overridden by `GITDOC_*` environment variables,
//! which CLI flags override in turn.

use std::io;
use std::net::SocketAddr;
use std::str::FromStr;

use gitdoc::outbound::persistence::{DEFAULT_COLLECTION, DEFAULT_DATABASE, MongoConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::config::StorageConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORAGE: &str = "memory";
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Process-local map; contents are lost on restart.
    Memory,
    /// MongoDB collection.
    MongoDb,
}

impl FromStr for StorageKind {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            other => Err(io::Error::other(format!(
                "unknown storage backend {other:?}; expected memory or mongodb"
            ))),
        }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_owned()
}

fn default_storage() -> String {
    DEFAULT_STORAGE.to_owned()
}

fn default_mongo_uri() -> String {
    DEFAULT_MONGO_URI.to_owned()
}

fn default_mongo_database() -> String {
    DEFAULT_DATABASE.to_owned()
}

fn default_mongo_collection() -> String {
    DEFAULT_COLLECTION.to_owned()
}

/// Configuration values for the gitdoc server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GITDOC")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = default_bind_addr())]
    pub bind_addr: String,
    /// Storage backend: `memory` or `mongodb`.
    #[ortho_config(default = default_storage())]
    pub storage: String,
    /// MongoDB connection string.
    #[ortho_config(default = default_mongo_uri())]
    pub mongo_uri: String,
    /// MongoDB database name.
    #[ortho_config(default = default_mongo_database())]
    pub mongo_database: String,
    /// MongoDB collection name.
    #[ortho_config(default = default_mongo_collection())]
    pub mongo_collection: String,
}

impl AppSettings {
    /// Parse the configured listen address.
    ///
    /// # Errors
    /// Returns an I/O error when the configured address does not parse.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_str();
        raw.parse()
            .map_err(|err| io::Error::other(format!("invalid bind address {raw:?}: {err}")))
    }

    /// Return the selected storage backend.
    ///
    /// # Errors
    /// Returns an I/O error for an unknown backend name.
    pub fn storage_kind(&self) -> io::Result<StorageKind> {
        self.storage.parse()
    }

    /// Return the MongoDB connection parameters.
    pub fn mongo_config(&self) -> MongoConfig {
        MongoConfig::new(self.mongo_uri.as_str())
            .with_database(self.mongo_database.as_str())
            .with_collection(self.mongo_collection.as_str())
    }

    /// Resolve the storage configuration for the server.
    ///
    /// # Errors
    /// Returns an I/O error for an unknown backend name.
    pub fn storage_config(&self) -> io::Result<StorageConfig> {
        Ok(match self.storage_kind()? {
            StorageKind::Memory => StorageConfig::Memory,
            StorageKind::MongoDb => StorageConfig::MongoDb(self.mongo_config()),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "GITDOC_BIND_ADDR",
        "GITDOC_STORAGE",
        "GITDOC_MONGO_URI",
        "GITDOC_MONGO_DATABASE",
        "GITDOC_MONGO_COLLECTION",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("gitdoc")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid literal")
        );
        assert_eq!(
            settings.storage_kind().expect("default backend"),
            StorageKind::Memory
        );
        let mongo = settings.mongo_config();
        assert_eq!(mongo.uri(), DEFAULT_MONGO_URI);
        assert_eq!(mongo.database(), DEFAULT_DATABASE);
        assert_eq!(mongo.collection(), DEFAULT_COLLECTION);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("GITDOC_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("GITDOC_STORAGE", Some("mongodb".to_owned())),
            ("GITDOC_MONGO_URI", Some("mongodb://db:27017".to_owned())),
            ("GITDOC_MONGO_DATABASE", Some("docs".to_owned())),
            ("GITDOC_MONGO_COLLECTION", Some("drafts".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("configured address").port(),
            9000
        );
        match settings.storage_config().expect("configured backend") {
            StorageConfig::MongoDb(mongo) => {
                assert_eq!(mongo.uri(), "mongodb://db:27017");
                assert_eq!(mongo.database(), "docs");
                assert_eq!(mongo.collection(), "drafts");
            }
            StorageConfig::Memory => panic!("expected mongodb storage"),
        }
    }

    #[rstest]
    #[case("memory", StorageKind::Memory)]
    #[case("MongoDB", StorageKind::MongoDb)]
    #[case(" mongo ", StorageKind::MongoDb)]
    fn storage_kind_parses_known_names(#[case] raw: &str, #[case] expected: StorageKind) {
        assert_eq!(raw.parse::<StorageKind>().expect("known backend"), expected);
    }

    #[rstest]
    fn unknown_storage_kind_is_rejected() {
        assert!("postgres".parse::<StorageKind>().is_err());
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));
        let settings = AppSettings {
            bind_addr: "not-an-address".to_owned(),
            ..load_from_empty_args()
        };

        assert!(settings.bind_addr().is_err());
    }
}
