//! Translation of driver errors into repository errors.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

use crate::domain::ports::DocumentRepositoryError;

/// Server error code for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Map a driver error to a connection or query failure.
///
/// Details stay in the logs; the returned messages are generic.
pub(super) fn map_mongo_error(error: &MongoError) -> DocumentRepositoryError {
    debug!(%error, "mongodb operation failed");

    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => {
            DocumentRepositoryError::connection("database connection error")
        }
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            DocumentRepositoryError::query("duplicate document id")
        }
        _ => DocumentRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn io_failures_map_to_connection_errors() {
        let error = MongoError::from(ErrorKind::Io(Arc::new(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "refused",
        ))));
        assert_eq!(
            map_mongo_error(&error),
            DocumentRepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    fn other_failures_map_to_query_errors() {
        let error = MongoError::custom("unexpected");
        assert_eq!(
            map_mongo_error(&error),
            DocumentRepositoryError::query("database error")
        );
    }
}
