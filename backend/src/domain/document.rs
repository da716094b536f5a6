//! Document aggregate and identifier rules.
//!
//! A [`Document`] is an independent aggregate root: it holds no references to
//! other entities. Its identifier is assigned once, either by the client or by
//! a storage backend at insertion time, and never changes afterwards.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Maximum length, in bytes, of a document identifier.
pub const DOCUMENT_ID_MAX_LEN: usize = 128;

/// Canonical in-memory representation of a document.
///
/// The struct carries no behaviour beyond data holding; storage backends and
/// transport mappers translate it to their own representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Unique identifier; empty until a backend assigns one.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Free-text content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update.
    pub last_updated_at: DateTime<Utc>,
    /// Identifier of the user who last updated the document.
    pub last_updated_by: String,
}

impl Document {
    /// Whether a storage backend still needs to assign an identifier.
    #[must_use]
    pub fn needs_id(&self) -> bool {
        self.id.is_empty()
    }

    /// Return the document with its identifier replaced.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Reasons an identifier fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentIdError {
    /// The identifier is empty.
    #[error("document id must not be empty")]
    Empty,
    /// The identifier exceeds [`DOCUMENT_ID_MAX_LEN`] bytes.
    #[error("document id must be at most {max} bytes")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The identifier contains a character outside `[A-Za-z0-9_-]`.
    #[error("document id contains invalid character {character:?}")]
    InvalidCharacter {
        /// First offending character.
        character: char,
    },
}

/// Validated document identifier.
///
/// # Examples
/// ```
/// use gitdoc::domain::DocumentId;
///
/// let id = DocumentId::parse("release-notes_2024").expect("valid id");
/// assert_eq!(id.as_str(), "release-notes_2024");
/// assert!(DocumentId::parse("no spaces").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Validate a caller-supplied identifier.
    ///
    /// # Errors
    /// Returns [`DocumentIdError`] when the value is empty, too long, or
    /// contains characters other than ASCII alphanumerics, `-` and `_`.
    pub fn parse(value: impl Into<String>) -> Result<Self, DocumentIdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DocumentIdError::Empty);
        }
        if value.len() > DOCUMENT_ID_MAX_LEN {
            return Err(DocumentIdError::TooLong {
                max: DOCUMENT_ID_MAX_LEN,
            });
        }
        if let Some(character) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(DocumentIdError::InvalidCharacter { character });
        }
        Ok(Self(value))
    }

    /// Generate a fresh random (version 4 UUID) identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the identifier, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
