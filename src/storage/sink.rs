//! Storage sink contract.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error_handling::DatabaseError;

/// A single record as written to a sink: field name to JSON value.
pub type StoreRow = Map<String, Value>;

/// Destination for records, organised in named collections.
///
/// A collection must be installed with its field schema before rows are
/// written to it. Implementations are shared across concurrent lookups.
#[async_trait]
pub trait StorageSink: Send + Sync {
    /// Registers `collection` with its `(field, description)` schema.
    ///
    /// Installing an already installed collection is not an error.
    async fn install_store(
        &self,
        collection: &str,
        schema: &[(&str, &str)],
    ) -> Result<(), DatabaseError>;

    /// Persists a single row into `collection`.
    async fn one(&self, collection: &str, row: &StoreRow) -> Result<(), DatabaseError>;
}

/// Converts a serializable record into a [`StoreRow`].
///
/// # Errors
///
/// Returns `DatabaseError::SerializationError` if the record does not
/// serialize to a JSON object.
pub fn to_row<T: Serialize>(record: &T) -> Result<StoreRow, DatabaseError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(DatabaseError::SerializationError(serde::ser::Error::custom(
            format!("expected a JSON object, got {other}"),
        ))),
    }
}

/// Accepts names made of ASCII letters, digits and underscores that do not
/// start with a digit; these are safe to splice into SQL and file names.
pub fn validate_identifier(name: &str) -> Result<&str, DatabaseError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(name)
    } else {
        Err(DatabaseError::InvalidIdentifier(name.to_string()))
    }
}
