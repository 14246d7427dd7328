//! Error types for tagsql

use thiserror::Error;

/// Result type alias for tagsql operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while building a statement.
///
/// All of these are local validation failures. None of them is transient, so
/// retrying the same call with the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The boolean join keyword is neither `AND` nor `OR`
    #[error("invalid where type, must be AND or OR, you provided: {0}")]
    InvalidJoinOperator(String),

    /// The dialect name is not one of the known placeholder styles
    #[error("invalid dialect, must be std or pgx, you provided: {0}")]
    InvalidDialect(String),

    /// An update was requested without any SET record
    #[error("no fields to update")]
    NoFieldsToUpdate,

    /// A value supplied as a record is not record-shaped
    #[error("record must be a struct or an object, found {found}")]
    InvalidShape { found: String },

    /// A participating field has no annotation under the configured tag
    #[error("tag '{tag}' does not exist on field '{field}'")]
    MissingColumnMapping { field: String, tag: String },

    /// Configuration could not be read
    #[error("configuration error: {0}")]
    Config(String),
}

impl QueryError {
    /// Create an invalid shape error
    pub fn invalid_shape(found: impl Into<String>) -> Self {
        Self::InvalidShape {
            found: found.into(),
        }
    }

    /// Create a missing column mapping error for a field and tag
    pub fn missing_column(field: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::MissingColumnMapping {
            field: field.into(),
            tag: tag.into(),
        }
    }

    /// Check if this error was raised by configuration validation
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidJoinOperator(_) | Self::InvalidDialect(_) | Self::Config(_)
        )
    }

    /// Check if this is a missing column mapping error
    pub fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumnMapping { .. })
    }
}

impl From<toml::de::Error> for QueryError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = QueryError::missing_column("LastName", "db");
        assert_eq!(err.to_string(), "tag 'db' does not exist on field 'LastName'");
        assert!(err.is_missing_column());

        let err = QueryError::InvalidJoinOperator("XOR".to_string());
        assert!(err.to_string().ends_with("you provided: XOR"));
        assert!(err.is_config_error());
    }
}
