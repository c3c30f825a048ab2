//! Error types for the schema dialect library.

use thiserror::Error;

/// Boxed error raised by a [`Connection`](crate::core::Connection) or
/// [`Catalog`](crate::core::Catalog) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for schema operations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A constraint, index or generated statement names a column the table
    /// does not define, or the table definition is otherwise inconsistent.
    #[error("Malformed schema for table {table}: {message}")]
    MalformedSchema { table: String, message: String },

    /// Identifier rejected before being spliced into SQL.
    #[error("Invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// Introspection targeted a table absent from the catalog.
    #[error("Table {0} was not found in the catalog")]
    TableNotFound(String),

    /// No dialect is registered under the requested name.
    #[error("Unknown dialect: '{0}'. Supported dialects: mysql")]
    UnknownDialect(String),

    /// Configuration error (invalid YAML, bad option values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection or catalog query failure, passed through untouched.
    #[error("Connection error: {0}")]
    Connection(#[from] BoxError),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SchemaError {
    /// Create a MalformedSchema error for a table.
    pub fn malformed(table: impl Into<String>, message: impl Into<String>) -> Self {
        SchemaError::MalformedSchema {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidIdentifier error.
    pub fn invalid_identifier(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::InvalidIdentifier {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a collaborator failure.
    pub fn connection<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SchemaError::Connection(Box::new(err))
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = SchemaError::malformed("articles", "column 'missing' is not defined");
        assert_eq!(
            err.to_string(),
            "Malformed schema for table articles: column 'missing' is not defined"
        );
    }

    #[test]
    fn test_connection_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "server went away");
        let err = SchemaError::connection(io);
        assert!(err.to_string().contains("server went away"));

        let detailed = err.format_detailed();
        assert!(detailed.starts_with("Error: Connection error: server went away"));
        assert!(detailed.contains("Caused by:\n  1: server went away"));
    }

    #[test]
    fn test_table_not_found_is_distinct() {
        let err = SchemaError::TableNotFound("ghosts".into());
        assert!(matches!(err, SchemaError::TableNotFound(ref t) if t == "ghosts"));
    }
}
