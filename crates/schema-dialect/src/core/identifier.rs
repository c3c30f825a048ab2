//! Identifier validation and the reference MySQL quoting provider.
//!
//! Identifiers (table, column, index names) cannot be bound as statement
//! parameters, so DDL splices them into the SQL text. Before that happens we:
//! 1. Validate identifiers for suspicious patterns (null bytes, excessive length)
//! 2. Hand them to the connection's [`Quoter`], which applies engine quoting
//!    and escapes embedded quote characters

use crate::error::{Result, SchemaError};

use super::traits::Quoter;
use super::value::SqlValue;

/// Maximum identifier length in MySQL (characters).
const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Validate an identifier for security issues.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes (injection vector)
/// - Identifiers exceeding maximum length
///
/// # Errors
///
/// Returns `SchemaError::InvalidIdentifier` with a descriptive reason.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SchemaError::invalid_identifier(
            name,
            "Identifier cannot be empty",
        ));
    }

    if name.contains('\0') {
        return Err(SchemaError::invalid_identifier(
            name,
            "SECURITY: Identifier contains null byte (possible injection attempt)",
        ));
    }

    let chars = name.chars().count();
    if chars > MAX_IDENTIFIER_LENGTH {
        return Err(SchemaError::invalid_identifier(
            name,
            format!(
                "Identifier exceeds maximum length of {} characters (got {})",
                MAX_IDENTIFIER_LENGTH, chars
            ),
        ));
    }

    Ok(())
}

/// Validate a table option value (engine, charset, collation).
///
/// Option values are spliced into DDL unquoted, so only bare names made of
/// ASCII letters, digits and underscores are accepted.
///
/// # Errors
///
/// Returns `SchemaError::InvalidIdentifier` with a descriptive reason.
pub fn validate_option_value(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SchemaError::invalid_identifier(
            value,
            "Option value cannot be empty",
        ));
    }

    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(SchemaError::invalid_identifier(
            value,
            format!("SECURITY: Option value contains {:?}, expected a bare name", bad),
        ));
    }

    Ok(())
}

/// MySQL quoting rules for a driver without its own quoting routine.
///
/// - Identifiers: backticks, embedded backticks doubled
/// - Strings: single quotes, with `\` and `'` escaped
/// - Numbers: bare; booleans as `1`/`0`; NULL as `NULL`
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlQuoter;

impl MysqlQuoter {
    pub fn new() -> Self {
        Self
    }
}

impl Quoter for MysqlQuoter {
    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn quote_value(&self, value: &SqlValue<'_>) -> String {
        match value {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(_) | SqlValue::Int(_) | SqlValue::Float(_) => value.to_string(),
            SqlValue::Text(text) => {
                let mut out = String::with_capacity(text.len() + 2);
                out.push('\'');
                for ch in text.chars() {
                    match ch {
                        '\'' => out.push_str("''"),
                        '\\' => out.push_str("\\\\"),
                        '\0' => out.push_str("\\0"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        other => out.push(other),
                    }
                }
                out.push('\'');
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn test_validate_identifier_normal() {
        assert!(validate_identifier("users").is_ok());
        assert!(validate_identifier("my_table").is_ok());
        assert!(validate_identifier("column with spaces").is_ok());
        assert!(validate_identifier("日本語").is_ok());
    }

    #[test]
    fn test_validate_identifier_rejects_empty() {
        let result = validate_identifier("");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_validate_identifier_rejects_null_byte() {
        let result = validate_identifier("users\0; DROP TABLE x");
        assert!(result.unwrap_err().to_string().contains("null byte"));
    }

    #[test]
    fn test_validate_identifier_length_limit() {
        let ok = "a".repeat(64);
        assert!(validate_identifier(&ok).is_ok());
        let too_long = "a".repeat(65);
        assert!(validate_identifier(&too_long)
            .unwrap_err()
            .to_string()
            .contains("maximum length"));
        // Counted in characters, not bytes.
        assert!(validate_identifier(&"é".repeat(64)).is_ok());
    }

    #[test]
    fn test_validate_option_value() {
        assert!(validate_option_value("InnoDB").is_ok());
        assert!(validate_option_value("utf8mb4_unicode_ci").is_ok());
        assert!(validate_option_value("").unwrap_err().to_string().contains("empty"));

        let err = validate_option_value("InnoDB; DROP TABLE users; --").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidIdentifier { .. }));
        assert!(err.to_string().contains("';'"));
        assert!(validate_option_value("utf8 mb4").is_err());
    }

    // =========================================================================
    // Quoting tests
    // =========================================================================

    #[test]
    fn test_quote_identifier() {
        let quoter = MysqlQuoter::new();
        assert_eq!(quoter.quote_identifier("name"), "`name`");
        assert_eq!(quoter.quote_identifier("table`name"), "`table``name`");
    }

    #[test]
    fn test_quote_value() {
        let quoter = MysqlQuoter::new();
        assert_eq!(quoter.quote_value(&SqlValue::from("admin")), "'admin'");
        assert_eq!(quoter.quote_value(&SqlValue::from("O'Brien")), "'O''Brien'");
        assert_eq!(quoter.quote_value(&SqlValue::from("C:\\tmp")), "'C:\\\\tmp'");
        assert_eq!(quoter.quote_value(&SqlValue::Int(10)), "10");
        assert_eq!(quoter.quote_value(&SqlValue::Bool(false)), "0");
        assert_eq!(quoter.quote_value(&SqlValue::Null), "NULL");
    }
}
