//! Configuration validation.

use super::Config;
use crate::core::validate_option_value;
use crate::drivers::DialectImpl;
use crate::error::{Result, SchemaError};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let dialect = config.dialect.trim().to_lowercase();
    if !DialectImpl::SUPPORTED.contains(&dialect.as_str()) {
        return Err(SchemaError::Config(format!(
            "dialect must be one of {}, got '{}'",
            DialectImpl::SUPPORTED.join(", "),
            config.dialect
        )));
    }

    for (key, value) in config.table_defaults.entries() {
        validate_option_value(value).map_err(|e| {
            SchemaError::Config(format!("table_defaults.{}: {}", key, e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::TableOptions;

    fn valid_config() -> Config {
        Config {
            dialect: "mysql".to_string(),
            table_defaults: TableOptions {
                engine: Some("InnoDB".to_string()),
                charset: Some("utf8mb4".to_string()),
                collate: Some("utf8mb4_unicode_ci".to_string()),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_dialect_names() {
        let mut config = valid_config();
        config.dialect = "MariaDB".to_string();
        assert!(validate(&config).is_ok());

        config.dialect = "postgres".to_string();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("got 'postgres'"));
    }

    #[test]
    fn test_empty_option_rejected() {
        let mut config = valid_config();
        config.table_defaults.engine = Some(String::new());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_option_injection_rejected() {
        let mut config = valid_config();
        config.table_defaults.charset = Some("utf8; DROP TABLE users".to_string());
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, SchemaError::Config(_)));
        assert!(err.to_string().contains("table_defaults.charset"));
    }
}
