//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use std::path::Path;
use std::sync::Arc;

use crate::core::traits::Quoter;
use crate::drivers::DialectImpl;
use crate::error::Result;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Build the configured dialect around a connection's quoting provider.
    pub fn dialect(&self, quoter: Arc<dyn Quoter>) -> Result<DialectImpl> {
        DialectImpl::from_db_type(&self.dialect, quoter)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::core::schema::Table;
    use crate::core::traits::SchemaDialect;
    use crate::core::MysqlQuoter;
    use crate::error::SchemaError;

    #[test]
    fn test_from_yaml() {
        let config = Config::from_yaml(
            r#"
dialect: mysql
table_defaults:
  engine: InnoDB
  charset: utf8
"#,
        )
        .unwrap();
        assert_eq!(config.dialect, "mysql");
        assert_eq!(config.table_defaults.engine.as_deref(), Some("InnoDB"));
        assert!(config.table_defaults.collate.is_none());
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.table_defaults.is_empty());
    }

    #[test]
    fn test_from_yaml_rejects_bad_values() {
        assert!(matches!(
            Config::from_yaml("dialect: sqlite"),
            Err(SchemaError::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml("dialect: [mysql"),
            Err(SchemaError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dialect: mariadb").unwrap();
        writeln!(file, "table_defaults:").unwrap();
        writeln!(file, "  collate: utf8_general_ci").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dialect, "mariadb");
        assert_eq!(
            config.table_defaults.collate.as_deref(),
            Some("utf8_general_ci")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }

    #[test]
    fn test_dialect_and_table_defaults() {
        let config = Config::from_yaml("table_defaults: {engine: InnoDB}").unwrap();
        let dialect = config.dialect(Arc::new(MysqlQuoter::new())).unwrap();
        assert_eq!(dialect.name(), "mysql");

        let table = Table::new("posts")
            .add_column("id", "integer")
            .with_default_options(&config.table_defaults);
        let sql = dialect.create_table_sql(&table, &["`id` INTEGER".to_string()], &[], &[]);
        assert!(sql[0].ends_with(") ENGINE=InnoDB"));
    }
}
