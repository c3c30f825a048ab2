//! Engine-specific dialect implementations.
//!
//! - [`mysql`]: MySQL/MariaDB dialect
//!
//! # Adding New Engines
//!
//! 1. Create a new module under `drivers/` (e.g., `drivers/sqlite/`)
//! 2. Implement [`SchemaDialect`] for the engine
//! 3. Add an enum variant to [`DialectImpl`] and a name in `from_db_type`

pub mod mysql;

pub use mysql::MysqlDialect;

use std::sync::Arc;

use crate::core::schema::{Column, Table};
use crate::core::traits::{ColumnRow, IndexRow, Quoter, SchemaDialect};
use crate::error::{Result, SchemaError};

/// Enum-based static dispatch for dialects.
///
/// The compiler generates a match statement instead of vtable dispatch.
#[derive(Debug, Clone)]
pub enum DialectImpl {
    Mysql(MysqlDialect),
}

impl SchemaDialect for DialectImpl {
    fn name(&self) -> &str {
        match self {
            DialectImpl::Mysql(d) => d.name(),
        }
    }

    fn convert_column(&self, native_type: &str) -> Column {
        match self {
            DialectImpl::Mysql(d) => d.convert_column(native_type),
        }
    }

    fn convert_field_description(&self, row: &ColumnRow) -> Column {
        match self {
            DialectImpl::Mysql(d) => d.convert_field_description(row),
        }
    }

    fn convert_index_descriptions(&self, table: Table, rows: &[IndexRow]) -> Result<Table> {
        match self {
            DialectImpl::Mysql(d) => d.convert_index_descriptions(table, rows),
        }
    }

    fn column_sql(&self, table: &Table, name: &str) -> Result<String> {
        match self {
            DialectImpl::Mysql(d) => d.column_sql(table, name),
        }
    }

    fn constraint_sql(&self, table: &Table, name: &str) -> Result<String> {
        match self {
            DialectImpl::Mysql(d) => d.constraint_sql(table, name),
        }
    }

    fn index_sql(&self, table: &Table, name: &str) -> Result<String> {
        match self {
            DialectImpl::Mysql(d) => d.index_sql(table, name),
        }
    }

    fn create_table_sql(
        &self,
        table: &Table,
        columns: &[String],
        constraints: &[String],
        indexes: &[String],
    ) -> Vec<String> {
        match self {
            DialectImpl::Mysql(d) => d.create_table_sql(table, columns, constraints, indexes),
        }
    }

    fn drop_table_sql(&self, table: &Table) -> Vec<String> {
        match self {
            DialectImpl::Mysql(d) => d.drop_table_sql(table),
        }
    }

    fn truncate_table_sql(&self, table: &Table) -> Vec<String> {
        match self {
            DialectImpl::Mysql(d) => d.truncate_table_sql(table),
        }
    }

    fn list_tables_sql(&self, database: &str) -> String {
        match self {
            DialectImpl::Mysql(d) => d.list_tables_sql(database),
        }
    }

    fn describe_table_sql(&self, table: &str) -> String {
        match self {
            DialectImpl::Mysql(d) => d.describe_table_sql(table),
        }
    }

    fn describe_index_sql(&self, table: &str) -> String {
        match self {
            DialectImpl::Mysql(d) => d.describe_index_sql(table),
        }
    }
}

impl DialectImpl {
    /// Names accepted by [`DialectImpl::from_db_type`].
    pub const SUPPORTED: &'static [&'static str] = &["mysql", "mariadb"];

    /// Create a dialect from a database type string, bound to `quoter`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownDialect`] if the database type is not recognized.
    pub fn from_db_type(db_type: &str, quoter: Arc<dyn Quoter>) -> Result<Self> {
        match db_type.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DialectImpl::Mysql(MysqlDialect::new(quoter))),
            other => Err(SchemaError::UnknownDialect(other.to_string())),
        }
    }
}

impl From<MysqlDialect> for DialectImpl {
    fn from(dialect: MysqlDialect) -> Self {
        DialectImpl::Mysql(dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MysqlQuoter;

    fn quoter() -> Arc<dyn Quoter> {
        Arc::new(MysqlQuoter::new())
    }

    #[test]
    fn test_dialect_impl_from_db_type() {
        let mysql = DialectImpl::from_db_type("mysql", quoter()).unwrap();
        assert_eq!(mysql.name(), "mysql");

        // Alternative names
        assert!(DialectImpl::from_db_type("MariaDB", quoter()).is_ok());
        assert!(DialectImpl::from_db_type(" MySQL ", quoter()).is_ok());

        // Unknown should error
        let err = DialectImpl::from_db_type("oracle", quoter()).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownDialect(ref name) if name == "oracle"));
    }

    #[test]
    fn test_dialect_impl_dispatch() {
        let dialect: DialectImpl = MysqlDialect::new(quoter()).into();

        let table = Table::new("users").add_column("id", "integer");
        assert_eq!(dialect.drop_table_sql(&table), ["DROP TABLE `users`"]);
        assert_eq!(dialect.column_sql(&table, "id").unwrap(), "`id` INTEGER");
        assert_eq!(
            dialect.convert_column("VARCHAR(40)").length,
            Some(40)
        );
        assert_eq!(dialect.list_tables_sql("app"), "SHOW TABLES FROM `app`");
    }
}
