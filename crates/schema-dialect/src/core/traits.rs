//! Core traits at the seams of the dialect engine.
//!
//! - [`Quoter`]: quotes identifiers and literals (provided by the driver)
//! - [`SchemaDialect`]: engine-specific rules mapping abstract ↔ concrete
//! - [`Connection`]: binds a dialect and executes statements
//! - [`Catalog`]: catalog metadata queries consumed by introspection
//!
//! # Design Patterns
//!
//! - **Strategy**: `SchemaDialect` implementations provide interchangeable DDL rules
//! - **Dependency injection**: the quoter and catalog are handed in at
//!   construction time, never looked up globally

use crate::drivers::DialectImpl;
use crate::error::Result;

use super::schema::{Column, Table};
use super::value::SqlValue;

/// Quote identifiers and scalar literals per the engine's rules.
///
/// Implementations must escape embedded quote characters. Dialects call this
/// for every identifier and literal they emit and never quote by hand.
pub trait Quoter: Send + Sync {
    /// Quote a table, column, index or constraint name.
    fn quote_identifier(&self, name: &str) -> String;

    /// Quote a literal value.
    fn quote_value(&self, value: &SqlValue<'_>) -> String;
}

/// DDL and type-mapping strategy for one engine family.
///
/// Implementations are stateless apart from the [`Quoter`] bound at
/// construction, so they can be shared across threads freely.
pub trait SchemaDialect: Send + Sync {
    /// Get the dialect identifier (e.g., "mysql").
    fn name(&self) -> &str;

    /// Map a native column type descriptor (e.g. `"VARCHAR(255)"`) to an
    /// abstract column. Never fails: unrecognized types become text.
    fn convert_column(&self, native_type: &str) -> Column;

    /// Build an abstract column from one catalog column row.
    fn convert_field_description(&self, row: &ColumnRow) -> Column;

    /// Fold catalog index rows into the table's constraints and indexes.
    ///
    /// Primary key rows are skipped; the catalog's primary key listing is
    /// authoritative and applied by the caller.
    fn convert_index_descriptions(&self, table: Table, rows: &[IndexRow]) -> Result<Table>;

    /// Column definition fragment for `CREATE TABLE`.
    fn column_sql(&self, table: &Table, name: &str) -> Result<String>;

    /// Constraint definition fragment for `CREATE TABLE`.
    fn constraint_sql(&self, table: &Table, name: &str) -> Result<String>;

    /// Index definition fragment for `CREATE TABLE`.
    fn index_sql(&self, table: &Table, name: &str) -> Result<String>;

    /// Assemble `CREATE TABLE` statements from pre-rendered fragments.
    fn create_table_sql(
        &self,
        table: &Table,
        columns: &[String],
        constraints: &[String],
        indexes: &[String],
    ) -> Vec<String>;

    /// `DROP TABLE` statements.
    fn drop_table_sql(&self, table: &Table) -> Vec<String>;

    /// `TRUNCATE TABLE` statements.
    fn truncate_table_sql(&self, table: &Table) -> Vec<String>;

    /// Catalog query listing the tables of a database.
    fn list_tables_sql(&self, database: &str) -> String;

    /// Catalog query describing the columns of a table.
    fn describe_table_sql(&self, table: &str) -> String;

    /// Catalog query describing the indexes of a table.
    fn describe_index_sql(&self, table: &str) -> String;
}

/// A database connection as seen by the dialect engine.
///
/// The engine only produces SQL text; callers decide when to run it.
pub trait Connection {
    /// Dialect bound when the connection was constructed.
    fn dialect(&self) -> &DialectImpl;

    /// Run one statement, returning the number of affected rows.
    fn execute(&self, sql: &str) -> Result<u64>;
}

/// Catalog metadata queries.
///
/// A driver-backed catalog runs the statements its bound dialect builds:
/// [`SchemaDialect::list_tables_sql`] for `list_tables`,
/// [`SchemaDialect::describe_table_sql`] for `list_columns` and
/// [`SchemaDialect::describe_index_sql`] for `list_indexes` and
/// `primary_key_columns` (the rows named `PRIMARY`).
///
/// Each call may block on I/O. Errors are collaborator failures and are
/// propagated by introspection untouched.
pub trait Catalog: Connection {
    /// Table names in the order the catalog returns them.
    fn list_tables(&self) -> Result<Vec<String>>;

    /// Column rows in ordinal order.
    fn list_columns(&self, table: &str) -> Result<Vec<ColumnRow>>;

    /// Index rows, one per (index, member column).
    fn list_indexes(&self, table: &str) -> Result<Vec<IndexRow>>;

    /// Primary key member columns in key order; empty when there is none.
    fn primary_key_columns(&self, table: &str) -> Result<Vec<String>>;
}

/// One column as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    /// Column name.
    pub name: String,
    /// Native type descriptor (e.g. `"int(11) unsigned"`).
    pub native_type: String,
    /// Whether the column allows NULL.
    pub nullable: bool,
    /// Default as catalog text; `None` for no default / NULL.
    pub default: Option<String>,
    /// Column comment; empty comments are treated as absent.
    pub comment: Option<String>,
}

impl ColumnRow {
    /// Row with no default and no comment.
    pub fn new(name: impl Into<String>, native_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            nullable,
            default: None,
            comment: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// One (index, member column) pair as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    /// Index name (`PRIMARY` for the primary key).
    pub name: String,
    /// Member column.
    pub column: String,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Index method (`BTREE`, `HASH`, `FULLTEXT`, `SPATIAL`).
    pub index_type: String,
    /// 1-based position of the column within the index.
    pub sequence: u32,
    /// Indexed prefix length, when only part of the column is indexed.
    pub sub_part: Option<u32>,
}

impl IndexRow {
    /// Non-unique BTREE member row.
    pub fn new(name: impl Into<String>, column: impl Into<String>, sequence: u32) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            unique: false,
            index_type: "BTREE".to_string(),
            sequence,
            sub_part: None,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_index_type(mut self, index_type: impl Into<String>) -> Self {
        self.index_type = index_type.into();
        self
    }

    pub fn with_sub_part(mut self, sub_part: u32) -> Self {
        self.sub_part = Some(sub_part);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_row_builder() {
        let row = ColumnRow::new("title", "varchar(20)", true).with_comment("A title");
        assert_eq!(row.native_type, "varchar(20)");
        assert!(row.nullable);
        assert!(row.default.is_none());
        assert_eq!(row.comment.as_deref(), Some("A title"));
    }

    #[test]
    fn test_index_row_defaults() {
        let row = IndexRow::new("length_idx", "title", 1).unique().with_sub_part(4);
        assert!(row.unique);
        assert_eq!(row.index_type, "BTREE");
        assert_eq!(row.sub_part, Some(4));
    }
}
