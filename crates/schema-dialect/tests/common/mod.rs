//! Shared fakes for integration tests: a quoting provider, an offline
//! connection and an in-memory catalog seeded with a small blog schema.

#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Arc;

use schema_dialect::{
    Catalog, ColumnRow, Connection, DialectImpl, IndexRow, Quoter, Result, SchemaDialect,
    SchemaError, SqlValue,
};

/// Wraps literals in double quotes and identifiers in backticks, no escaping.
pub struct FixtureQuoter;

impl Quoter for FixtureQuoter {
    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name)
    }

    fn quote_value(&self, value: &SqlValue<'_>) -> String {
        format!("\"{}\"", value)
    }
}

pub fn mysql_dialect() -> DialectImpl {
    DialectImpl::from_db_type("mysql", Arc::new(FixtureQuoter)).unwrap()
}

/// Connection that records statements instead of running them.
pub struct FakeConnection {
    dialect: DialectImpl,
    pub executed: RefCell<Vec<String>>,
}

impl FakeConnection {
    pub fn new() -> Self {
        Self {
            dialect: mysql_dialect(),
            executed: RefCell::new(Vec::new()),
        }
    }
}

impl Connection for FakeConnection {
    fn dialect(&self) -> &DialectImpl {
        &self.dialect
    }

    fn execute(&self, sql: &str) -> Result<u64> {
        self.executed.borrow_mut().push(sql.to_string());
        Ok(0)
    }
}

#[derive(Clone)]
pub struct FakeTable {
    pub name: String,
    pub columns: Vec<ColumnRow>,
    pub indexes: Vec<IndexRow>,
    pub primary_key: Vec<String>,
}

/// Database the fake catalog pretends to be connected to.
pub const DATABASE: &str = "blog";

/// In-memory catalog. Tables are listed in insertion order.
///
/// Every call logs the catalog statement a MySQL driver would run for it.
pub struct FakeCatalog {
    connection: FakeConnection,
    tables: Vec<FakeTable>,
    pub fail_indexes: bool,
    pub queries: RefCell<Vec<String>>,
}

impl FakeCatalog {
    pub fn empty() -> Self {
        Self {
            connection: FakeConnection::new(),
            tables: Vec::new(),
            fail_indexes: false,
            queries: RefCell::new(Vec::new()),
        }
    }

    /// The `articles` and `authors` tables of a small blog.
    pub fn blog() -> Self {
        let mut catalog = Self::empty();
        catalog.tables.push(FakeTable {
            name: "articles".into(),
            columns: vec![
                ColumnRow::new("id", "bigint(20)", false),
                ColumnRow::new("title", "varchar(20)", true).with_comment("A title"),
                ColumnRow::new("body", "text", true),
                ColumnRow::new("author_id", "int(11)", false),
                ColumnRow::new("published", "tinyint(1)", true).with_default("0"),
                ColumnRow::new("allow_comments", "tinyint(1)", true).with_default("0"),
                ColumnRow::new("created", "datetime", true),
            ],
            indexes: vec![
                IndexRow::new("PRIMARY", "id", 1).unique(),
                IndexRow::new("author_idx", "author_id", 1),
                IndexRow::new("length_idx", "title", 1).unique().with_sub_part(4),
            ],
            primary_key: vec!["id".into()],
        });
        catalog.tables.push(FakeTable {
            name: "authors".into(),
            columns: vec![
                ColumnRow::new("id", "int(11)", false),
                ColumnRow::new("name", "varchar(50)", true),
                ColumnRow::new("bio", "text", true),
                ColumnRow::new("created", "datetime", true),
            ],
            indexes: vec![IndexRow::new("PRIMARY", "id", 1).unique()],
            primary_key: vec!["id".into()],
        });
        catalog
    }

    pub fn with_table(mut self, table: FakeTable) -> Self {
        self.tables.push(table);
        self
    }

    fn table(&self, name: &str) -> Result<&FakeTable> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::connection(missing(name)))
    }

    fn log(&self, query: String) {
        self.queries.borrow_mut().push(query);
    }
}

fn missing(name: &str) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("Table '{}' doesn't exist", name),
    )
}

impl Connection for FakeCatalog {
    fn dialect(&self) -> &DialectImpl {
        self.connection.dialect()
    }

    fn execute(&self, sql: &str) -> Result<u64> {
        self.connection.execute(sql)
    }
}

impl Catalog for FakeCatalog {
    fn list_tables(&self) -> Result<Vec<String>> {
        self.log(self.dialect().list_tables_sql(DATABASE));
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn list_columns(&self, table: &str) -> Result<Vec<ColumnRow>> {
        self.log(self.dialect().describe_table_sql(table));
        Ok(self.table(table)?.columns.clone())
    }

    fn list_indexes(&self, table: &str) -> Result<Vec<IndexRow>> {
        self.log(self.dialect().describe_index_sql(table));
        if self.fail_indexes {
            return Err(SchemaError::connection(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "catalog timed out",
            )));
        }
        Ok(self.table(table)?.indexes.clone())
    }

    fn primary_key_columns(&self, table: &str) -> Result<Vec<String>> {
        self.log(self.dialect().describe_index_sql(table));
        Ok(self.table(table)?.primary_key.clone())
    }
}
