//! Catalog introspection.
//!
//! [`SchemaCollection`] asks a [`Catalog`] for raw rows and lets the
//! connection's dialect turn them into abstract [`Table`]s.

use tracing::{debug, info};

use crate::core::schema::{Constraint, Table};
use crate::core::traits::{Catalog, SchemaDialect};
use crate::error::{Result, SchemaError};

/// Name under which the catalog's primary key is installed.
pub const PRIMARY_CONSTRAINT: &str = "primary";

/// Introspects the tables reachable through one connection.
///
/// Holds no state besides the borrowed connection; every call goes to the
/// catalog again.
pub struct SchemaCollection<'a, C: Catalog + ?Sized> {
    connection: &'a C,
}

impl<'a, C: Catalog + ?Sized> SchemaCollection<'a, C> {
    pub fn new(connection: &'a C) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &'a C {
        self.connection
    }

    /// Table names in catalog order.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let dialect = self.connection.dialect();
        debug!("{}: listing tables", dialect.name());
        self.connection.list_tables()
    }

    /// Describe one table: columns, keys and indexes.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::TableNotFound`] when `name` is not listed by the
    /// catalog. Catalog failures propagate unchanged.
    pub fn describe(&self, name: &str) -> Result<Table> {
        let tables = self.list_tables()?;
        if !tables.iter().any(|t| t == name) {
            return Err(SchemaError::TableNotFound(name.to_string()));
        }
        self.describe_listed(name)
    }

    /// Describe every table in catalog order.
    pub fn describe_all(&self) -> Result<Vec<Table>> {
        let tables = self
            .list_tables()?
            .iter()
            .map(|name| self.describe_listed(name))
            .collect::<Result<Vec<_>>>()?;

        info!("Described {} tables", tables.len());
        Ok(tables)
    }

    fn describe_listed(&self, name: &str) -> Result<Table> {
        let dialect = self.connection.dialect();

        debug!("{}: loading columns of {}", dialect.name(), name);
        let table = self
            .connection
            .list_columns(name)?
            .iter()
            .fold(Table::new(name), |table, row| {
                table.add_column(row.name.clone(), dialect.convert_field_description(row))
            });

        let primary_key = self.connection.primary_key_columns(name)?;
        let table = if primary_key.is_empty() {
            table
        } else {
            table.add_constraint(PRIMARY_CONSTRAINT, Constraint::primary(primary_key))?
        };

        debug!("{}: loading indexes of {}", dialect.name(), name);
        let index_rows = self.connection.list_indexes(name)?;
        let table = dialect.convert_index_descriptions(table, &index_rows)?;

        info!(
            "Described table {}: {} columns, {} constraints, {} indexes",
            table.name(),
            table.columns().len(),
            table.constraints().len(),
            table.indexes().len()
        );
        Ok(table)
    }
}
