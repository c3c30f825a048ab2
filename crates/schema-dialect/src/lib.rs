//! # schema-dialect
//!
//! MySQL schema dialect: maps native column types to an abstract schema model
//! and renders that model back into DDL.
//!
//! - **Type mapping** from catalog descriptors (`"int(11) unsigned"`) to
//!   abstract column kinds
//! - **DDL generation** for columns, keys, indexes and whole tables
//!   (`CREATE`, `DROP`, `TRUNCATE`)
//! - **Introspection** of live tables through a [`Catalog`]
//!
//! Generation is pure: statements are returned as text and the caller
//! decides when to execute them.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use schema_dialect::{
//!     Column, Connection, Constraint, DialectImpl, MysqlQuoter, Result, Table,
//! };
//!
//! struct Offline(DialectImpl);
//!
//! impl Connection for Offline {
//!     fn dialect(&self) -> &DialectImpl {
//!         &self.0
//!     }
//!
//!     fn execute(&self, _sql: &str) -> Result<u64> {
//!         Ok(0)
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let connection = Offline(DialectImpl::from_db_type("mysql", Arc::new(MysqlQuoter::new()))?);
//!
//! let posts = Table::new("posts")
//!     .add_column("id", Column::new("integer").not_null())
//!     .add_column("title", Column::new("string").with_length(100))
//!     .add_constraint("primary", Constraint::primary(["id"]))?;
//!
//! let sql = posts.create_sql(&connection)?;
//! assert_eq!(
//!     sql[0],
//!     "CREATE TABLE `posts` (\n`id` INTEGER NOT NULL AUTO_INCREMENT,\n`title` VARCHAR(100),\nPRIMARY KEY (`id`)\n)"
//! );
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod config;
pub mod core;
pub mod dialect;
pub mod drivers;
pub mod error;

// Re-exports for convenient access
pub use collection::SchemaCollection;
pub use config::Config;
pub use crate::core::{
    validate_identifier, validate_option_value, Catalog, Column, ColumnKind, ColumnRow, Connection, Constraint,
    ConstraintKind, DefaultValue, Index, IndexKind, IndexRow, MysqlQuoter, Quoter, SchemaDialect,
    SqlValue, Table, TableOptions,
};
pub use drivers::{DialectImpl, MysqlDialect};
pub use error::{Result, SchemaError};
