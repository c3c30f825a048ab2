//! Core abstractions of the dialect engine.
//!
//! - [`schema`]: dialect-neutral table, column, constraint and index model
//! - [`value`]: scalar literals handed to the quoting provider
//! - [`traits`]: quoting provider, dialect, connection and catalog seams
//! - [`identifier`]: identifier validation and the reference MySQL quoter
//!
//! # Architecture
//!
//! The core module defines engine-neutral types. Engine rules live in driver
//! modules (`drivers/mysql`), which read the model and emit SQL text through
//! the [`Quoter`] bound at construction.

pub mod identifier;
pub mod schema;
pub mod traits;
pub mod value;

// Re-export commonly used types for convenience
pub use identifier::{validate_identifier, validate_option_value, MysqlQuoter};
pub use schema::{
    Column, ColumnKind, Constraint, ConstraintKind, DefaultValue, Index, IndexKind, Table,
    TableOptions,
};
pub use traits::{Catalog, ColumnRow, Connection, IndexRow, Quoter, SchemaDialect};
pub use value::SqlValue;
