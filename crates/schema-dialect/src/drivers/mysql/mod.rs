//! MySQL/MariaDB schema dialect.
//!
//! - [`MysqlDialect`]: DDL generation, catalog queries and catalog row conversion
//! - `typemap`: native type descriptor → abstract column mapping
//!
//! # Supported Versions
//!
//! - MySQL 5.7+, 8.0+
//! - MariaDB 10.2+

mod dialect;
mod typemap;

pub use dialect::MysqlDialect;
