//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::core::schema::TableOptions;

/// Root configuration structure.
///
/// ```yaml
/// dialect: mysql
/// table_defaults:
///   engine: InnoDB
///   charset: utf8mb4
///   collate: utf8mb4_unicode_ci
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Dialect name (default: "mysql").
    #[serde(default = "default_dialect")]
    pub dialect: String,

    /// Options filled into tables that leave them unset.
    #[serde(default)]
    pub table_defaults: TableOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            table_defaults: TableOptions::default(),
        }
    }
}

fn default_dialect() -> String {
    "mysql".to_string()
}
