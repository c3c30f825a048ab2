//! MySQL/MariaDB schema dialect (Strategy pattern).
//!
//! Renders column, constraint, index and table DDL from the abstract schema
//! model, produces the catalog queries used for introspection and folds
//! catalog rows back into abstract columns and keys.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use super::typemap::native_to_column;
use crate::core::schema::{
    Column, ColumnKind, Constraint, ConstraintKind, DefaultValue, Index, IndexKind, Table,
};
use crate::core::traits::{ColumnRow, IndexRow, Quoter, SchemaDialect};
use crate::core::value::SqlValue;
use crate::core::MysqlQuoter;
use crate::dialect::NativeType;
use crate::error::{Result, SchemaError};

/// Length rendered for string columns that do not set one.
const DEFAULT_STRING_LENGTH: u32 = 255;

/// Catalog key name MySQL reserves for the primary key.
const PRIMARY_KEY_NAME: &str = "PRIMARY";

/// MySQL/MariaDB dialect implementation.
///
/// Every identifier and literal goes through the bound [`Quoter`].
/// Compatible with MySQL 5.7+, 8.0+, and MariaDB 10.2+.
#[derive(Clone)]
pub struct MysqlDialect {
    quoter: Arc<dyn Quoter>,
}

impl MysqlDialect {
    /// Create a dialect bound to a connection's quoting provider.
    pub fn new(quoter: Arc<dyn Quoter>) -> Self {
        Self { quoter }
    }

    fn quote_ident(&self, name: &str) -> String {
        self.quoter.quote_identifier(name)
    }

    /// Base type keyword with its length arguments.
    fn type_sql(&self, column: &Column) -> String {
        match &column.kind {
            ColumnKind::String if column.fixed => format!(
                "CHAR({})",
                column.length.unwrap_or(DEFAULT_STRING_LENGTH)
            ),
            ColumnKind::String => format!(
                "VARCHAR({})",
                column.length.unwrap_or(DEFAULT_STRING_LENGTH)
            ),
            ColumnKind::Text | ColumnKind::Other(_) => "TEXT".to_string(),
            ColumnKind::Uuid => "CHAR(36)".to_string(),
            ColumnKind::Integer => match column.length {
                Some(length) => format!("INTEGER({})", length),
                None => "INTEGER".to_string(),
            },
            ColumnKind::BigInteger => "BIGINT".to_string(),
            ColumnKind::Boolean => "BOOLEAN".to_string(),
            ColumnKind::Float => numeric_sql("FLOAT", column),
            ColumnKind::Decimal => numeric_sql("DECIMAL", column),
            ColumnKind::Date => "DATE".to_string(),
            ColumnKind::Time => "TIME".to_string(),
            ColumnKind::DateTime => "DATETIME".to_string(),
            ColumnKind::Timestamp => "TIMESTAMP".to_string(),
            ColumnKind::Binary => "BLOB".to_string(),
        }
    }

    /// Nullability token followed by the DEFAULT clause.
    fn null_default_sql(&self, column: &Column) -> String {
        let keyword_default = column.kind.accepts_current_timestamp()
            && matches!(column.default, Some(DefaultValue::CurrentTimestamp));
        match column.null {
            Some(false) => match &column.default {
                Some(default) => format!(" NOT NULL DEFAULT {}", self.default_sql(column, default)),
                None => " NOT NULL".to_string(),
            },
            // TIMESTAMP is NOT NULL unless told otherwise, so it needs the
            // bare NULL token.
            Some(true) if column.kind == ColumnKind::Timestamp => {
                if keyword_default {
                    format!(" NULL DEFAULT {}", DefaultValue::CURRENT_TIMESTAMP)
                } else {
                    " NULL".to_string()
                }
            }
            // Explicitly nullable columns default to NULL; only the keyword
            // default survives, literals are dropped.
            Some(true) if keyword_default => {
                format!(" DEFAULT {}", DefaultValue::CURRENT_TIMESTAMP)
            }
            Some(true) => " DEFAULT NULL".to_string(),
            None => match &column.default {
                Some(default) => format!(" DEFAULT {}", self.default_sql(column, default)),
                None => String::new(),
            },
        }
    }

    /// The current-timestamp keyword stays bare only on kinds that carry a
    /// clock; elsewhere it is an ordinary string literal.
    fn default_sql(&self, column: &Column, default: &DefaultValue) -> String {
        match default {
            DefaultValue::Bool(true) => "TRUE".to_string(),
            DefaultValue::Bool(false) => "FALSE".to_string(),
            DefaultValue::CurrentTimestamp if column.kind.accepts_current_timestamp() => {
                DefaultValue::CURRENT_TIMESTAMP.to_string()
            }
            other => self.quoter.quote_value(&other.to_sql_value()),
        }
    }

    /// `` `a`, `b`(4) `` member list with optional prefix lengths.
    fn member_list(&self, columns: &[String], lengths: &IndexMap<String, u32>) -> String {
        columns
            .iter()
            .map(|column| match lengths.get(column) {
                Some(length) => format!("{}({})", self.quote_ident(column), length),
                None => self.quote_ident(column),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn options_sql(&self, table: &Table) -> String {
        let options = table.options();
        let mut sql = String::new();
        if let Some(engine) = &options.engine {
            sql.push_str(&format!(" ENGINE={}", engine));
        }
        if let Some(charset) = &options.charset {
            sql.push_str(&format!(" DEFAULT CHARSET={}", charset));
        }
        if let Some(collate) = &options.collate {
            sql.push_str(&format!(" COLLATE={}", collate));
        }
        sql
    }
}

/// `KW(length,precision)` once a length is set, bare `KW` otherwise.
fn numeric_sql(keyword: &str, column: &Column) -> String {
    match column.length {
        Some(length) => format!("{}({},{})", keyword, length, column.precision.unwrap_or(0)),
        None => keyword.to_string(),
    }
}

fn missing(table: &Table, what: &str, name: &str) -> SchemaError {
    SchemaError::malformed(
        table.name(),
        format!("{} '{}' is not defined", what, name),
    )
}

impl Default for MysqlDialect {
    fn default() -> Self {
        Self::new(Arc::new(MysqlQuoter::new()))
    }
}

impl fmt::Debug for MysqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlDialect").finish_non_exhaustive()
    }
}

impl SchemaDialect for MysqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn convert_column(&self, native_type: &str) -> Column {
        native_to_column(&NativeType::parse(native_type))
    }

    fn convert_field_description(&self, row: &ColumnRow) -> Column {
        let mut column = self.convert_column(&row.native_type);
        column.null = Some(row.nullable);
        column.default = row
            .default
            .as_deref()
            .map(|raw| DefaultValue::from_catalog(raw, &column.kind));
        column.comment = row.comment.clone().filter(|c| !c.is_empty());
        column
    }

    fn convert_index_descriptions(&self, mut table: Table, rows: &[IndexRow]) -> Result<Table> {
        let mut groups: IndexMap<&str, Vec<&IndexRow>> = IndexMap::new();
        for row in rows {
            if row.name.eq_ignore_ascii_case(PRIMARY_KEY_NAME) {
                debug!(
                    "{}: skipping PRIMARY index row for {}.{}",
                    self.name(),
                    table.name(),
                    row.column
                );
                continue;
            }
            groups.entry(row.name.as_str()).or_default().push(row);
        }

        for (name, mut members) in groups {
            members.sort_by_key(|row| row.sequence);

            let columns: Vec<String> = members.iter().map(|row| row.column.clone()).collect();
            let length: IndexMap<String, u32> = members
                .iter()
                .filter_map(|row| row.sub_part.map(|n| (row.column.clone(), n)))
                .collect();
            let unique = members.iter().any(|row| row.unique);
            let index_type = members
                .first()
                .map(|row| row.index_type.to_ascii_uppercase())
                .unwrap_or_default();

            table = match (index_type.as_str(), unique) {
                ("FULLTEXT", _) => table.add_index(
                    name,
                    Index { kind: IndexKind::Fulltext, columns, length },
                )?,
                ("SPATIAL", _) => table.add_index(
                    name,
                    Index { kind: IndexKind::Spatial, columns, length },
                )?,
                (_, true) => table.add_constraint(
                    name,
                    Constraint { kind: ConstraintKind::Unique, columns, length },
                )?,
                (_, false) => table.add_index(
                    name,
                    Index { kind: IndexKind::Index, columns, length },
                )?,
            };
        }

        Ok(table)
    }

    fn column_sql(&self, table: &Table, name: &str) -> Result<String> {
        let column = table
            .column(name)
            .ok_or_else(|| missing(table, "column", name))?;

        let mut sql = format!("{} {}", self.quote_ident(name), self.type_sql(column));
        sql.push_str(&self.null_default_sql(column));

        // Only a single-column integer primary key auto-increments.
        let sole_key = matches!(table.primary_key(), [only] if only == name);
        if sole_key && column.kind.is_integer() {
            sql.push_str(" AUTO_INCREMENT");
        }

        if let Some(comment) = &column.comment {
            sql.push_str(" COMMENT ");
            sql.push_str(&self.quoter.quote_value(&SqlValue::from(comment.as_str())));
        }

        Ok(sql)
    }

    fn constraint_sql(&self, table: &Table, name: &str) -> Result<String> {
        let constraint = table
            .constraint(name)
            .ok_or_else(|| missing(table, "constraint", name))?;
        let members = self.member_list(&constraint.columns, &constraint.length);

        Ok(match constraint.kind {
            ConstraintKind::Primary => format!("PRIMARY KEY ({})", members),
            ConstraintKind::Unique => {
                format!("UNIQUE KEY {} ({})", self.quote_ident(name), members)
            }
        })
    }

    fn index_sql(&self, table: &Table, name: &str) -> Result<String> {
        let index = table
            .index(name)
            .ok_or_else(|| missing(table, "index", name))?;
        let keyword = match index.kind {
            IndexKind::Index => "KEY",
            IndexKind::Fulltext => "FULLTEXT KEY",
            IndexKind::Spatial => "SPATIAL KEY",
        };

        Ok(format!(
            "{} {} ({})",
            keyword,
            self.quote_ident(name),
            self.member_list(&index.columns, &index.length)
        ))
    }

    fn create_table_sql(
        &self,
        table: &Table,
        columns: &[String],
        constraints: &[String],
        indexes: &[String],
    ) -> Vec<String> {
        let lines: Vec<&str> = columns
            .iter()
            .chain(constraints)
            .chain(indexes)
            .map(String::as_str)
            .collect();
        let create = if table.is_temporary() {
            "CREATE TEMPORARY TABLE"
        } else {
            "CREATE TABLE"
        };

        vec![format!(
            "{} {} (\n{}\n){}",
            create,
            self.quote_ident(table.name()),
            lines.join(",\n"),
            self.options_sql(table)
        )]
    }

    fn drop_table_sql(&self, table: &Table) -> Vec<String> {
        vec![format!("DROP TABLE {}", self.quote_ident(table.name()))]
    }

    fn truncate_table_sql(&self, table: &Table) -> Vec<String> {
        vec![format!("TRUNCATE TABLE {}", self.quote_ident(table.name()))]
    }

    fn list_tables_sql(&self, database: &str) -> String {
        format!("SHOW TABLES FROM {}", self.quote_ident(database))
    }

    fn describe_table_sql(&self, table: &str) -> String {
        format!("SHOW FULL COLUMNS FROM {}", self.quote_ident(table))
    }

    fn describe_index_sql(&self, table: &str) -> String {
        format!("SHOW INDEXES FROM {}", self.quote_ident(table))
    }
}
