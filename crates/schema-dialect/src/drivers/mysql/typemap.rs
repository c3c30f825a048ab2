//! MySQL native type → abstract column mapping.
//!
//! Covers the descriptors `SHOW FULL COLUMNS` emits. Anything else degrades
//! to a text column instead of failing introspection.

use tracing::warn;

use crate::core::schema::{Column, ColumnKind};
use crate::dialect::NativeType;

/// `CHAR(36)` is how UUID columns are stored.
const UUID_CHAR_LENGTH: u32 = 36;

/// Map a parsed MySQL descriptor to an abstract column.
///
/// Only `kind`, `length`, `precision` and `fixed` are set; nullability,
/// defaults and comments come from elsewhere in the catalog row.
pub(crate) fn native_to_column(native: &NativeType) -> Column {
    let length = native.length();
    let precision = native.precision();

    match native.base() {
        "date" => Column::new(ColumnKind::Date),
        "time" => Column::new(ColumnKind::Time),
        "datetime" => Column::new(ColumnKind::DateTime),
        "timestamp" => Column::new(ColumnKind::Timestamp),

        // MySQL has no native boolean; BOOLEAN is an alias for TINYINT(1).
        "tinyint" if length == Some(1) => Column::new(ColumnKind::Boolean),
        "boolean" | "bool" => Column::new(ColumnKind::Boolean),

        "bigint" => with_length(Column::new(ColumnKind::BigInteger), length),
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" => {
            with_length(Column::new(ColumnKind::Integer), length)
        }

        "char" if length == Some(UUID_CHAR_LENGTH) => Column::new(ColumnKind::Uuid),
        "char" => with_length(Column::new(ColumnKind::String).fixed(), length),
        "varchar" => with_length(Column::new(ColumnKind::String), length),
        "tinytext" => Column::new(ColumnKind::String),
        "text" | "mediumtext" | "longtext" => Column::new(ColumnKind::Text),

        "tinyblob" | "blob" | "mediumblob" | "longblob" | "binary" | "varbinary" => {
            Column::new(ColumnKind::Binary)
        }

        "float" | "double" | "real" => {
            with_precision(with_length(Column::new(ColumnKind::Float), length), precision)
        }
        "decimal" | "numeric" | "dec" | "fixed" => {
            with_precision(with_length(Column::new(ColumnKind::Decimal), length), precision)
        }

        _ => {
            warn!(
                "Unrecognized MySQL column type '{}', treating it as text",
                native.raw()
            );
            Column::new(ColumnKind::Text)
        }
    }
}

fn with_length(mut column: Column, length: Option<u32>) -> Column {
    column.length = length;
    column
}

fn with_precision(mut column: Column, precision: Option<u32>) -> Column {
    column.precision = precision;
    column
}
