//! Abstract schema model: tables, columns, constraints, indexes and options.
//!
//! These types are dialect-neutral. A [`Table`] is assembled incrementally by
//! a caller (migration code or [`SchemaCollection`](crate::SchemaCollection)),
//! then handed to a dialect which reads it without mutating it.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::identifier::{validate_identifier, validate_option_value};
use super::traits::{Connection, SchemaDialect};
use super::value::SqlValue;
use crate::error::{Result, SchemaError};

/// Abstract column kind.
///
/// Serialized as its lowercase name (`"string"`, `"biginteger"`, ...). Names
/// outside the abstract type system deserialize into [`ColumnKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnKind {
    /// Character data, variable (`VARCHAR`) or fixed (`CHAR`).
    String,
    /// Long character data.
    Text,
    Integer,
    BigInteger,
    Boolean,
    /// Approximate numeric; `length`/`precision` are display width and digits.
    Float,
    /// Exact numeric; `length`/`precision` are total and fractional digits.
    Decimal,
    Date,
    Time,
    DateTime,
    Timestamp,
    Binary,
    Uuid,
    /// Kind name not known to the abstract type system.
    Other(String),
}

impl ColumnKind {
    /// Lowercase kind name.
    pub fn as_str(&self) -> &str {
        match self {
            ColumnKind::String => "string",
            ColumnKind::Text => "text",
            ColumnKind::Integer => "integer",
            ColumnKind::BigInteger => "biginteger",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Float => "float",
            ColumnKind::Decimal => "decimal",
            ColumnKind::Date => "date",
            ColumnKind::Time => "time",
            ColumnKind::DateTime => "datetime",
            ColumnKind::Timestamp => "timestamp",
            ColumnKind::Binary => "binary",
            ColumnKind::Uuid => "uuid",
            ColumnKind::Other(name) => name,
        }
    }

    /// Integer kinds eligible for auto-increment.
    pub fn is_integer(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::BigInteger)
    }

    /// Kinds that accept the bare `CURRENT_TIMESTAMP` default.
    pub fn accepts_current_timestamp(&self) -> bool {
        matches!(self, ColumnKind::Timestamp | ColumnKind::DateTime)
    }

    /// Kinds for which `precision` is meaningful.
    pub fn has_precision(&self) -> bool {
        matches!(self, ColumnKind::Float | ColumnKind::Decimal)
    }
}

impl From<&str> for ColumnKind {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "string" => ColumnKind::String,
            "text" => ColumnKind::Text,
            "integer" => ColumnKind::Integer,
            "biginteger" => ColumnKind::BigInteger,
            "boolean" => ColumnKind::Boolean,
            "float" => ColumnKind::Float,
            "decimal" => ColumnKind::Decimal,
            "date" => ColumnKind::Date,
            "time" => ColumnKind::Time,
            "datetime" => ColumnKind::DateTime,
            "timestamp" => ColumnKind::Timestamp,
            "binary" => ColumnKind::Binary,
            "uuid" => ColumnKind::Uuid,
            other => ColumnKind::Other(other.to_string()),
        }
    }
}

impl From<String> for ColumnKind {
    fn from(name: String) -> Self {
        ColumnKind::from(name.as_str())
    }
}

impl From<ColumnKind> for String {
    fn from(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column default value.
///
/// `CurrentTimestamp` is the symbolic keyword; it is never quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DefaultRepr", into = "DefaultRepr")]
pub enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    CurrentTimestamp,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DefaultRepr {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl From<DefaultRepr> for DefaultValue {
    fn from(repr: DefaultRepr) -> Self {
        match repr {
            DefaultRepr::Bool(v) => DefaultValue::Bool(v),
            DefaultRepr::Integer(v) => DefaultValue::Integer(v),
            DefaultRepr::Float(v) => DefaultValue::Float(v),
            DefaultRepr::String(v) => DefaultValue::from(v),
        }
    }
}

impl From<DefaultValue> for DefaultRepr {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Bool(v) => DefaultRepr::Bool(v),
            DefaultValue::Integer(v) => DefaultRepr::Integer(v),
            DefaultValue::Float(v) => DefaultRepr::Float(v),
            DefaultValue::String(v) => DefaultRepr::String(v),
            DefaultValue::CurrentTimestamp => {
                DefaultRepr::String(DefaultValue::CURRENT_TIMESTAMP.to_string())
            }
        }
    }
}

impl DefaultValue {
    /// SQL keyword for the current-timestamp default.
    pub const CURRENT_TIMESTAMP: &'static str = "CURRENT_TIMESTAMP";

    /// Check whether a raw default names the current-timestamp keyword.
    ///
    /// Accepts `current_timestamp` in any case, with or without `()`.
    pub fn is_current_timestamp_keyword(raw: &str) -> bool {
        let raw = raw.trim();
        let raw = raw.strip_suffix("()").unwrap_or(raw);
        raw.eq_ignore_ascii_case(Self::CURRENT_TIMESTAMP)
    }

    /// Interpret a default as reported by a catalog (always text) for a
    /// column of the given kind.
    pub fn from_catalog(raw: &str, kind: &ColumnKind) -> Self {
        if kind.accepts_current_timestamp() && Self::is_current_timestamp_keyword(raw) {
            return DefaultValue::CurrentTimestamp;
        }
        match kind {
            ColumnKind::Boolean => match raw {
                "0" => DefaultValue::Bool(false),
                "1" => DefaultValue::Bool(true),
                _ => DefaultValue::String(raw.to_string()),
            },
            ColumnKind::Integer | ColumnKind::BigInteger => raw
                .parse::<i64>()
                .map(DefaultValue::Integer)
                .unwrap_or_else(|_| DefaultValue::String(raw.to_string())),
            _ => DefaultValue::String(raw.to_string()),
        }
    }

    pub fn is_current_timestamp(&self) -> bool {
        matches!(self, DefaultValue::CurrentTimestamp)
    }

    /// Scalar to hand to the quoting provider.
    pub fn to_sql_value(&self) -> SqlValue<'_> {
        match self {
            DefaultValue::Bool(v) => SqlValue::Bool(*v),
            DefaultValue::Integer(v) => SqlValue::Int(*v),
            DefaultValue::Float(v) => SqlValue::Float(*v),
            DefaultValue::String(v) => SqlValue::from(v.as_str()),
            DefaultValue::CurrentTimestamp => SqlValue::from(Self::CURRENT_TIMESTAMP),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        if Self::is_current_timestamp_keyword(v) {
            DefaultValue::CurrentTimestamp
        } else {
            DefaultValue::String(v.to_string())
        }
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        if Self::is_current_timestamp_keyword(&v) {
            DefaultValue::CurrentTimestamp
        } else {
            DefaultValue::String(v)
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        DefaultValue::Bool(v)
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        DefaultValue::Integer(v)
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        DefaultValue::Float(v)
    }
}

/// Column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Abstract kind.
    #[serde(rename = "type")]
    pub kind: ColumnKind,

    /// Nullability. `None` leaves the engine default (nullable) in place;
    /// `Some(true)` asks for an explicit NULL default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null: Option<bool>,

    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,

    /// Length; meaning depends on the kind (characters, display width, digits).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Fractional digits for decimal/float.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    /// Fixed-width string (`CHAR` instead of `VARCHAR`).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fixed: bool,

    /// Column comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Column {
    /// Create a column of the given kind with every attribute unset.
    pub fn new(kind: impl Into<ColumnKind>) -> Self {
        Self {
            kind: kind.into(),
            null: None,
            default: None,
            length: None,
            precision: None,
            fixed: false,
            comment: None,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Mark a string column as fixed width.
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.null = Some(false);
        self
    }

    /// Explicitly nullable (renders a NULL default).
    pub fn nullable(mut self) -> Self {
        self.null = Some(true);
        self
    }

    pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Whether the column accepts NULL. Unset nullability means yes.
    pub fn is_nullable(&self) -> bool {
        self.null != Some(false)
    }
}

impl From<ColumnKind> for Column {
    fn from(kind: ColumnKind) -> Self {
        Column::new(kind)
    }
}

impl From<&str> for Column {
    fn from(kind: &str) -> Self {
        Column::new(kind)
    }
}

/// Constraint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Primary,
    Unique,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Primary => "primary",
            ConstraintKind::Unique => "unique",
        }
    }
}

/// Table constraint (primary key or unique key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(rename = "type")]
    pub kind: ConstraintKind,

    /// Member columns in declaration order.
    pub columns: Vec<String>,

    /// Prefix lengths keyed by member column.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub length: IndexMap<String, u32>,
}

impl Constraint {
    pub fn new<I, S>(kind: ConstraintKind, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
            length: IndexMap::new(),
        }
    }

    pub fn primary<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ConstraintKind::Primary, columns)
    }

    pub fn unique<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ConstraintKind::Unique, columns)
    }

    /// Register a prefix length for a member column.
    pub fn with_length(mut self, column: impl Into<String>, length: u32) -> Self {
        self.length.insert(column.into(), length);
        self
    }

    pub fn prefix_length(&self, column: &str) -> Option<u32> {
        self.length.get(column).copied()
    }
}

/// Index kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Index,
    Fulltext,
    Spatial,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Index => "index",
            IndexKind::Fulltext => "fulltext",
            IndexKind::Spatial => "spatial",
        }
    }
}

/// Non-unique table index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    #[serde(rename = "type")]
    pub kind: IndexKind,

    /// Member columns in declaration order.
    pub columns: Vec<String>,

    /// Prefix lengths keyed by member column.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub length: IndexMap<String, u32>,
}

impl Index {
    pub fn new<I, S>(kind: IndexKind, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
            length: IndexMap::new(),
        }
    }

    /// Plain `KEY` index.
    pub fn plain<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(IndexKind::Index, columns)
    }

    pub fn fulltext<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(IndexKind::Fulltext, columns)
    }

    pub fn spatial<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(IndexKind::Spatial, columns)
    }

    /// Register a prefix length for a member column.
    pub fn with_length(mut self, column: impl Into<String>, length: u32) -> Self {
        self.length.insert(column.into(), length);
        self
    }

    pub fn prefix_length(&self, column: &str) -> Option<u32> {
        self.length.get(column).copied()
    }
}

/// Engine-level table options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Storage engine (e.g. `InnoDB`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Default character set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,

    /// Default collation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collate: Option<String>,
}

impl TableOptions {
    pub fn is_empty(&self) -> bool {
        self.engine.is_none() && self.charset.is_none() && self.collate.is_none()
    }

    /// Set options as `(key, value)` pairs in DDL order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("engine", &self.engine),
            ("charset", &self.charset),
            ("collate", &self.collate),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }

    /// Fill unset options from `defaults`; options already set win.
    pub fn merge_defaults(&mut self, defaults: &TableOptions) {
        if self.engine.is_none() {
            self.engine = defaults.engine.clone();
        }
        if self.charset.is_none() {
            self.charset = defaults.charset.clone();
        }
        if self.collate.is_none() {
            self.collate = defaults.collate.clone();
        }
    }
}

/// Table definition.
///
/// Columns, constraints and indexes keep insertion order, which drives the
/// order of clauses in generated DDL.
///
/// # Example
///
/// ```rust
/// use schema_dialect::{Column, Constraint, Table};
///
/// let table = Table::new("posts")
///     .add_column("id", Column::new("integer").not_null())
///     .add_column("title", Column::new("string").with_length(100))
///     .add_constraint("primary", Constraint::primary(["id"]))
///     .unwrap();
/// assert_eq!(table.primary_key(), ["id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,

    #[serde(default)]
    columns: IndexMap<String, Column>,

    #[serde(default)]
    constraints: IndexMap<String, Constraint>,

    #[serde(default)]
    indexes: IndexMap<String, Index>,

    #[serde(default)]
    options: TableOptions,

    #[serde(default)]
    temporary: bool,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
            constraints: IndexMap::new(),
            indexes: IndexMap::new(),
            options: TableOptions::default(),
            temporary: false,
        }
    }

    /// Add a column. Re-adding a name replaces the definition in place.
    pub fn add_column(mut self, name: impl Into<String>, column: impl Into<Column>) -> Self {
        self.columns.insert(name.into(), column.into());
        self
    }

    /// Add a constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MalformedSchema`] if a member column is not
    /// defined, a prefix length names a non-member, or a second primary key
    /// is declared under a different name.
    pub fn add_constraint(mut self, name: impl Into<String>, constraint: Constraint) -> Result<Self> {
        let name = name.into();
        self.check_members("constraint", &name, &constraint.columns, &constraint.length)?;
        if constraint.kind == ConstraintKind::Primary {
            if let Some((existing, _)) = self
                .constraints
                .iter()
                .find(|(n, c)| c.kind == ConstraintKind::Primary && **n != name)
            {
                return Err(SchemaError::malformed(
                    &self.name,
                    format!(
                        "constraint '{}' cannot be a primary key, '{}' already is",
                        name, existing
                    ),
                ));
            }
        }
        self.constraints.insert(name, constraint);
        Ok(self)
    }

    /// Add an index.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MalformedSchema`] if a member column is not
    /// defined or a prefix length names a non-member.
    pub fn add_index(mut self, name: impl Into<String>, index: Index) -> Result<Self> {
        let name = name.into();
        self.check_members("index", &name, &index.columns, &index.length)?;
        self.indexes.insert(name, index);
        Ok(self)
    }

    /// Replace the table options.
    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Fill unset options from configured defaults.
    pub fn with_default_options(mut self, defaults: &TableOptions) -> Self {
        self.options.merge_defaults(defaults);
        self
    }

    /// Mark the table as temporary (`CREATE TEMPORARY TABLE`).
    pub fn temporary(mut self, temporary: bool) -> Self {
        self.temporary = temporary;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &IndexMap<String, Column> {
        &self.columns
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn column_kind(&self, name: &str) -> Option<&ColumnKind> {
        self.columns.get(name).map(|c| &c.kind)
    }

    /// Primary key member columns, empty when no primary constraint exists.
    pub fn primary_key(&self) -> &[String] {
        self.constraints
            .values()
            .find(|c| c.kind == ConstraintKind::Primary)
            .map(|c| c.columns.as_slice())
            .unwrap_or(&[])
    }

    pub fn constraints(&self) -> &IndexMap<String, Constraint> {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.get(name)
    }

    pub fn indexes(&self) -> &IndexMap<String, Index> {
        &self.indexes
    }

    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.get(name)
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    /// Check the whole definition before generation.
    ///
    /// Tables built through the `add_*` methods are already consistent; this
    /// catches deserialized definitions, invalid identifiers and option
    /// values that are not bare names.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.name)?;
        for (_, value) in self.options.entries() {
            validate_option_value(value)?;
        }
        for name in self.columns.keys() {
            validate_identifier(name)?;
        }
        let mut primaries = 0;
        for (name, constraint) in &self.constraints {
            validate_identifier(name)?;
            self.check_members("constraint", name, &constraint.columns, &constraint.length)?;
            if constraint.kind == ConstraintKind::Primary {
                primaries += 1;
            }
        }
        if primaries > 1 {
            return Err(SchemaError::malformed(
                &self.name,
                format!("{} primary key constraints declared", primaries),
            ));
        }
        for (name, index) in &self.indexes {
            validate_identifier(name)?;
            self.check_members("index", name, &index.columns, &index.length)?;
        }
        Ok(())
    }

    /// Generate the statements creating this table.
    ///
    /// The MySQL dialect yields exactly one statement.
    pub fn create_sql(&self, connection: &dyn Connection) -> Result<Vec<String>> {
        self.validate()?;
        let dialect = connection.dialect();

        let columns = self
            .columns
            .keys()
            .map(|name| dialect.column_sql(self, name))
            .collect::<Result<Vec<_>>>()?;
        let constraints = self
            .constraints
            .keys()
            .map(|name| dialect.constraint_sql(self, name))
            .collect::<Result<Vec<_>>>()?;
        let indexes = self
            .indexes
            .keys()
            .map(|name| dialect.index_sql(self, name))
            .collect::<Result<Vec<_>>>()?;

        let statements = dialect.create_table_sql(self, &columns, &constraints, &indexes);
        debug!(
            "{}: generated CREATE for table {} ({} columns, {} constraints, {} indexes)",
            dialect.name(),
            self.name,
            columns.len(),
            constraints.len(),
            indexes.len()
        );
        Ok(statements)
    }

    /// Generate the statements dropping this table.
    pub fn drop_sql(&self, connection: &dyn Connection) -> Result<Vec<String>> {
        validate_identifier(&self.name)?;
        Ok(connection.dialect().drop_table_sql(self))
    }

    /// Generate the statements emptying this table.
    pub fn truncate_sql(&self, connection: &dyn Connection) -> Result<Vec<String>> {
        validate_identifier(&self.name)?;
        Ok(connection.dialect().truncate_table_sql(self))
    }

    fn check_members(
        &self,
        what: &str,
        name: &str,
        columns: &[String],
        lengths: &IndexMap<String, u32>,
    ) -> Result<()> {
        if columns.is_empty() {
            return Err(SchemaError::malformed(
                &self.name,
                format!("{} '{}' has no columns", what, name),
            ));
        }
        if let Some(missing) = columns.iter().find(|c| !self.columns.contains_key(*c)) {
            return Err(SchemaError::malformed(
                &self.name,
                format!(
                    "{} '{}' uses column '{}', which must be added to the table first",
                    what, name, missing
                ),
            ));
        }
        if let Some(stray) = lengths.keys().find(|c| !columns.contains(*c)) {
            return Err(SchemaError::malformed(
                &self.name,
                format!(
                    "{} '{}' sets a prefix length on '{}', which is not a member",
                    what, name, stray
                ),
            ));
        }
        Ok(())
    }
}
