//! Scalar values handed to the quoting provider.
//!
//! DDL only quotes small literals: column defaults and comments.

use std::borrow::Cow;
use std::fmt;

/// Scalar literal that a [`Quoter`](super::Quoter) turns into SQL text.
///
/// Uses `Cow` for text so comments and defaults can be quoted straight from
/// the schema model without cloning.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue<'a> {
    /// SQL NULL.
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer.
    Int(i64),

    /// Floating point.
    Float(f64),

    /// Text data with zero-copy support.
    Text(Cow<'a, str>),
}

impl<'a> SqlValue<'a> {
    /// Convert to a fully owned value with `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> SqlValue<'static> {
        match self {
            SqlValue::Null => SqlValue::Null,
            SqlValue::Bool(v) => SqlValue::Bool(v),
            SqlValue::Int(v) => SqlValue::Int(v),
            SqlValue::Float(v) => SqlValue::Float(v),
            SqlValue::Text(v) => SqlValue::Text(Cow::Owned(v.into_owned())),
        }
    }

    /// Check if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// Unquoted textual form. Quoters wrap and escape this.
impl fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Bool(true) => write!(f, "1"),
            SqlValue::Bool(false) => write!(f, "0"),
            SqlValue::Int(v) => write!(f, "{}", v),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl<'a> From<&'a str> for SqlValue<'a> {
    fn from(v: &'a str) -> Self {
        SqlValue::Text(Cow::Borrowed(v))
    }
}

impl From<String> for SqlValue<'static> {
    fn from(v: String) -> Self {
        SqlValue::Text(Cow::Owned(v))
    }
}

impl From<i64> for SqlValue<'static> {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<bool> for SqlValue<'static> {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_unquoted() {
        assert_eq!(SqlValue::from("admin").to_string(), "admin");
        assert_eq!(SqlValue::Int(-3).to_string(), "-3");
        assert_eq!(SqlValue::Bool(true).to_string(), "1");
        assert_eq!(SqlValue::Null.to_string(), "NULL");
    }

    #[test]
    fn test_into_owned() {
        let text = String::from("borrowed");
        let borrowed = SqlValue::from(text.as_str());
        let owned: SqlValue<'static> = borrowed.into_owned();
        drop(text);
        assert_eq!(owned, SqlValue::Text(Cow::Owned("borrowed".into())));
        assert!(!owned.is_null());
    }
}
