//! Bound parameters and result values exchanged with a session.

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Null,
    Integer(i64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        SqlParam::Text(s)
    }
}

impl From<i64> for SqlParam {
    fn from(n: i64) -> Self {
        SqlParam::Integer(n)
    }
}

impl From<Vec<u8>> for SqlParam {
    fn from(bytes: Vec<u8>) -> Self {
        SqlParam::Blob(bytes)
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlParam::Null, Into::into)
    }
}

/// A single column value read back from a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// One result row, columns in select-list order.
pub type Row = Vec<SqlValue>;

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Raw bytes of a blob, or the UTF-8 bytes of a text value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SqlValue::Blob(b) => Some(b),
            SqlValue::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Take the text out of the value, or `None` if it is not text.
    pub fn into_text(self) -> Option<String> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_conversions() {
        assert_eq!(SqlParam::from("v1"), SqlParam::Text("v1".to_string()));
        assert_eq!(SqlParam::from(None::<&str>), SqlParam::Null);
        assert_eq!(SqlParam::from(Some(7_i64)), SqlParam::Integer(7));
        assert_eq!(SqlParam::from(vec![1_u8, 2]), SqlParam::Blob(vec![1, 2]));
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(SqlValue::Integer(3).as_i64(), Some(3));
        assert_eq!(SqlValue::Text("x".into()).as_str(), Some("x"));
        assert_eq!(SqlValue::Text("x".into()).as_bytes(), Some(&b"x"[..]));
        assert_eq!(SqlValue::Blob(vec![9]).as_bytes(), Some(&[9_u8][..]));
        assert!(SqlValue::Null.is_null());
        assert_eq!(SqlValue::Null.as_str(), None);
        assert_eq!(SqlValue::Real(1.5).into_text(), None);
    }
}
