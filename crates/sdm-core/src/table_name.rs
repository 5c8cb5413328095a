//! Strongly-typed history table name.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Name of the migration history table, optionally schema-qualified
/// (`"schema.table"`).
///
/// The name is spliced into DDL and DML text, so construction only accepts
/// plain identifiers: each part must match `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Validate and wrap a table name.
    pub fn try_new(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if name.split('.').count() > 2 {
            Some("at most one schema qualifier is allowed")
        } else if !name.split('.').all(is_identifier) {
            Some("only letters, digits and '_' are allowed, and parts may not start with a digit")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CoreError::InvalidTableName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// Wrap a compile-time constant name.
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(
            Self::try_new(name).is_ok(),
            "constant table name must be a valid identifier"
        );
        Self(name.to_string())
    }

    /// Schema qualifier, if the name has one.
    pub fn schema(&self) -> Option<&str> {
        self.0.split_once('.').map(|(schema, _)| schema)
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for TableName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TableName {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl TryFrom<&str> for TableName {
    type Error = CoreError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl From<TableName> for String {
    fn from(name: TableName) -> Self {
        name.0
    }
}

impl PartialEq<str> for TableName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TableName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_qualified_names() {
        assert_eq!(TableName::try_new("__db_version__").unwrap(), "__db_version__");
        let qualified = TableName::try_new("meta.db_version").unwrap();
        assert_eq!(qualified.schema(), Some("meta"));
        let plain = TableName::try_new("db_version").unwrap();
        assert_eq!(plain.schema(), None);
    }

    #[test]
    fn test_rejects_injection_and_empty() {
        for bad in [
            "",
            "v; DROP TABLE x",
            "1version",
            "a.b.c",
            "a.",
            "name'quoted",
            "with space",
        ] {
            assert!(
                matches!(TableName::try_new(bad), Err(CoreError::InvalidTableName { .. })),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: TableName = serde_yaml::from_str("schema_history").unwrap();
        assert_eq!(ok.as_str(), "schema_history");
        assert!(serde_yaml::from_str::<TableName>("\"bad name\"").is_err());
    }
}
