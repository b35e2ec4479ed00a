//! Share, schema and table descriptors plus the file entries a table query yields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A share exposed by the sharing server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareDescriptor {
    pub name: String,
}

impl ShareDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A schema within a share.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub name: String,
}

impl SchemaDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Fully qualified reference to one shared table.
///
/// Equality is structural on the `(share, schema, name)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Share the table belongs to
    pub share: String,
    /// Schema within the share
    pub schema: String,
    /// Table name
    pub name: String,
}

impl TableDescriptor {
    /// Create a new table descriptor.
    pub fn new(
        share: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            share: share.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Get the dotted `share.schema.table` form used in logs and output.
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.share, self.schema, self.name)
    }
}

/// Error returned when a dotted table reference cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid table reference '{input}': expected <share>.<schema>.<table>")]
pub struct TableParseError {
    /// The rejected input
    pub input: String,
}

impl FromStr for TableDescriptor {
    type Err = TableParseError;

    /// Parse `share.schema.table`. Everything after the second dot is the table name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().splitn(3, '.').collect();
        match parts.as_slice() {
            [share, schema, name]
                if !share.is_empty() && !schema.is_empty() && !name.is_empty() =>
            {
                Ok(Self::new(*share, *schema, *name))
            }
            _ => Err(TableParseError {
                input: s.to_string(),
            }),
        }
    }
}

/// One data file of a table, as returned by a table query.
///
/// The URL is pre-signed and time-limited; it is used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Signed download URL
    pub url: String,
    /// Server-side file id, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// File size in bytes, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileEntry {
    /// Create a file entry with only a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            id: None,
            size: None,
        }
    }

    /// Attach a size in bytes.
    #[must_use]
    pub const fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}
