//! Searchable records and the document commands built from them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Field name to value mapping of an indexable record.
pub type FieldMap = Map<String, Value>;

/// Identifier correlating a search hit back to its source record.
///
/// The vendor returns every field value as it was indexed, which for numeric
/// keys is frequently the string form (`"5"`). Ids are therefore kept in
/// their string form so that `5` and `"5"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Build an id from a JSON scalar. Returns `None` for null, arrays and objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            Value::Bool(b) => Some(Self(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

macro_rules! document_id_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DocumentId {
                fn from(id: $t) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

document_id_from_int!(i32, i64, u32, u64, usize);

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("document id must be a string or a number"))
    }
}

/// A record that can be pushed to and found through the search platform.
pub trait Searchable: Send + Sync {
    /// Stable identifier of the record.
    fn search_key(&self) -> DocumentId;

    /// Fields to index. An empty map means the record is not indexed.
    fn to_searchable_fields(&self) -> FieldMap;

    /// Vendor application the record's documents belong to.
    fn search_app_name(&self) -> String;

    /// Vendor table inside the application.
    fn search_table_name(&self) -> String;

    /// Field results are sorted on when the caller gives no explicit sort.
    fn sort_field(&self) -> Option<String> {
        None
    }
}

/// Operation carried by a document command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandKind {
    Add,
    Delete,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Add => f.write_str("ADD"),
            CommandKind::Delete => f.write_str("DELETE"),
        }
    }
}

/// A single add/delete instruction for the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCommand {
    pub cmd: CommandKind,
    pub fields: FieldMap,
}

impl DocumentCommand {
    /// Build the command for `record`, or `None` when it has nothing to index.
    pub fn from_record<R: Searchable + ?Sized>(cmd: CommandKind, record: &R) -> Option<Self> {
        let fields = record.to_searchable_fields();
        if fields.is_empty() {
            return None;
        }
        Some(Self { cmd, fields })
    }
}
