//! Random tables and their rows.
//!
//! A [`Table`] is a named set of rows, each claiming an inclusive
//! `floor..=ceiling` slice of the roll domain `1..=max_roll`. Rows are
//! expected to partition the domain, but the model does not enforce it —
//! the engine tolerates gaps and overlaps and reports them as warnings.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Default column headers for new tables.
pub const DEFAULT_HEADERS: [&str; 2] = ["ROLL", "RESULT"];

/// Current table schema version, stored in every table file.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Discriminator for the kind of result a row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// Plain text, possibly containing `[[ TAG ]]` tokens.
    Text,
    /// A reference to another table by tag.
    Table,
    /// A structured object result.
    Object,
}

/// The value a table row resolves to.
///
/// Stored in JSON as a bare string, a `{"tag": "..."}` object, or any other
/// object. An object whose *only* key is `tag` is a table reference;
/// anything else with a `tag` field is just an object. This is a deliberate
/// tightening of the original duck-typed check.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    /// Plain text, possibly containing `[[ TAG ]]` tokens.
    Text(String),
    /// A cross-table reference by tag.
    Reference {
        /// Tag of the referenced table.
        tag: String,
    },
    /// An arbitrary JSON object; string-valued fields may contain tokens.
    Object(serde_json::Map<String, serde_json::Value>),
}

impl ResultValue {
    /// Build a text result.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Build a table reference result.
    pub fn reference(tag: impl Into<String>) -> Self {
        Self::Reference { tag: tag.into() }
    }

    /// The text content, if this is a text result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for ResultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Reference { tag } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("tag", tag)?;
                map.end()
            }
            Self::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ResultValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self::Text(s)),
            serde_json::Value::Object(map) => match (map.len(), map.get("tag")) {
                (1, Some(serde_json::Value::String(tag))) => {
                    Ok(Self::Reference { tag: tag.clone() })
                }
                _ => Ok(Self::Object(map)),
            },
            other => Err(D::Error::custom(format!(
                "result must be a string or object, got: {other}"
            ))),
        }
    }
}

/// One row of a random table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Lower bound of the roll range (inclusive).
    pub floor: u32,
    /// Upper bound of the roll range (inclusive).
    pub ceiling: u32,
    /// Editor-facing weight hint. Never authoritative for rolling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Kind of result this row carries.
    pub result_type: ResultType,
    /// The result value.
    pub result: ResultValue,
}

impl TableRow {
    /// A text row covering `floor..=ceiling`.
    pub fn text(floor: u32, ceiling: u32, result: impl Into<String>) -> Self {
        Self {
            floor,
            ceiling,
            weight: None,
            result_type: ResultType::Text,
            result: ResultValue::Text(result.into()),
        }
    }

    /// Whether `roll` falls inside this row's range.
    pub fn contains(&self, roll: u32) -> bool {
        roll >= self.floor && roll <= self.ceiling
    }
}

/// A random table: rows plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Unique identifier (UUIDv4).
    pub id: String,
    /// Schema version for migration support.
    pub schema_version: u32,
    /// Filesystem path this table was loaded from, if any.
    #[serde(default)]
    pub source_path: String,
    /// Optional semantic grouping (e.g. "oracle", "encounter").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_type: Option<String>,
    /// Optional display category for organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Display name of the table.
    pub name: String,
    /// Tags used for table reference resolution and dice-notation hints.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Description of the table.
    #[serde(default)]
    pub description: String,
    /// Numeric roll domain (e.g. 100, 66, 88).
    pub max_roll: u32,
    /// Column headers for display.
    #[serde(default = "default_headers")]
    pub headers: Vec<String>,
    /// The table rows.
    pub table_data: Vec<TableRow>,
}

fn default_headers() -> Vec<String> {
    DEFAULT_HEADERS.iter().map(|h| (*h).to_string()).collect()
}

impl Table {
    /// Create an empty table with defaults filled in.
    pub fn new(name: impl Into<String>, max_roll: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            schema_version: CURRENT_SCHEMA_VERSION,
            source_path: String::new(),
            table_type: None,
            category: None,
            name: name.into(),
            tags: Vec::new(),
            description: String::new(),
            max_roll,
            headers: default_headers(),
            table_data: Vec::new(),
        }
    }

    /// All rows whose range contains `roll`, in table order.
    pub fn rows_matching(&self, roll: u32) -> Vec<&TableRow> {
        self.table_data.iter().filter(|r| r.contains(roll)).collect()
    }

    /// Whether any tag on this table equals `tag` (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
