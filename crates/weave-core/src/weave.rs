//! Weaves: routing tables mapping roll ranges to typed targets.
//!
//! Unlike a [`crate::Table`], a weave row never carries literal text — it
//! routes to an aspect, domain, oracle, or oracle combo by id. Weave row
//! ranges are kept contiguous and gapless by construction: the range
//! allocator in the engine crate is their only mutator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of target a weave row routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeaveTarget {
    /// A single oracle table.
    Oracle,
    /// A combination of oracle tables.
    OracleCombo,
    /// An aspect pack (environment category).
    Aspect,
    /// A domain pack (environment category).
    Domain,
}

impl std::fmt::Display for WeaveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oracle => write!(f, "Oracle"),
            Self::OracleCombo => write!(f, "Oracle Combo"),
            Self::Aspect => write!(f, "Aspect"),
            Self::Domain => write!(f, "Domain"),
        }
    }
}

/// One routing row of a weave. `from..=to` is inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaveRow {
    /// Local row identifier.
    pub id: String,
    /// Lower bound of the roll range (inclusive).
    pub from: u32,
    /// Upper bound of the roll range (inclusive).
    pub to: u32,
    /// What kind of target this row routes to.
    pub target_type: WeaveTarget,
    /// Identifier of the target, resolvable by the table registry.
    pub target_id: String,
}

impl WeaveRow {
    /// A new row with a fresh id; range is filled in by the allocator.
    pub fn new(target_type: WeaveTarget, target_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from: 0,
            to: 0,
            target_type,
            target_id: target_id.into(),
        }
    }

    /// Display label for the routed target, e.g. `Aspect: haunted`.
    pub fn target_label(&self) -> String {
        format!("{}: {}", self.target_type, self.target_id)
    }
}

/// A weave: a die size plus routing rows covering `1..=max_roll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weave {
    /// Slug, filename-safe identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Author attribution.
    #[serde(default)]
    pub author: String,
    /// Die size: 10, 20, 100, etc.
    pub max_roll: u32,
    /// Routing rows.
    pub rows: Vec<WeaveRow>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
    /// If true, the editor refuses edits and deletion.
    #[serde(default)]
    pub read_only: bool,
}

impl Weave {
    /// Create an empty weave named `name`, with a slug id derived from it.
    pub fn new(name: impl Into<String>, max_roll: u32) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: slugify(&name),
            name,
            author: String::new(),
            max_roll,
            rows: Vec::new(),
            created_at: now,
            updated_at: now,
            read_only: false,
        }
    }
}

/// Create a slug-safe id from a name: lowercase, runs of non-alphanumerics
/// collapsed to `_`, leading/trailing `_` trimmed.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep && !out.is_empty() {
            out.push('_');
            last_was_sep = true;
        }
    }
    out.trim_end_matches('_').to_string()
}
