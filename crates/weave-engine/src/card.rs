//! Roll-card formatting for session logs.
//!
//! Turns a [`RollResult`] into the header/result/content triple session
//! logs and the CLI print. Formatting failures are impossible by
//! construction — a card is always produced, warnings included.

use weave_core::{ResultValue, RollResult};

/// A formatted roll, ready for a session log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollCard {
    /// Card header: the table that was rolled.
    pub header: String,
    /// One-line result summary.
    pub result: String,
    /// Multi-line detail: roll values, table chain, warnings.
    pub content: String,
}

impl RollCard {
    /// Build a card from a roll on `table_name`.
    pub fn from_roll(table_name: &str, roll: &RollResult) -> Self {
        let result = display_value(&roll.result);

        let mut lines = vec![format!(
            "Roll: {} → {result}",
            format_rolls(&roll.rolls)
        )];
        if roll.table_chain.len() > 1 {
            lines.push(format!("Chain: {}", roll.table_chain.join(" → ")));
        }
        if !roll.warnings.is_empty() {
            lines.push(format!("Warnings: {}", roll.warnings.join("; ")));
        }
        lines.push(format!("Seed: {}", roll.seed));

        Self {
            header: table_name.to_string(),
            result,
            content: lines.join("\n"),
        }
    }
}

impl std::fmt::Display for RollCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{}", self.content)?;
        write!(f, "= {}", self.result)
    }
}

/// Roll values joined for display: `4`, `12 → 3 → 55`, or `N/A`.
pub fn format_rolls(rolls: &[u32]) -> String {
    if rolls.is_empty() {
        return "N/A".to_string();
    }
    rolls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Human-readable form of a result value: text verbatim, references by
/// tag, objects by their `name`/`id` field or pretty JSON.
pub fn display_value(value: &ResultValue) -> String {
    match value {
        ResultValue::Text(s) => s.clone(),
        ResultValue::Reference { tag } => tag.clone(),
        ResultValue::Object(map) => {
            for key in ["name", "id"] {
                if let Some(serde_json::Value::String(s)) = map.get(key) {
                    return s.clone();
                }
            }
            serde_json::to_string_pretty(map).unwrap_or_else(|_| "{}".to_string())
        }
    }
}
