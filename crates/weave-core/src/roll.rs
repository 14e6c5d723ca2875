//! Roll results, roll options, and roll modes.

use serde::{Deserialize, Serialize};

use crate::table::ResultValue;

/// The outcome of one `roll()` call. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResult {
    /// The RNG seed used for this roll (for reproducibility).
    pub seed: String,
    /// Chain of table names traversed during resolution.
    pub table_chain: Vec<String>,
    /// Numeric roll values at each step.
    pub rolls: Vec<u32>,
    /// Warnings generated along the way (gaps, duplicates, cycles).
    pub warnings: Vec<String>,
    /// The resolved result. May still contain tokens before resolution.
    pub result: ResultValue,
}

/// Options for a single roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOptions {
    /// Seed for deterministic RNG. A fresh one is generated when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    /// Force a specific roll value, bypassing the RNG entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_value: Option<u32>,
}

impl RollOptions {
    /// Options with a fixed seed.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Options with a forced roll value.
    pub fn with_roll_value(mut self, value: u32) -> Self {
        self.roll_value = Some(value);
        self
    }
}

/// How the roll value for a table is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollMode {
    /// A single uniform roll over `1..=max_roll`.
    Standard,
    /// Two d6 combined as tens and ones (sparse 11..66).
    D66,
    /// Two d8 combined as tens and ones (sparse 11..88).
    D88,
    /// The sum of two dice with the given number of sides.
    TwoD(u32),
}

impl RollMode {
    /// Parse an explicit dice-notation tag: `d66`, `d88`, or
    /// `2d6`/`2d8`/`2d10`/`2d12`/`2d20`. Case-insensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        match tag.as_str() {
            "d66" => Some(Self::D66),
            "d88" => Some(Self::D88),
            "2d6" => Some(Self::TwoD(6)),
            "2d8" => Some(Self::TwoD(8)),
            "2d10" => Some(Self::TwoD(10)),
            "2d12" => Some(Self::TwoD(12)),
            "2d20" => Some(Self::TwoD(20)),
            _ => None,
        }
    }

    /// Whether `tag` even looks like dice notation (`d66`, `d88`, `2dN`).
    ///
    /// A tag can look like notation without naming a supported mode
    /// (e.g. `2d7`); such tables fall back to max-roll detection.
    pub fn is_dice_tag(tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        if tag == "d66" || tag == "d88" {
            return true;
        }
        tag.strip_prefix("2d")
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
    }
}

impl std::fmt::Display for RollMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::D66 => write!(f, "d66"),
            Self::D88 => write!(f, "d88"),
            Self::TwoD(sides) => write!(f, "2d{sides}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_mode_from_tag() {
        assert_eq!(RollMode::from_tag("d66"), Some(RollMode::D66));
        assert_eq!(RollMode::from_tag("D88"), Some(RollMode::D88));
        assert_eq!(RollMode::from_tag("2d6"), Some(RollMode::TwoD(6)));
        assert_eq!(RollMode::from_tag("2D20"), Some(RollMode::TwoD(20)));
        assert_eq!(RollMode::from_tag("2d7"), None);
        assert_eq!(RollMode::from_tag("oracle"), None);
    }

    #[test]
    fn dice_tag_detection() {
        assert!(RollMode::is_dice_tag("d66"));
        assert!(RollMode::is_dice_tag("2d12"));
        assert!(RollMode::is_dice_tag("2d7")); // looks like notation, unsupported mode
        assert!(!RollMode::is_dice_tag("d20"));
        assert!(!RollMode::is_dice_tag("2dx"));
        assert!(!RollMode::is_dice_tag("encounter"));
    }

    #[test]
    fn roll_mode_display() {
        assert_eq!(RollMode::Standard.to_string(), "standard");
        assert_eq!(RollMode::TwoD(10).to_string(), "2d10");
    }

    #[test]
    fn roll_options_builders() {
        let opts = RollOptions::default()
            .with_seed("abc")
            .with_roll_value(42);
        assert_eq!(opts.seed.as_deref(), Some("abc"));
        assert_eq!(opts.roll_value, Some(42));
    }

    #[test]
    fn roll_result_json_uses_camel_case() {
        let result = RollResult {
            seed: "s".to_string(),
            table_chain: vec!["Loot".to_string()],
            rolls: vec![4],
            warnings: Vec::new(),
            result: ResultValue::text("Gold"),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"tableChain\""));
        assert!(json.contains("\"rolls\":[4]"));
    }
}
