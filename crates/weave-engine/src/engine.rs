//! Table rolling: mode detection, row matching, and soft failure handling.
//!
//! Rolling never errors on malformed data. A roll that lands in a gap
//! produces the `[NO MATCH]` sentinel plus a warning; a roll covered by
//! several rows picks one uniformly at random and warns. Token resolution
//! is a separate layer — see [`crate::resolver`].

use weave_core::{ResultValue, RollMode, RollOptions, RollResult, Table};

use crate::rng::SeededRng;

/// Sentinel result for a roll no row covered.
pub const NO_MATCH: &str = "[NO MATCH]";

/// Determine how roll values for `table` are generated.
///
/// The first tag that looks like dice notation wins, if it names a
/// supported mode. Otherwise `max_roll` 66 and 88 mark legacy d66/d88
/// tables, and everything else rolls a single uniform die.
pub fn roll_mode(table: &Table) -> RollMode {
    let tag_mode = table
        .tags
        .iter()
        .find(|t| RollMode::is_dice_tag(t))
        .and_then(|t| RollMode::from_tag(t));
    if let Some(mode) = tag_mode {
        return mode;
    }

    match table.max_roll {
        66 => RollMode::D66,
        88 => RollMode::D88,
        _ => RollMode::Standard,
    }
}

/// All roll values `mode` can produce on a table with `max_roll`.
///
/// Used by validation to decide which values a table's rows must cover:
/// d66/d88 domains are sparse, and 2dX never rolls a 1.
pub fn valid_rolls(mode: RollMode, max_roll: u32) -> Vec<u32> {
    match mode {
        RollMode::Standard => (1..=max_roll).collect(),
        RollMode::D66 => (1..=6)
            .flat_map(|tens| (1..=6).map(move |ones| tens * 10 + ones))
            .collect(),
        RollMode::D88 => (1..=8)
            .flat_map(|tens| (1..=8).map(move |ones| tens * 10 + ones))
            .collect(),
        RollMode::TwoD(sides) => (2..=sides * 2).collect(),
    }
}

/// Roll on a table.
///
/// The same seed, table, and (present or absent) forced roll value always
/// produce the same [`RollResult`]. Anomalies — gaps, overlapping rows —
/// surface as warnings, never as errors, so one bad table cannot abort a
/// larger resolution chain.
pub fn roll(table: &Table, options: &RollOptions) -> RollResult {
    let mut rng = SeededRng::new(options.seed.clone());
    let mut warnings = Vec::new();

    let roll_value = options
        .roll_value
        .unwrap_or_else(|| generate_roll_value(&mut rng, table));

    let matches = table.rows_matching(roll_value);

    let selected = match matches.len() {
        0 => {
            warnings.push(format!(
                "No match found for roll {roll_value} on table \"{}\"",
                table.name
            ));
            None
        }
        1 => Some(matches[0]),
        n => {
            warnings.push(format!(
                "Multiple matches ({n}) for roll {roll_value} on table \"{}\"",
                table.name
            ));
            let index = rng.int(0, (n - 1) as u32) as usize;
            Some(matches[index])
        }
    };

    RollResult {
        seed: rng.seed().to_string(),
        table_chain: vec![table.name.clone()],
        rolls: vec![roll_value],
        warnings,
        result: selected.map_or_else(|| ResultValue::text(NO_MATCH), |row| row.result.clone()),
    }
}

fn generate_roll_value(rng: &mut SeededRng, table: &Table) -> u32 {
    match roll_mode(table) {
        RollMode::D66 => rng.d66(),
        RollMode::D88 => rng.d88(),
        RollMode::TwoD(sides) => rng.int(1, sides) + rng.int(1, sides),
        // maxRoll 0 is loadable from JSON; roll a fixed 1 so the row
        // matcher reports the gap instead of panicking on an empty range.
        RollMode::Standard => rng.int(1, table.max_roll.max(1)),
    }
}
