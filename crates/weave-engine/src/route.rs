//! Weave routing rolls.
//!
//! Weave rows are contiguous and gapless by construction (the range
//! allocator is their only mutator), so a roll that finds no row is a hard
//! precondition violation — unlike table rolls, weave rolls error instead
//! of degrading.

use weave_core::{RollOptions, Weave, WeaveError, WeaveResult, WeaveRow};

use crate::rng::SeededRng;

/// The outcome of rolling a weave: which row the die landed on.
#[derive(Debug, Clone)]
pub struct WeaveRollOutcome {
    /// The seed used, for replay.
    pub seed: String,
    /// The rolled value in `1..=weave.max_roll`.
    pub roll: u32,
    /// The row the roll landed on.
    pub row: WeaveRow,
}

impl WeaveRollOutcome {
    /// Display label for the routed target, e.g. `Oracle: reactions`.
    pub fn target_label(&self) -> String {
        self.row.target_label()
    }
}

impl std::fmt::Display for WeaveRollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.roll, self.target_label())
    }
}

/// Roll on a weave and return the routed row.
///
/// Errors if the weave has no rows or if no row covers the roll (possible
/// only when ranges were edited outside the allocator).
pub fn roll_weave(weave: &Weave, options: &RollOptions) -> WeaveResult<WeaveRollOutcome> {
    if weave.rows.is_empty() {
        return Err(WeaveError::EmptyWeave(weave.id.clone()));
    }

    let mut rng = SeededRng::new(options.seed.clone());
    let roll = options
        .roll_value
        .unwrap_or_else(|| rng.int(1, weave.max_roll));

    let row = weave
        .rows
        .iter()
        .find(|r| roll >= r.from && roll <= r.to)
        .ok_or_else(|| WeaveError::NoRowMatched {
            roll,
            weave: weave.id.clone(),
        })?;

    Ok(WeaveRollOutcome {
        seed: rng.seed().to_string(),
        roll,
        row: row.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::recalculate_ranges;
    use weave_core::WeaveTarget;

    fn sample_weave() -> Weave {
        let mut weave = Weave::new("Wilds", 20);
        let rows = vec![
            WeaveRow::new(WeaveTarget::Aspect, "haunted"),
            WeaveRow::new(WeaveTarget::Domain, "forest"),
            WeaveRow::new(WeaveTarget::Oracle, "events"),
        ];
        weave.rows = recalculate_ranges(&rows, 20);
        weave
    }

    #[test]
    fn empty_weave_errors() {
        let weave = Weave::new("Empty", 10);
        let err = roll_weave(&weave, &RollOptions::default()).unwrap_err();
        assert!(matches!(err, WeaveError::EmptyWeave(_)));
        assert_eq!(err.to_string(), "weave \"empty\" has no rows");
    }

    #[test]
    fn forced_roll_routes_to_expected_row() {
        let weave = sample_weave();
        // 20 over 3 rows: (1,7), (8,14), (15,20).
        let out = roll_weave(&weave, &RollOptions::default().with_roll_value(8)).unwrap();
        assert_eq!(out.row.target_id, "forest");
        assert_eq!(out.target_label(), "Domain: forest");
    }

    #[test]
    fn unmatched_roll_errors() {
        let mut weave = sample_weave();
        weave.rows.remove(1); // punch a hole in 8..=14
        let err = roll_weave(&weave, &RollOptions::default().with_roll_value(10)).unwrap_err();
        assert!(matches!(err, WeaveError::NoRowMatched { roll: 10, .. }));
    }

    #[test]
    fn seeded_weave_rolls_are_reproducible() {
        let weave = sample_weave();
        let opts = RollOptions::default().with_seed("w1");
        let a = roll_weave(&weave, &opts).unwrap();
        let b = roll_weave(&weave, &opts).unwrap();
        assert_eq!(a.roll, b.roll);
        assert_eq!(a.row.id, b.row.id);
    }

    #[test]
    fn rolls_stay_in_domain() {
        let weave = sample_weave();
        for i in 0..100 {
            let out =
                roll_weave(&weave, &RollOptions::default().with_seed(format!("s{i}"))).unwrap();
            assert!((1..=20).contains(&out.roll));
        }
    }

    #[test]
    fn outcome_display() {
        let weave = sample_weave();
        let out = roll_weave(&weave, &RollOptions::default().with_roll_value(1)).unwrap();
        assert_eq!(out.to_string(), "1 → Aspect: haunted");
    }
}
