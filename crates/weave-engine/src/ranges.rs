//! Even range allocation across ordered rows.
//!
//! Used whenever rows are added, removed, or resized in an editor, to keep
//! ranges contiguous and covering the whole die. The allocation depends
//! only on the row count and `max_roll` — prior ranges are overwritten.

use weave_core::{TableRow, WeaveRow};

/// Inclusive `(from, to)` spans partitioning `1..=max_roll` into `count`
/// pieces. Each span is `max_roll / count` wide, or one more: the
/// remainder goes to the first rows in order, not round-robin.
fn spans(count: usize, max_roll: u32) -> Vec<(u32, u32)> {
    let count_u32 = count as u32;
    let base = max_roll / count_u32;
    let mut remainder = max_roll % count_u32;

    let mut current = 1u32;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let span = base + u32::from(remainder > 0);
        remainder = remainder.saturating_sub(1);

        let from = current;
        let to = current + span - 1;
        current = to + 1;
        out.push((from, to));
    }
    out
}

/// Redistribute `1..=max_roll` evenly across weave rows, preserving row
/// order and identity. Zero rows is a no-op, not an error.
pub fn recalculate_ranges(rows: &[WeaveRow], max_roll: u32) -> Vec<WeaveRow> {
    if rows.is_empty() {
        return Vec::new();
    }
    rows.iter()
        .zip(spans(rows.len(), max_roll))
        .map(|(row, (from, to))| {
            let mut row = row.clone();
            row.from = from;
            row.to = to;
            row
        })
        .collect()
}

/// The same allocation over table rows (`floor`/`ceiling`), used when
/// bootstrapping environment and aspect tables.
pub fn spread_rows(rows: &[TableRow], max_roll: u32) -> Vec<TableRow> {
    if rows.is_empty() {
        return Vec::new();
    }
    rows.iter()
        .zip(spans(rows.len(), max_roll))
        .map(|(row, (from, to))| {
            let mut row = row.clone();
            row.floor = from;
            row.ceiling = to;
            row
        })
        .collect()
}
