use std::fs;
use std::path::Path;

use chrono::Utc;
use weave_engine::recalculate_ranges;

pub fn run(file: &Path) -> Result<(), String> {
    let mut weave = super::load_weave(file)?;

    if weave.read_only {
        return Err(format!("weave '{}' is read-only", weave.name));
    }
    if weave.rows.is_empty() {
        return Err(format!("weave '{}' has no rows to spread", weave.name));
    }

    weave.rows = recalculate_ranges(&weave.rows, weave.max_roll);
    weave.updated_at = Utc::now();

    let json = serde_json::to_string_pretty(&weave).map_err(|e| e.to_string())?;
    fs::write(file, json).map_err(|e| format!("cannot write {}: {e}", file.display()))?;

    println!(
        "  Spread {} rows across 1-{} in '{}':",
        weave.rows.len(),
        weave.max_roll,
        weave.name
    );
    for row in &weave.rows {
        println!("  {:>3}-{:<3} {}", row.from, row.to, row.target_label());
    }

    Ok(())
}
