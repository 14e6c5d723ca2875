use std::path::Path;

use colored::Colorize;
use weave_core::RollOptions;
use weave_engine::{RollCard, roll as roll_table};

pub fn run(
    dir: &Path,
    name: &str,
    seed: Option<String>,
    roll_value: Option<u32>,
    raw: bool,
) -> Result<(), String> {
    let registry = super::load_registry(dir)?;
    let table = super::find_table(&registry, name)?;

    let options = RollOptions { seed, roll_value };

    let result = if raw {
        roll_table(table, &options)
    } else {
        registry
            .roll_resolved(&table.id, &options)
            .map_err(|e| e.to_string())?
    };

    let card = RollCard::from_roll(&table.name, &result);
    println!("  {}", card.header.bold());
    for line in card.content.lines() {
        if line.starts_with("Warnings:") {
            println!("  {}", line.yellow());
        } else {
            println!("  {line}");
        }
    }
    println!("  = {}", card.result.bold());

    Ok(())
}
