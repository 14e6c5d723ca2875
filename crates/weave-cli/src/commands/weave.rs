use std::path::Path;

use colored::Colorize;
use weave_core::RollOptions;
use weave_engine::roll_weave;

pub fn run(file: &Path, seed: Option<String>, roll_value: Option<u32>) -> Result<(), String> {
    let weave = super::load_weave(file)?;
    let options = RollOptions { seed, roll_value };

    let outcome = roll_weave(&weave, &options).map_err(|e| e.to_string())?;

    println!("  {}", weave.name.bold());
    println!(
        "  {}/{} → {}",
        outcome.roll,
        weave.max_roll,
        outcome.target_label().bold()
    );
    println!("  Seed: {}", outcome.seed);

    Ok(())
}
