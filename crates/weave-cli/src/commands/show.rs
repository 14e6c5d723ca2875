use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use weave_core::{ResultType, RollMode};
use weave_engine::card::display_value;
use weave_engine::roll_mode;

pub fn run(dir: &Path, name: &str) -> Result<(), String> {
    let registry = super::load_registry(dir)?;
    let found = super::find_table(&registry, name)?;

    let die = match roll_mode(found) {
        RollMode::Standard => format!("d{}", found.max_roll),
        mode => mode.to_string(),
    };
    println!("  {} ({die}, {} rows)", found.name, found.table_data.len());
    if !found.description.is_empty() {
        println!("  {}", found.description);
    }
    if !found.tags.is_empty() {
        println!("  tags: {}", found.tags.join(", "));
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(found.headers.clone());

    for row in &found.table_data {
        let range = if row.floor == row.ceiling {
            row.floor.to_string()
        } else {
            format!("{}-{}", row.floor, row.ceiling)
        };
        let result = match row.result_type {
            ResultType::Table => format!("→ [{}]", display_value(&row.result)),
            _ => display_value(&row.result),
        };
        table.add_row(vec![range, result]);
    }

    println!("{table}");
    Ok(())
}
