use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use weave_core::RollMode;
use weave_engine::roll_mode;

pub fn run(dir: &Path) -> Result<(), String> {
    let registry = super::load_registry(dir)?;

    if registry.is_empty() {
        println!("  No tables found in {}.", dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Tags", "Die", "Rows"]);

    for t in registry.iter() {
        let die = match roll_mode(t) {
            RollMode::Standard => format!("d{}", t.max_roll),
            mode => mode.to_string(),
        };
        table.add_row(vec![
            t.name.clone(),
            t.tags.join(", "),
            die,
            t.table_data.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} tables", registry.len());

    Ok(())
}
