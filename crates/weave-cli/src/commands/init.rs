use std::fs;
use std::path::Path;

use weave_core::{Table, TableRow, Weave, WeaveRow, WeaveTarget};
use weave_engine::{TableRegistry, recalculate_ranges, spread_rows};

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    let tables_dir = dir.join("tables");
    let weaves_dir = dir.join("weaves");
    fs::create_dir_all(&tables_dir).map_err(|e| format!("cannot create directory: {e}"))?;
    fs::create_dir_all(&weaves_dir).map_err(|e| format!("cannot create directory: {e}"))?;

    let mut registry = TableRegistry::new();
    for table in [starter_actions(), starter_treasure()] {
        registry
            .save(&tables_dir, table)
            .map_err(|e| format!("cannot write starter table: {e}"))?;
    }

    let weave = starter_weave();
    let weave_path = weaves_dir.join(format!("{}.json", weave.id));
    let json = serde_json::to_string_pretty(&weave)
        .map_err(|e| format!("cannot serialize starter weave: {e}"))?;
    fs::write(&weave_path, json).map_err(|e| format!("cannot write starter weave: {e}"))?;

    println!("Created weave workspace '{name}' in {name}/");
    println!("  tables/actions.json   — a d6 oracle of action prompts");
    println!("  tables/treasure.json  — a d6 table with a [[action]] token");
    println!("  weaves/the_wilds.json — a d20 weave routing to packs and oracles");
    println!();
    println!("Get started:");
    println!("  weave list --dir {name}/tables");
    println!("  weave roll treasure --dir {name}/tables");
    println!("  weave weave {name}/weaves/the_wilds.json");

    Ok(())
}

fn starter_actions() -> Table {
    let mut table = Table::new("Actions", 6);
    table.tags = vec!["action".to_string()];
    table.description = "Action prompts for oracle questions".to_string();
    let rows: Vec<TableRow> = ["Pursue", "Abandon", "Guard", "Betray", "Reveal", "Mend"]
        .iter()
        .map(|word| TableRow::text(0, 0, *word))
        .collect();
    table.table_data = spread_rows(&rows, 6);
    table
}

fn starter_treasure() -> Table {
    let mut table = Table::new("Treasure", 6);
    table.tags = vec!["treasure".to_string()];
    table.description = "What the hoard holds".to_string();
    let rows: Vec<TableRow> = [
        "a pouch of silver",
        "a cracked gemstone",
        "a map urging you to [[action]]",
        "an old signet ring",
        "a vial of black sand",
        "a letter that asks you to [[action]]",
    ]
    .iter()
    .map(|text| TableRow::text(0, 0, *text))
    .collect();
    table.table_data = spread_rows(&rows, 6);
    table
}

fn starter_weave() -> Weave {
    let mut weave = Weave::new("The Wilds", 20);
    let rows = vec![
        WeaveRow::new(WeaveTarget::Aspect, "haunted"),
        WeaveRow::new(WeaveTarget::Domain, "forest"),
        WeaveRow::new(WeaveTarget::Oracle, "action"),
        WeaveRow::new(WeaveTarget::OracleCombo, "action_subject"),
    ];
    weave.rows = recalculate_ranges(&rows, 20);
    weave
}
