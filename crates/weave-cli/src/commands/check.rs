use std::path::Path;

use colored::Colorize;
use weave_core::{ResultValue, Table};
use weave_engine::resolver::tokens_in;
use weave_engine::{TableRegistry, roll_mode, valid_rolls};

pub fn run(dir: &Path) -> Result<(), String> {
    let registry = super::load_registry(dir)?;

    if registry.is_empty() {
        return Err(format!("no tables found in {}", dir.display()));
    }

    let mut findings = 0usize;
    for table in registry.iter() {
        for finding in check_table(&registry, table) {
            println!("  {} {}: {finding}", "warning".yellow(), table.name);
            findings += 1;
        }
    }

    if findings > 0 {
        return Err(format!(
            "{findings} finding{} across {} tables",
            if findings == 1 { "" } else { "s" },
            registry.len()
        ));
    }

    println!("  All checks passed: {} tables.", registry.len());
    Ok(())
}

/// Coverage and reference findings for one table.
fn check_table(registry: &TableRegistry, table: &Table) -> Vec<String> {
    let mut findings = Vec::new();

    let mut gaps = Vec::new();
    let mut overlaps = Vec::new();
    for value in valid_rolls(roll_mode(table), table.max_roll) {
        match table.rows_matching(value).len() {
            0 => gaps.push(value),
            1 => {}
            _ => overlaps.push(value),
        }
    }
    if !gaps.is_empty() {
        findings.push(format!("uncovered rolls: {}", summarize(&gaps)));
    }
    if !overlaps.is_empty() {
        findings.push(format!("overlapping rolls: {}", summarize(&overlaps)));
    }

    for row in &table.table_data {
        match &row.result {
            ResultValue::Text(text) => {
                for tag in tokens_in(text) {
                    if registry.find_by_tag(&tag).is_none() {
                        findings.push(format!("token [[{tag}]] resolves to no table"));
                    }
                }
            }
            ResultValue::Reference { tag } => {
                if registry.find_by_tag(tag).is_none() {
                    findings.push(format!("reference to tag \"{tag}\" resolves to no table"));
                }
            }
            ResultValue::Object(_) => {}
        }
    }

    findings
}

/// Compact display of a sorted value list: `3, 7-9, 12`.
fn summarize(values: &[u32]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;
    while i < values.len() {
        let start = values[i];
        let mut end = start;
        while i + 1 < values.len() && values[i + 1] == end + 1 {
            i += 1;
            end = values[i];
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start}-{end}"));
        }
        i += 1;
    }
    parts.join(", ")
}
