pub mod check;
pub mod init;
pub mod list;
pub mod roll;
pub mod show;
pub mod spread;
pub mod weave;

use std::fs;
use std::path::Path;

use weave_core::{Table, Weave};
use weave_engine::TableRegistry;

/// Load every table in a directory, with a friendly error.
fn load_registry(dir: &Path) -> Result<TableRegistry, String> {
    TableRegistry::load_dir(dir).map_err(|e| format!("cannot load tables from {}: {e}", dir.display()))
}

/// Find a table by id, name, or tag, with a friendly error.
fn find_table<'a>(registry: &'a TableRegistry, key: &str) -> Result<&'a Table, String> {
    registry
        .lookup(key)
        .ok_or_else(|| format!("no table matches '{key}' by id, name, or tag"))
}

/// Load a weave from a JSON file.
fn load_weave(path: &Path) -> Result<Weave, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("cannot parse {}: {e}", path.display()))
}
