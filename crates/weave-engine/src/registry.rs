//! Directory-backed table registry.
//!
//! The registry is the seam between the pure rolling/resolution algorithms
//! and the table files on disk: it loads a directory of JSON tables, looks
//! tables up by id, name, or tag, and supplies the `roll_by_tag` callback
//! that token resolution needs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use weave_core::{
    ResultValue, RollOptions, RollResult, Table, WeaveError, WeaveResult, slugify,
};

use crate::engine;
use crate::resolver::{MAX_DEPTH, ResolverContext, TokenResolver};

/// An in-memory collection of tables keyed by id.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: BTreeMap<String, Table>,
}

impl TableRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` table file in `dir`.
    ///
    /// Files that fail to parse abort the load with the offending path in
    /// the error; a half-loaded registry would silently change how tags
    /// resolve.
    pub fn load_dir(dir: &Path) -> WeaveResult<Self> {
        let mut registry = Self::new();
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();

        for path in entries {
            let content = fs::read_to_string(&path)?;
            let mut table: Table = serde_json::from_str(&content).map_err(|e| {
                WeaveError::Validation(format!("failed to parse {}: {e}", path.display()))
            })?;
            table.source_path = path.display().to_string();
            registry.insert(table);
        }
        Ok(registry)
    }

    /// Insert a table, replacing any table with the same id.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.id.clone(), table);
    }

    /// Get a table by id.
    pub fn get(&self, id: &str) -> Option<&Table> {
        self.tables.get(id)
    }

    /// First table with the given display name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Table> {
        self.tables
            .values()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// First table carrying the given tag (case-insensitive).
    pub fn find_by_tag(&self, tag: &str) -> Option<&Table> {
        self.tables.values().find(|t| t.has_tag(tag))
    }

    /// Look a table up by id, then name, then tag.
    pub fn lookup(&self, key: &str) -> Option<&Table> {
        self.get(key)
            .or_else(|| self.find_by_name(key))
            .or_else(|| self.find_by_tag(key))
    }

    /// Remove a table by id.
    pub fn remove(&mut self, id: &str) -> Option<Table> {
        self.tables.remove(id)
    }

    /// Write `table` to `dir` as pretty JSON and insert it.
    pub fn save(&mut self, dir: &Path, mut table: Table) -> WeaveResult<PathBuf> {
        let path = dir.join(format!("{}.json", slugify(&table.name)));
        table.source_path = path.display().to_string();
        fs::write(&path, serde_json::to_string_pretty(&table)?)?;
        self.insert(table);
        Ok(path)
    }

    /// Iterate tables in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the registry holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Roll the table carrying `tag`, tokens resolved. This is the
    /// callback shape [`TokenResolver::resolve`] expects.
    pub fn roll_by_tag(&self, tag: &str) -> Option<RollResult> {
        self.find_by_tag(tag)
            .map(|t| self.resolved_roll(t, &RollOptions::default(), 0))
    }

    /// Look up a table by id, name, or tag; roll it; and resolve any
    /// tokens in the result against this registry.
    pub fn roll_resolved(&self, key: &str, options: &RollOptions) -> WeaveResult<RollResult> {
        let table = self
            .lookup(key)
            .ok_or_else(|| WeaveError::TableNotFound(key.to_string()))?;
        Ok(self.resolved_roll(table, options, 0))
    }

    /// Roll and resolve. Reference results chain into the referenced table
    /// (up to [`MAX_DEPTH`] hops); text and object results go through the
    /// token resolver, with the hop count threaded into the resolver
    /// context so the depth cap bounds recursion across tables too —
    /// otherwise a table whose text references its own tag would recurse
    /// without limit. Sub-rolls draw fresh seeds, as the desktop app does —
    /// only the top-level roll is pinned by `options.seed`.
    fn resolved_roll(&self, table: &Table, options: &RollOptions, depth: usize) -> RollResult {
        let result = engine::roll(table, options);

        if let ResultValue::Reference { tag } = &result.result {
            return self.chain_reference(result.clone(), tag, depth);
        }

        let mut resolver = TokenResolver::new();
        let mut roll_by_tag = |tag: &str| {
            self.find_by_tag(tag)
                .map(|t| self.resolved_roll(t, &RollOptions::default(), depth + 1))
        };
        let ctx = ResolverContext {
            depth,
            ..ResolverContext::default()
        };
        let (resolved, ctx) = resolver.resolve(&result.result, &mut roll_by_tag, Some(ctx));

        RollResult {
            seed: result.seed,
            table_chain: [result.table_chain, ctx.table_chain].concat(),
            rolls: [result.rolls, ctx.rolls].concat(),
            warnings: [result.warnings, ctx.warnings].concat(),
            result: resolved,
        }
    }

    /// A row whose whole result is a table reference rolls the referenced
    /// table directly and takes its result.
    fn chain_reference(&self, result: RollResult, tag: &str, depth: usize) -> RollResult {
        if depth >= MAX_DEPTH {
            let mut result = result;
            result.warnings.push(format!(
                "Max resolution depth ({MAX_DEPTH}) exceeded for table reference \"{tag}\""
            ));
            return result;
        }

        // An unresolvable reference is returned as-is, like any other
        // data-quality problem.
        let Some(ref_table) = self.find_by_tag(tag) else {
            return result;
        };

        let sub = self.resolved_roll(ref_table, &RollOptions::default(), depth + 1);
        RollResult {
            seed: result.seed,
            table_chain: [result.table_chain, sub.table_chain].concat(),
            rolls: [result.rolls, sub.rolls].concat(),
            warnings: [result.warnings, sub.warnings].concat(),
            result: sub.result,
        }
    }
}
