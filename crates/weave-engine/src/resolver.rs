//! Recursive resolution of `[[ TAG ]]` tokens.
//!
//! Tokens can appear in text results and in string-valued fields of object
//! results. Resolution is depth-first and left-to-right, bounded by
//! [`MAX_DEPTH`] and by ancestor-chain cycle detection; every guard trips
//! softly, degrading the token to a sentinel (`[UNRESOLVED:tag]`,
//! `[CYCLE:tag]`) and appending a warning instead of erroring.
//!
//! Two behaviors are preserved from the reference implementation on
//! purpose: arrays nested in object results are never descended into, and
//! the visited set is cloned per branch, so the same tag may resolve in
//! sibling subtrees — only ancestor-to-descendant repeats count as cycles.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use weave_core::{ResultValue, RollResult};

/// Maximum recursion depth for token resolution.
pub const MAX_DEPTH: usize = 10;

/// Token syntax: `[[ TAG_NAME ]]`, whitespace-tolerant, non-greedy so
/// adjacent tokens on one line resolve independently.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[\s*([a-zA-Z0-9_\-\s]+?)\s*\]\]").expect("token regex is valid")
});

/// All token tags appearing in `text`, in order of appearance.
pub fn tokens_in(text: &str) -> Vec<String> {
    TOKEN_REGEX
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Transient state threaded through one resolution pass.
///
/// The accumulator fields (`table_chain`, `rolls`, `warnings`) are
/// append-only across the whole call tree; `depth` and `visited_tags` are
/// per-branch.
#[derive(Debug, Clone, Default)]
pub struct ResolverContext {
    /// Current recursion depth.
    pub depth: usize,
    /// Tags on the current resolution chain, for cycle detection.
    pub visited_tags: HashSet<String>,
    /// Accumulated table chain across all sub-rolls.
    pub table_chain: Vec<String>,
    /// Accumulated roll values across all sub-rolls.
    pub rolls: Vec<u32>,
    /// Accumulated warnings across all sub-rolls.
    pub warnings: Vec<String>,
}

/// Callback invoked whenever a token degrades to a sentinel. Receives the
/// warning message and the offending tag.
pub type ErrorCallback = Box<dyn FnMut(&str, &str)>;

/// Resolves `[[ TAG ]]` tokens by delegating table lookup and rolling to a
/// caller-supplied callback.
#[derive(Default)]
pub struct TokenResolver {
    on_error: Option<ErrorCallback>,
}

impl TokenResolver {
    /// A resolver with no error callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a callback fired on every depth, cycle, or missing-table
    /// degradation (in addition to the context warning).
    pub fn with_error_callback(mut self, on_error: ErrorCallback) -> Self {
        self.on_error = Some(on_error);
        self
    }

    /// Resolve every token in `value`.
    ///
    /// `roll_by_tag` is the seam to the hosting table store: given a tag it
    /// rolls the referenced table, or returns `None` when no table carries
    /// the tag. A top-level [`ResultValue::Reference`] passes through
    /// unchanged; references only render (as `[tag]`) when reached through
    /// a token. Input without tokens comes back unchanged with an
    /// empty-delta context.
    pub fn resolve<F>(
        &mut self,
        value: &ResultValue,
        roll_by_tag: &mut F,
        context: Option<ResolverContext>,
    ) -> (ResultValue, ResolverContext)
    where
        F: FnMut(&str) -> Option<RollResult>,
    {
        let mut ctx = context.unwrap_or_default();
        let resolved = match value {
            ResultValue::Text(text) => {
                ResultValue::Text(self.resolve_string(text, roll_by_tag, &mut ctx))
            }
            ResultValue::Object(map) => {
                ResultValue::Object(self.resolve_object(map, roll_by_tag, &mut ctx))
            }
            ResultValue::Reference { tag } => ResultValue::reference(tag.clone()),
        };
        (resolved, ctx)
    }

    fn resolve_string<F>(&mut self, text: &str, roll_by_tag: &mut F, ctx: &mut ResolverContext) -> String
    where
        F: FnMut(&str) -> Option<RollResult>,
    {
        TOKEN_REGEX
            .replace_all(text, |caps: &regex::Captures<'_>| {
                self.resolve_token(caps[1].trim(), roll_by_tag, ctx)
            })
            .into_owned()
    }

    fn resolve_object<F>(
        &mut self,
        obj: &serde_json::Map<String, serde_json::Value>,
        roll_by_tag: &mut F,
        ctx: &mut ResolverContext,
    ) -> serde_json::Map<String, serde_json::Value>
    where
        F: FnMut(&str) -> Option<RollResult>,
    {
        let mut resolved = serde_json::Map::with_capacity(obj.len());
        for (key, value) in obj {
            let new_value = match value {
                serde_json::Value::String(s) => {
                    serde_json::Value::String(self.resolve_string(s, roll_by_tag, ctx))
                }
                serde_json::Value::Object(inner) => {
                    serde_json::Value::Object(self.resolve_object(inner, roll_by_tag, ctx))
                }
                // Arrays and non-string primitives pass through untouched.
                other => other.clone(),
            };
            resolved.insert(key.clone(), new_value);
        }
        resolved
    }

    fn resolve_token<F>(&mut self, tag: &str, roll_by_tag: &mut F, ctx: &mut ResolverContext) -> String
    where
        F: FnMut(&str) -> Option<RollResult>,
    {
        if ctx.depth >= MAX_DEPTH {
            let msg = format!("Max resolution depth ({MAX_DEPTH}) exceeded for tag \"{tag}\"");
            ctx.warnings.push(msg.clone());
            self.fire_error(&msg, tag);
            return format!("[UNRESOLVED:{tag}]");
        }

        if ctx.visited_tags.contains(tag) {
            let msg = format!("Cycle detected: tag \"{tag}\" already in resolution chain");
            ctx.warnings.push(msg.clone());
            self.fire_error(&msg, tag);
            return format!("[CYCLE:{tag}]");
        }

        let Some(sub) = roll_by_tag(tag) else {
            let msg = format!("No table found for tag \"{tag}\"");
            ctx.warnings.push(msg.clone());
            self.fire_error(&msg, tag);
            return format!("[UNRESOLVED:{tag}]");
        };

        ctx.rolls.extend(sub.rolls);
        ctx.visited_tags.insert(tag.to_string());
        ctx.table_chain.extend(sub.table_chain);
        ctx.warnings.extend(sub.warnings);

        // Descend with a per-branch copy of the visited set; the
        // accumulators keep flowing through the shared context.
        let mut child = ResolverContext {
            depth: ctx.depth + 1,
            visited_tags: ctx.visited_tags.clone(),
            table_chain: std::mem::take(&mut ctx.table_chain),
            rolls: std::mem::take(&mut ctx.rolls),
            warnings: std::mem::take(&mut ctx.warnings),
        };

        let rendered = match &sub.result {
            ResultValue::Text(text) => self.resolve_string(text, roll_by_tag, &mut child),
            ResultValue::Object(map) => {
                // An object embedded inside a string token degrades to its
                // raw JSON text.
                let resolved = self.resolve_object(map, roll_by_tag, &mut child);
                serde_json::Value::Object(resolved).to_string()
            }
            // Table references reached through a token render as a
            // bracketed name, never auto-chained.
            ResultValue::Reference { tag } => format!("[{tag}]"),
        };

        ctx.table_chain = child.table_chain;
        ctx.rolls = child.rolls;
        ctx.warnings = child.warnings;

        rendered
    }

    fn fire_error(&mut self, message: &str, tag: &str) {
        if let Some(cb) = self.on_error.as_mut() {
            cb(message, tag);
        }
    }
}
