//! Rolling engine for Weave random tables.
//!
//! Provides a string-seeded deterministic RNG, roll-range matching with
//! soft failure semantics, recursive `[[ TAG ]]` token resolution with
//! depth and cycle guards, even range allocation for editors, weave
//! routing, and a directory-backed table registry.
//!
//! Every operation here is synchronous and call-scoped: each roll builds
//! its own RNG and each resolution pass builds its own context, so callers
//! need no coordination to roll concurrently.

/// Roll-card formatting for session logs.
pub mod card;
/// Table rolling: mode detection and row matching.
pub mod engine;
/// Even range allocation across rows.
pub mod ranges;
/// Directory-backed table registry and resolved rolls.
pub mod registry;
/// Recursive `[[ TAG ]]` token resolution.
pub mod resolver;
/// Weave routing rolls.
pub mod route;
/// String-seeded deterministic RNG and compound dice.
pub mod rng;

/// Re-export roll-card formatting.
pub use card::RollCard;
/// Re-export the roll entry points.
pub use engine::{roll, roll_mode, valid_rolls};
/// Re-export range allocation.
pub use ranges::{recalculate_ranges, spread_rows};
/// Re-export the registry.
pub use registry::TableRegistry;
/// Re-export the resolver.
pub use resolver::{MAX_DEPTH, ResolverContext, TokenResolver};
/// Re-export weave routing.
pub use route::{WeaveRollOutcome, roll_weave};
/// Re-export the RNG.
pub use rng::SeededRng;
