//! Core types for Weave: random tables, roll results, and weaves.
//!
//! This crate defines the data model that the rolling engine operates on.
//! It is independent of the engine — you can construct a [`Table`]
//! programmatically or deserialize one from the JSON files the desktop app
//! writes (field names are camelCase for that reason).

/// Error types used throughout the workspace.
pub mod error;
/// Roll results, roll options, and roll modes.
pub mod roll;
/// Random tables and their rows.
pub mod table;
/// Weaves: routing tables mapping roll ranges to typed targets.
pub mod weave;

/// Re-export error types.
pub use error::{WeaveError, WeaveResult};
/// Re-export roll types.
pub use roll::{RollMode, RollOptions, RollResult};
/// Re-export table types.
pub use table::{ResultType, ResultValue, Table, TableRow};
/// Re-export weave types.
pub use weave::{Weave, WeaveRow, WeaveTarget, slugify};
