//! Error types for the Weave workspace.
//!
//! Data-quality problems (gaps, overlaps, unresolvable tags) never surface
//! here — the engine degrades those to sentinel results plus warnings.
//! These errors are reserved for hard precondition violations and I/O.

/// Alias for `Result<T, WeaveError>`.
pub type WeaveResult<T> = Result<T, WeaveError>;

/// Errors that can occur when rolling weaves or loading tables.
#[derive(Debug, thiserror::Error)]
pub enum WeaveError {
    /// A weave with no rows cannot be rolled.
    #[error("weave \"{0}\" has no rows")]
    EmptyWeave(String),

    /// No weave row covered the rolled value.
    #[error("no row matched roll {roll} in weave \"{weave}\"")]
    NoRowMatched {
        /// The value that was rolled.
        roll: u32,
        /// The weave that was rolled on.
        weave: String,
    },

    /// The requested table does not exist in the registry.
    #[error("table not found: \"{0}\"")]
    TableNotFound(String),

    /// A table or weave file could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A table or weave file could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
