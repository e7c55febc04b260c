//! Error types for graph generation and analysis.

use thiserror::Error;

/// Error type for generator and centrality operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A generator argument is out of range (`k` parity, `k`/`n` relation, `p` range).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The graph is too small for the requested normalization.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

/// Result type for generator and centrality operations.
pub type Result<T> = std::result::Result<T, Error>;
