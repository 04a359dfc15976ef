//! Error types shared by every solver in the crate.

use thiserror::Error;

/// Errors produced by matrix construction, configuration checks and
/// solver entry points.
///
/// Validation happens once, before any search starts. A search that finds
/// no feasible tour is not an error: solvers report it as an absent cost,
/// and only the explicit conversion helpers (e.g.
/// [`HeldKarpResult::cost`](crate::held_karp::HeldKarpResult::cost))
/// turn it into [`TspError::NoSolution`].
#[derive(Debug, Error)]
pub enum TspError {
    /// Malformed matrix, out-of-range parameter or rejected configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No Hamiltonian cycle through the start city exists.
    #[error("no tour visits every city and returns to the start")]
    NoSolution,

    /// CSV decoding failure while loading a city-pair list.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error while opening an input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TspError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TspError::InvalidInput(msg.into())
    }
}

/// Convenience result type for this crate.
pub type Result<T> = std::result::Result<T, TspError>;
