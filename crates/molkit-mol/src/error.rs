//! Error types for molecular operations
//!
//! Provides error types for operations on molecular data structures.

use thiserror::Error;

/// Errors that can occur when working with molecular data
#[derive(Error, Debug, Clone)]
pub enum MolError {
    /// Fragment range does not fit the chain
    #[error("Fragment range {start}..={end} does not fit chain '{chain}' ({len} residues)")]
    FragmentOutOfRange {
        chain: String,
        start: usize,
        end: usize,
        len: usize,
    },

    /// Fragment range with end before start
    #[error("Inverted fragment range {0}..={1}")]
    InvertedRange(usize, usize),
}

impl MolError {
    /// Create a fragment out-of-range error
    pub fn fragment_out_of_range(chain: &str, start: usize, end: usize, len: usize) -> Self {
        MolError::FragmentOutOfRange {
            chain: chain.to_string(),
            start,
            end,
            len,
        }
    }
}

/// Result type for molecular operations
pub type MolResult<T> = Result<T, MolError>;
