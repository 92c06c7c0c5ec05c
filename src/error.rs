//! Errors surfaced at the public boundaries of the crate.
//!
//! The permutation and the sponge loop never return errors: once a
//! [`SpongeState`](crate::SpongeState) exists, every step is infallible and
//! broken invariants there are bugs, reported by assertions.

use thiserror::Error;

/// Errors returned by constructors and bit-addressing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid parameter set: lattice width, rate, round count, output
    /// length selector or algorithm name.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// A bit index, coordinate or length argument lies outside its bounds.
    #[error("index {index} out of range for length {len}")]
    Range { index: usize, len: usize },
    /// Bitwise combination of two bitstrings with different lengths.
    #[error("bitstring length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    /// A textual bitstring contained something other than `0`, `1` or
    /// whitespace.
    #[error("invalid character {found:?} at position {position} in bitstring")]
    Format { position: usize, found: char },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
