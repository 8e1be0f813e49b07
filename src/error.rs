use thiserror::Error;

use crate::parser::FormatError;
use crate::Val;

/// Errors raised while setting up a puzzle, before any search begins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed puzzle: {0}")]
    Format(#[from] FormatError),

    #[error("puzzle has {letters} distinct letters, too many for base-{base}")]
    TooManyLetters { letters: usize, base: Val },

    #[error("base must be between 2 and 36, got {0}")]
    InvalidBase(Val),

    #[error("no solution found")]
    NoSolution,

    #[error("textual substitution is not supported for base-{0}")]
    Substitution(Val),
}
