//! This crate searches for the solutions to alphametic puzzles.
//!
//! A puzzle such as `SEND+MORE=MONEY` is broken into digit-sum columns,
//! a solving strategy is planned column by column, and a backtracking
//! search enumerates every digit assignment that makes the sum hold.
//!
//! ```
//! let puzzle = alphametic_solver::Puzzle::new("SEND+MORE=MONEY").unwrap();
//! let solution = puzzle.solve().unwrap();
//! assert_eq!(solution['M'], 1);
//! assert_eq!(puzzle.substitute(&solution).unwrap(), "9567+1085=10652");
//! ```

pub mod column;
pub mod parser;
pub mod search;
pub mod strategy;
pub mod variable;

mod error;
mod linexpr;
mod puzzle;

use std::collections::BTreeMap;
use std::fmt;
use std::ops;

pub use error::Error;
pub use linexpr::LinExpr;
pub use parser::FormatError;
pub use puzzle::{Options, Puzzle, MAX_BASE};
pub use search::Solutions;

/// A puzzle variable token.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VarToken(usize);

impl VarToken {
    /// The position of the variable in the registry.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The type of a puzzle variable's value (i.e. a digit), and of bases and carries.
pub type Val = i32;

/// The type of the coefficients in a linear expression.
pub type Coef = i32;

/// A result of puzzle construction.
pub type PsResult<T> = Result<T, Error>;

/// A dictionary mapping letters to their digit.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Solution {
    digits: BTreeMap<char, Val>,
}

impl Solution {
    /// Get the digit assigned to a letter, if the letter is in the puzzle.
    pub fn get(&self, letter: char) -> Option<Val> {
        self.digits.get(&letter).copied()
    }

    /// Iterate over the (letter, digit) pairs in letter order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Val)> + '_ {
        self.digits.iter().map(|(&letter, &digit)| (letter, digit))
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl FromIterator<(char, Val)> for Solution {
    fn from_iter<I: IntoIterator<Item = (char, Val)>>(iter: I) -> Self {
        Solution {
            digits: iter.into_iter().collect(),
        }
    }
}

impl ops::Index<char> for Solution {
    type Output = Val;

    /// Get the digit assigned to a letter.
    ///
    /// # Panics
    ///
    /// Panics if the letter does not appear in the puzzle.
    fn index(&self, letter: char) -> &Val {
        match self.digits.get(&letter) {
            Some(digit) => digit,
            None => panic!("letter {:?} not in puzzle", letter),
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (letter, digit) in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}={}", letter, digit)?;
            first = false;
        }
        Ok(())
    }
}
