//! The letter variables of a puzzle.

use bit_set::BitSet;
use std::fmt;
use std::ops;

use crate::{Error, PsResult, Val, VarToken};

/// A letter in the puzzle, and the digits it may still take.
#[derive(Clone, Debug)]
pub struct Variable {
    letter: char,

    // Shrinks only at construction (leading-zero exclusion), never
    // during the search.
    domain: BitSet,
}

impl Variable {
    fn new(letter: char, base: Val) -> Self {
        Variable {
            letter,
            domain: (0..base as usize).collect(),
        }
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn domain(&self) -> &BitSet {
        &self.domain
    }

    /// Whether the digit is allowed and not used by another letter.
    pub fn admits(&self, digit: Val, used: &BitSet) -> bool {
        digit >= 0 && self.domain.contains(digit as usize) && !used.contains(digit as usize)
    }

    /// The digits this variable may take, given the digits already used,
    /// in ascending order.
    pub fn candidates(&self, used: &BitSet) -> Vec<Val> {
        self.domain.difference(used).map(|digit| digit as Val).collect()
    }

    /// Exclude a digit as a candidate.  Used to prevent leading zeros.
    pub fn exclude(&mut self, digit: Val) {
        self.domain.remove(digit as usize);
    }

    /// Show the variable with its value, or with its domain if it has none.
    pub fn display(&self, value: Option<Val>) -> VarDisplay<'_> {
        VarDisplay { var: self, value }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(None))
    }
}

/// Displays a variable as `S=9`, or as `S={123456789}` when unassigned.
pub struct VarDisplay<'a> {
    var: &'a Variable,
    value: Option<Val>,
}

impl fmt::Display for VarDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(val) => write!(f, "{}={}", self.var.letter, val),
            None => {
                write!(f, "{}={{", self.var.letter)?;
                for digit in self.var.domain.iter() {
                    match char::from_digit(digit as u32, 36) {
                        Some(c) => write!(f, "{}", c)?,
                        None => write!(f, "({})", digit)?,
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

/// The registry of variables, one per distinct letter, in order of first
/// appearance in the puzzle text.
#[derive(Clone, Debug)]
pub struct Variables {
    vars: Vec<Variable>,
}

impl Variables {
    /// Create a variable for each distinct letter in the text.
    ///
    /// Fails if there are more letters than digits in the base.
    pub fn new(text: &str, base: Val) -> PsResult<Self> {
        let mut letters: Vec<char> = Vec::new();
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            if !letters.contains(&c) {
                letters.push(c);
            }
        }

        if letters.len() > base as usize {
            return Err(Error::TooManyLetters {
                letters: letters.len(),
                base,
            });
        }

        Ok(Variables {
            vars: letters
                .into_iter()
                .map(|letter| Variable::new(letter, base))
                .collect(),
        })
    }

    /// Forbid a zero on the leading letter of every multi-letter term.
    pub fn exclude_leading_zeros<S: AsRef<str>>(&mut self, terms: &[S]) {
        for term in terms.iter().map(AsRef::as_ref) {
            let mut chars = term.chars();
            if let (Some(lead), Some(_)) = (chars.next(), chars.next()) {
                if let Some(var) = self.token(lead) {
                    self.vars[var.0].exclude(0);
                }
            }
        }
    }

    /// Look up the variable for a letter.
    pub fn token(&self, letter: char) -> Option<VarToken> {
        self.vars
            .iter()
            .position(|var| var.letter == letter)
            .map(VarToken)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarToken, &Variable)> {
        self.vars
            .iter()
            .enumerate()
            .map(|(idx, var)| (VarToken(idx), var))
    }
}

impl ops::Index<VarToken> for Variables {
    type Output = Variable;

    fn index(&self, var: VarToken) -> &Variable {
        let VarToken(idx) = var;
        &self.vars[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_appearance_order() {
        let vars = Variables::new("SEND+MORE=MONEY", 10).unwrap();
        let letters: String = vars.iter().map(|(_, var)| var.letter()).collect();
        assert_eq!(letters, "SENDMORY");
    }

    #[test]
    fn test_too_many_letters() {
        assert_eq!(
            Variables::new("ABCDEF+GHIJK=ABC", 10).unwrap_err(),
            Error::TooManyLetters {
                letters: 11,
                base: 10
            }
        );
        assert!(Variables::new("AB+C=D", 3).is_err());
        assert!(Variables::new("AB+C=D", 4).is_ok());
    }

    #[test]
    fn test_leading_zeros() {
        let mut vars = Variables::new("A+BC=DE", 10).unwrap();
        vars.exclude_leading_zeros(&["A", "BC", "DE"]);

        let a = vars.token('A').unwrap();
        let b = vars.token('B').unwrap();
        let c = vars.token('C').unwrap();
        let d = vars.token('D').unwrap();
        assert!(vars[a].domain().contains(0));
        assert!(!vars[b].domain().contains(0));
        assert!(vars[c].domain().contains(0));
        assert!(!vars[d].domain().contains(0));
        assert_eq!(vars[d].to_string(), "D={123456789}");
    }

    #[test]
    fn test_candidates_skip_used() {
        let vars = Variables::new("A+B=C", 4).unwrap();
        let a = vars.token('A').unwrap();
        let used: BitSet = [0, 2].iter().copied().collect();
        assert_eq!(vars[a].candidates(&used), [1, 3]);
        assert!(vars[a].admits(3, &used));
        assert!(!vars[a].admits(2, &used));
        assert!(!vars[a].admits(4, &used));
        assert_eq!(vars[a].display(Some(3)).to_string(), "A=3");
    }
}
