//! The puzzle and its solving strategy.

use log::info;

use crate::column::{build_columns, Column};
use crate::parser::parse;
use crate::search::Solutions;
use crate::strategy::{plan, Step};
use crate::variable::Variables;
use crate::{Error, PsResult, Solution, Val};

/// The largest supported base: digits `0-9` then `A-Z`.
pub const MAX_BASE: Val = 36;

/// How a puzzle is to be read.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// The number base of the arithmetic, from 2 to [`MAX_BASE`].
    pub base: Val,

    /// Whether a term of more than one letter may start with a zero.
    pub leading_zeros: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            base: 10,
            leading_zeros: false,
        }
    }
}

/// The puzzle to be solved.
#[derive(Clone, Debug)]
pub struct Puzzle {
    text: String,
    options: Options,
    vars: Variables,
    columns: Vec<Column>,
    steps: Vec<Step>,
}

impl Puzzle {
    /// Set up a base-10 puzzle without leading zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// let puzzle = alphametic_solver::Puzzle::new("SEND + MORE = MONEY");
    /// assert!(puzzle.is_ok());
    ///
    /// let puzzle = alphametic_solver::Puzzle::new("SEND MORE MONEY");
    /// assert!(puzzle.is_err());
    /// ```
    pub fn new(text: &str) -> PsResult<Self> {
        Self::with_options(text, Options::default())
    }

    /// Set up a puzzle with the given base and leading-zero policy.
    ///
    /// Fails if the base is out of range, if the text is malformed, or if
    /// the puzzle has more distinct letters than the base has digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphametic_solver::{Options, Puzzle};
    ///
    /// let options = Options { base: 16, ..Options::default() };
    /// let puzzle = Puzzle::with_options("A+A=BC", options).unwrap();
    /// assert_eq!(puzzle.solve_all().len(), 8);
    /// ```
    pub fn with_options(text: &str, options: Options) -> PsResult<Self> {
        if !(2..=MAX_BASE).contains(&options.base) {
            return Err(Error::InvalidBase(options.base));
        }

        let equation = parse(text)?;
        let mut vars = Variables::new(text, options.base)?;
        if !options.leading_zeros {
            vars.exclude_leading_zeros(&equation.terms);
        }

        let columns = build_columns(&equation, &vars);
        let steps = plan(&columns, &vars);

        info!(
            "{}: {} letters, {} columns, {} steps",
            equation,
            vars.len(),
            columns.len(),
            steps.len()
        );

        Ok(Puzzle {
            text: text.to_string(),
            options,
            vars,
            columns,
            steps,
        })
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// The puzzle's letters, in order of first appearance.
    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    /// The planned solving steps, in search order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Lazily generate every solution.
    ///
    /// # Examples
    ///
    /// ```
    /// let puzzle = alphametic_solver::Puzzle::new("A+A=B").unwrap();
    /// let mut solutions = puzzle.solutions();
    /// let first = solutions.next().unwrap();
    /// assert_eq!((first['A'], first['B']), (1, 2));
    /// ```
    pub fn solutions(&self) -> Solutions<'_> {
        Solutions::new(&self.vars, &self.columns, &self.steps, self.options.base)
    }

    /// Find any solution to the puzzle.
    pub fn solve(&self) -> PsResult<Solution> {
        self.solutions().next().ok_or(Error::NoSolution)
    }

    /// Find the solution to the puzzle, verifying that it is unique.
    ///
    /// # Examples
    ///
    /// ```
    /// let puzzle = alphametic_solver::Puzzle::new("A+A=B").unwrap();
    /// assert!(puzzle.solve_unique().is_none());
    /// ```
    pub fn solve_unique(&self) -> Option<Solution> {
        let mut solutions = self.solutions();
        match (solutions.next(), solutions.next()) {
            (Some(solution), None) => Some(solution),
            _ => None,
        }
    }

    /// Find all solutions to the puzzle.
    pub fn solve_all(&self) -> Vec<Solution> {
        self.solutions().collect()
    }

    /// Write the puzzle text with each letter replaced by its digit.
    ///
    /// Only defined for bases up to 10, where every digit is a single
    /// character.
    pub fn substitute(&self, solution: &Solution) -> PsResult<String> {
        if self.options.base > 10 {
            return Err(Error::Substitution(self.options.base));
        }

        Ok(self
            .text
            .chars()
            .map(|c| match solution.get(c) {
                Some(digit) => char::from_digit(digit as u32, 10).unwrap_or(c),
                None => c,
            })
            .collect())
    }
}
