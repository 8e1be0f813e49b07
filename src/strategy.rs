//! Planning the order in which the search fills in digits.
//!
//! The columns are visited from the units column up.  Carries only flow
//! upward, so a column can be checked as soon as its own variables and
//! its carry-in are known.  Within a column, every unknown but the last
//! is guessed; the last is computed outright when the column allows it,
//! otherwise it is guessed too and the column validated.

use bit_set::BitSet;
use log::debug;
use std::fmt;

use crate::column::{Column, Resolution};
use crate::variable::Variables;
use crate::VarToken;

/// One step of the search plan.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
    /// Try each unused digit the variable allows.
    Guess(VarToken),

    /// Compute the column's result digit from its known addends.
    SolveResult { column: usize },

    /// Compute a unit-coefficient addend from the rest of its column.
    SolveAddend { column: usize, addend: VarToken },

    /// Check a column whose variables are all known.
    Validate { column: usize },
}

impl Step {
    /// Show the step with letters in place of variables.
    pub fn display<'a>(&'a self, vars: &'a Variables) -> StepDisplay<'a> {
        StepDisplay { step: self, vars }
    }
}

/// Displays a step as e.g. `guess S`, `solve R in column 1`.
pub struct StepDisplay<'a> {
    step: &'a Step,
    vars: &'a Variables,
}

impl fmt::Display for StepDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.step {
            Step::Guess(var) => write!(f, "guess {}", self.vars[var].letter()),
            Step::SolveResult { column } => write!(f, "solve result in column {}", column),
            Step::SolveAddend { column, addend } => write!(
                f,
                "solve {} in column {}",
                self.vars[addend].letter(),
                column
            ),
            Step::Validate { column } => write!(f, "validate column {}", column),
        }
    }
}

/// Plan the solving steps for the columns, units column first.
pub fn plan(columns: &[Column], vars: &Variables) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut knowns = BitSet::new();

    for column in columns.iter() {
        let unknowns = column.unknowns(&knowns);
        debug!(
            "{}: [{}]",
            column.display(vars),
            unknowns
                .iter()
                .map(|&var| vars[var].letter().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let position = column.position();
        match unknowns.split_last() {
            Some((&last, rest)) => {
                steps.extend(rest.iter().map(|&var| Step::Guess(var)));

                match column.resolution(last) {
                    Some(Resolution::Result) => steps.push(Step::SolveResult { column: position }),
                    Some(Resolution::Addend(addend)) => steps.push(Step::SolveAddend {
                        column: position,
                        addend,
                    }),
                    None => {
                        steps.push(Step::Guess(last));
                        steps.push(Step::Validate { column: position });
                    }
                }

                for var in unknowns.iter() {
                    knowns.insert(var.index());
                }
            }
            None => steps.push(Step::Validate { column: position }),
        }
    }

    steps
}
