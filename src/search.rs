//! The backtracking search.
//!
//! The planned steps run as a depth-first search over an explicit stack
//! of choice points, one per step.  A guess step offers every digit its
//! variable may still take; a solve step offers the one digit its column
//! equation allows, if that digit is free; a validate step offers a
//! single pass-through if its column adds up.  When every step has
//! accepted, the current digits form a solution.
//!
//! The search only runs as far as the caller pulls solutions, and all of
//! its state lives in the [`Solutions`] iterator, so dropping it cancels
//! the search.

use bit_set::BitSet;
use log::trace;

use crate::column::Column;
use crate::strategy::Step;
use crate::variable::Variables;
use crate::{Solution, Val, VarToken};

/// One alternative of a choice point.
#[derive(Copy, Clone, Debug)]
struct Move {
    assign: Option<(VarToken, Val)>,
    carry: Option<(usize, Val)>,
    guess: bool,
}

/// A choice point for one step.
#[derive(Debug)]
struct Frame {
    // Alternatives not yet tried, last to be tried first.
    pending: Vec<Move>,

    // The digit taken by the alternative being explored, to be released
    // on backtracking.
    placed: Option<Val>,
}

/// A lazy sequence of puzzle solutions.
pub struct Solutions<'a> {
    vars: &'a Variables,
    columns: &'a [Column],
    steps: &'a [Step],
    base: Val,

    // Only meaningful for the variables and columns settled by the
    // steps on the stack.
    values: Vec<Val>,
    carries: Vec<Val>,
    used: BitSet,

    stack: Vec<Frame>,
    started: bool,
    exhausted: bool,
    num_guesses: u32,
}

impl<'a> Solutions<'a> {
    pub(crate) fn new(
        vars: &'a Variables,
        columns: &'a [Column],
        steps: &'a [Step],
        base: Val,
    ) -> Self {
        Solutions {
            vars,
            columns,
            steps,
            base,
            values: vec![0; vars.len()],
            carries: vec![0; columns.len()],
            used: BitSet::new(),
            stack: Vec::with_capacity(steps.len()),
            started: false,
            exhausted: false,
            num_guesses: 0,
        }
    }

    /// Get the number of digits guessed so far.
    pub fn num_guesses(&self) -> u32 {
        self.num_guesses
    }

    /// Build the choice point for a step, given the steps before it.
    fn expand(&self, depth: usize) -> Frame {
        let mut pending = Vec::new();

        match self.steps[depth] {
            Step::Guess(var) => {
                let candidates = self.vars[var].candidates(&self.used);
                pending.extend(candidates.into_iter().rev().map(|digit| Move {
                    assign: Some((var, digit)),
                    carry: None,
                    guess: true,
                }));
            }

            Step::SolveResult { column } => {
                let col = &self.columns[column];
                if let Some(var) = col.result() {
                    let (digit, carry) = col.solve_result(&self.values, &self.carries, self.base);
                    if self.vars[var].admits(digit, &self.used) && col.absorbs(carry) {
                        pending.push(Move {
                            assign: Some((var, digit)),
                            carry: Some((column, carry)),
                            guess: false,
                        });
                    }
                }
            }

            Step::SolveAddend { column, addend } => {
                let col = &self.columns[column];
                let (digit, carry) =
                    col.solve_addend(addend, &self.values, &self.carries, self.base);
                if self.vars[addend].admits(digit, &self.used) && col.absorbs(carry) {
                    pending.push(Move {
                        assign: Some((addend, digit)),
                        carry: Some((column, carry)),
                        guess: false,
                    });
                }
            }

            Step::Validate { column } => {
                let col = &self.columns[column];
                if let Some(carry) = col.validate(&self.values, &self.carries, self.base) {
                    pending.push(Move {
                        assign: None,
                        carry: Some((column, carry)),
                        guess: false,
                    });
                }
            }
        }

        Frame {
            pending,
            placed: None,
        }
    }

    /// Undo the alternative at the top of the stack and take the next
    /// one, popping exhausted choice points.  Returns false once the
    /// stack is empty.
    fn advance(&mut self) -> bool {
        while let Some(frame) = self.stack.last_mut() {
            if let Some(digit) = frame.placed.take() {
                self.used.remove(digit as usize);
            }

            match frame.pending.pop() {
                Some(mv) => {
                    if let Some((var, digit)) = mv.assign {
                        self.values[var.index()] = digit;
                        self.used.insert(digit as usize);
                        frame.placed = Some(digit);
                    }
                    if let Some((column, carry)) = mv.carry {
                        self.carries[column] = carry;
                    }
                    if mv.guess {
                        self.num_guesses += 1;
                    }
                    return true;
                }
                None => {
                    self.stack.pop();
                }
            }
        }

        false
    }

    fn emit(&self) -> Solution {
        let solution: Solution = self
            .vars
            .iter()
            .map(|(var, v)| (v.letter(), self.values[var.index()]))
            .collect();
        trace!("solution: {}", solution);
        solution
    }
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.exhausted {
            return None;
        }

        // Resume below the last solution by moving past it.
        if self.started && !self.advance() {
            self.exhausted = true;
            return None;
        }
        self.started = true;

        loop {
            let depth = self.stack.len();
            if depth == self.steps.len() {
                return Some(self.emit());
            }

            let frame = self.expand(depth);
            self.stack.push(frame);
            if !self.advance() {
                self.exhausted = true;
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Options, Puzzle, Solution};

    fn pairs(solution: &Solution) -> Vec<(char, i32)> {
        solution.iter().collect()
    }

    #[test]
    fn test_enumeration_order() {
        let puzzle = Puzzle::new("A+A=B").unwrap();
        let found: Vec<_> = puzzle.solutions().map(|s| pairs(&s)).collect();
        assert_eq!(
            found,
            [
                [('A', 1), ('B', 2)],
                [('A', 2), ('B', 4)],
                [('A', 3), ('B', 6)],
                [('A', 4), ('B', 8)],
            ]
        );
    }

    #[test]
    fn test_num_guesses() {
        let puzzle = Puzzle::new("A+A=B").unwrap();
        let mut solutions = puzzle.solutions();
        assert_eq!(solutions.num_guesses(), 0);
        assert!(solutions.next().is_some());
        assert_eq!(solutions.num_guesses(), 2);
        assert_eq!(solutions.by_ref().count(), 3);
        assert_eq!(solutions.num_guesses(), 10);
        assert!(solutions.next().is_none());
    }

    #[test]
    fn test_restart_after_partial_consumption() {
        let puzzle = Puzzle::new("TO+GO=OUT").unwrap();
        let first = puzzle.solutions().next();
        let all: Vec<_> = puzzle.solutions().collect();
        assert_eq!(first.as_ref(), all.first());
    }

    #[test]
    fn test_exhausted_search_stays_exhausted() {
        // A single solution: the second pull unwinds the whole stack.
        let puzzle = Puzzle::new("TO+GO=OUT").unwrap();
        let mut solutions = puzzle.solutions();
        let first = solutions.next().unwrap();
        assert_eq!(pairs(&first), [('G', 8), ('O', 1), ('T', 2), ('U', 0)]);
        assert!(solutions.next().is_none());
        assert!(solutions.next().is_none());
    }

    #[test]
    fn test_dead_end_at_first_step() {
        // Nothing fits the tens column, so the search never emits.
        let puzzle = Puzzle::new("AB+AB=A").unwrap();
        let mut solutions = puzzle.solutions();
        assert!(solutions.next().is_none());
        assert!(solutions.next().is_none());
    }

    #[test]
    fn test_final_carry_is_rejected() {
        // 5+5 would need a second result digit.
        let options = Options {
            base: 10,
            leading_zeros: true,
        };
        let puzzle = Puzzle::with_options("A+B=C", options).unwrap();
        for solution in puzzle.solutions() {
            assert!(solution['A'] + solution['B'] < 10);
        }
    }
}
