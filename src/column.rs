//! Digit-sum columns.
//!
//! With `SEND+MORE=MONEY`, the units column expresses the digit sum
//! `D+E=Y`, the tens column `carry+N+R=E`, and so on up to the column
//! holding only `carry=M`.  Each column takes a carry-in from the column
//! below it, if any, and gives a carry-out to the column above it, if
//! any.

use bit_set::BitSet;
use std::fmt;

use crate::linexpr::LinExpr;
use crate::parser::{Equation, Operator};
use crate::variable::Variables;
use crate::{Coef, Val, VarToken};

/// How a column's one remaining unknown can be computed outright.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// The result digit, which is not also an addend.
    Result,
    /// An addend with a coefficient of +1 or -1.
    Addend(VarToken),
}

/// One digit position of the puzzle.
#[derive(Clone, Debug)]
pub struct Column {
    position: usize,

    // The addend variables, weighted by how often they appear.
    addends: LinExpr,

    // None when the result term is shorter than this column.
    result: Option<VarToken>,

    carry_in: Option<usize>,
    carry_out: Option<usize>,
}

impl Column {
    fn new(position: usize, result: Option<VarToken>) -> Self {
        Column {
            position,
            addends: LinExpr::new(),
            result,
            carry_in: None,
            carry_out: None,
        }
    }

    /// Link this column to take its carry-in from `other`.
    fn carry_from(&mut self, other: &mut Column) {
        self.carry_in = Some(other.position);
        other.carry_out = Some(self.position);
    }

    /// The digit position; 0 is the units column.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn addends(&self) -> &LinExpr {
        &self.addends
    }

    pub fn result(&self) -> Option<VarToken> {
        self.result
    }

    /// The position of the column this one takes its carry from.
    pub fn carry_in(&self) -> Option<usize> {
        self.carry_in
    }

    /// The position of the column this one gives its carry to.
    pub fn carry_out(&self) -> Option<usize> {
        self.carry_out
    }

    /// The variables of this column that are not yet known, most used
    /// first.  The result counts against its own use as an addend; ties
    /// keep the order of first appearance, addends before the result.
    pub fn unknowns(&self, knowns: &BitSet) -> Vec<VarToken> {
        let mut usage: Vec<(VarToken, Coef)> = self.addends.iter().collect();
        if let Some(result) = self.result {
            match usage.iter_mut().find(|(var, _)| *var == result) {
                Some((_, count)) => *count -= 1,
                None => usage.push((result, -1)),
            }
        }

        usage.sort_by_key(|&(_, count)| std::cmp::Reverse(count.abs()));
        usage
            .into_iter()
            .map(|(var, _)| var)
            .filter(|var| !knowns.contains(var.index()))
            .collect()
    }

    /// Whether this column can compute `unknown` directly once every
    /// other variable in it is known.
    pub fn resolution(&self, unknown: VarToken) -> Option<Resolution> {
        if Some(unknown) == self.result {
            if self.addends.coef(unknown) == 0 {
                return Some(Resolution::Result);
            }
        } else if self.addends.is_unit(unknown) {
            return Some(Resolution::Addend(unknown));
        }

        None
    }

    /// The weighted sum of the known addends plus the carry-in.
    fn partial_sum(&self, values: &[Val], carries: &[Val], skip: Option<VarToken>) -> Val {
        let carry = self.carry_in.map_or(0, |col| carries[col]);
        self.addends.eval_without(values, skip) + carry
    }

    /// The digit the sum must end in.  A column past the end of the
    /// result term must sum to zero.
    fn target(&self, values: &[Val]) -> Val {
        self.result.map_or(0, |var| values[var.index()])
    }

    /// Whether the carry-out can be passed on.  A carry out of the most
    /// significant column is a contradiction.
    pub fn absorbs(&self, carry: Val) -> bool {
        carry == 0 || self.carry_out.is_some()
    }

    /// Compute the result digit and carry-out from the known addends.
    pub fn solve_result(&self, values: &[Val], carries: &[Val], base: Val) -> (Val, Val) {
        let sum = self.partial_sum(values, carries, None);
        (sum.rem_euclid(base), sum.div_euclid(base))
    }

    /// Compute the digit and carry-out of an addend with a unit
    /// coefficient, from every other variable in the column.
    pub fn solve_addend(
        &self,
        addend: VarToken,
        values: &[Val],
        carries: &[Val],
        base: Val,
    ) -> (Val, Val) {
        let multiplier = self.addends.coef(addend);
        debug_assert!(multiplier.abs() == 1);

        let partial = self.partial_sum(values, carries, Some(addend));
        let digit = ((self.target(values) - partial) * multiplier).rem_euclid(base);
        let sum = partial + digit * multiplier;
        (digit, sum.div_euclid(base))
    }

    /// Check the column once all its variables are known, returning the
    /// carry-out if the sum holds.
    pub fn validate(&self, values: &[Val], carries: &[Val], base: Val) -> Option<Val> {
        let sum = self.partial_sum(values, carries, None);
        let (digit, carry) = (sum.rem_euclid(base), sum.div_euclid(base));
        if digit == self.target(values) && self.absorbs(carry) {
            Some(carry)
        } else {
            None
        }
    }

    /// Show the column as an equation, e.g. `E=carry+N+R`.
    pub fn display<'a>(&'a self, vars: &'a Variables) -> ColumnDisplay<'a> {
        ColumnDisplay { column: self, vars }
    }
}

/// Displays a column as `Y=+D+E`, `E=carry+N+R`, or `0=carry+A` when
/// the column has no result letter.
pub struct ColumnDisplay<'a> {
    column: &'a Column,
    vars: &'a Variables,
}

impl fmt::Display for ColumnDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column.result {
            Some(var) => write!(f, "{}=", self.vars[var].letter())?,
            None => write!(f, "0=")?,
        }
        if self.column.carry_in.is_some() {
            write!(f, "carry")?;
        }
        write!(f, "{}", self.column.addends.display(self.vars))
    }
}

/// Break the equation into its digit-sum columns, units column first,
/// linked by their carries.
///
/// # Panics
///
/// Panics if an addend is joined by anything but `+`, which the parser
/// never produces.
pub fn build_columns(eq: &Equation, vars: &Variables) -> Vec<Column> {
    let num_columns = eq.terms.iter().map(|term| term.chars().count()).max().unwrap_or(0);

    // Right-align the terms: digit k of each term is its k-th from the end.
    let digits = |term: &str| -> Vec<VarToken> {
        term.chars().rev().filter_map(|c| vars.token(c)).collect()
    };
    let result = digits(eq.result());
    let addends: Vec<Vec<VarToken>> = eq.addends().iter().map(|term| digits(term)).collect();

    // The first term is implicitly added; the final "=" is dropped.
    let operators = std::iter::once(Operator::Add)
        .chain(eq.operators.iter().copied())
        .take(addends.len());

    let mut columns: Vec<Column> = (0..num_columns)
        .map(|pos| Column::new(pos, result.get(pos).copied()))
        .collect();

    for (op, term) in operators.zip(&addends) {
        for (column, &var) in columns.iter_mut().zip(term) {
            match op {
                Operator::Add => column.addends += var,
                _ => unreachable!("unexpected operator: {}", op),
            }
        }
    }

    for pos in 1..columns.len() {
        let (lower, upper) = columns.split_at_mut(pos);
        upper[0].carry_from(&mut lower[pos - 1]);
    }

    columns
}
