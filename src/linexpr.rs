//! Linear expressions.

use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, AddAssign};

use crate::variable::Variables;
use crate::{Coef, Val, VarToken};

/// A linear expression with integer coefficients.
///
/// ```text
///   coef1 * var1 + coef2 * var2 + ...
/// ```
///
/// Terms keep the order in which their variables were first added.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct LinExpr {
    // The non-zero coefficients in the linear expression.  If, after
    // some manipulations, the coefficient is 0, then it must be
    // removed.
    coef: Vec<(VarToken, Coef)>,
}

impl LinExpr {
    pub fn new() -> Self {
        LinExpr { coef: Vec::new() }
    }

    /// Add `coef * var` to the expression.
    pub fn add_term(&mut self, var: VarToken, coef: Coef) {
        match self.coef.iter().position(|&(v, _)| v == var) {
            Some(idx) => {
                self.coef[idx].1 += coef;
                if self.coef[idx].1.is_zero() {
                    self.coef.remove(idx);
                }
            }
            None => {
                if !coef.is_zero() {
                    self.coef.push((var, coef));
                }
            }
        }
    }

    /// The coefficient of a variable, zero if absent.
    pub fn coef(&self, var: VarToken) -> Coef {
        self.coef
            .iter()
            .find(|&&(v, _)| v == var)
            .map_or_else(Coef::zero, |&(_, c)| c)
    }

    /// Whether the variable's coefficient is +1 or -1.
    pub fn is_unit(&self, var: VarToken) -> bool {
        self.coef(var).abs().is_one()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarToken, Coef)> + '_ {
        self.coef.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.coef.is_empty()
    }

    /// Evaluate the expression, skipping the given variable if any.
    pub fn eval_without(&self, values: &[Val], skip: Option<VarToken>) -> Val {
        self.coef
            .iter()
            .filter(|&&(var, _)| Some(var) != skip)
            .map(|&(var, coef)| coef * values[var.index()])
            .sum()
    }

    /// Evaluate the expression with every variable's value.
    pub fn eval(&self, values: &[Val]) -> Val {
        self.eval_without(values, None)
    }

    /// Show the expression with letters in place of variables.
    pub fn display<'a>(&'a self, vars: &'a Variables) -> ExprDisplay<'a> {
        ExprDisplay { expr: self, vars }
    }
}

fn write_term(
    f: &mut fmt::Formatter<'_>,
    coef: Coef,
    name: &dyn fmt::Display,
) -> fmt::Result {
    if coef.is_one() {
        write!(f, "+{}", name)
    } else if coef.is_negative() && coef.abs().is_one() {
        write!(f, "-{}", name)
    } else {
        write!(f, "{:+}{}", coef, name)
    }
}

impl fmt::Display for LinExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(tok, coef) in self.coef.iter() {
            write_term(f, coef, &format_args!("x{}", tok.index()))?;
        }
        Ok(())
    }
}

impl fmt::Debug for LinExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinExpr {{ {} }}", self)
    }
}

/// Displays an expression as `+S+2M-O`.
pub struct ExprDisplay<'a> {
    expr: &'a LinExpr,
    vars: &'a Variables,
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tok, coef) in self.expr.iter() {
            write_term(f, coef, &self.vars[tok].letter())?;
        }
        Ok(())
    }
}

/*--------------------------------------------------------------*/

impl From<VarToken> for LinExpr {
    fn from(var: VarToken) -> Self {
        let mut expr = LinExpr::new();
        expr.add_term(var, Coef::one());
        expr
    }
}

impl AddAssign<VarToken> for LinExpr {
    fn add_assign(&mut self, rhs: VarToken) {
        self.add_term(rhs, Coef::one());
    }
}

impl Add<VarToken> for LinExpr {
    type Output = LinExpr;
    fn add(mut self, rhs: VarToken) -> Self::Output {
        self += rhs;
        self
    }
}
