//! Puzzle grammar.
//!
//! A puzzle is a run of alphabetic terms separated by operators, such as
//! `SEND + MORE = MONEY`.  Whitespace is ignored anywhere, and a run of
//! `=` signs counts as a single `=`, so the multi-line form
//!
//! ```text
//!   SEND
//!  +MORE
//!  =====
//!  MONEY
//! ```
//!
//! parses the same as the one-line form.

use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{map, value},
    multi::{many0, many1},
    IResult,
    Parser,
};
use thiserror::Error;

/// The minimum number of tokens in a puzzle: `A+B=C`.
const MIN_TOKENS: usize = 5;

/// The grammar rule a puzzle text broke.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected at least 5 tokens, found {0}")]
    TooFewTokens(usize),

    #[error("{terms} terms do not fit between {operators} operators")]
    TermCount { terms: usize, operators: usize },

    #[error("unsupported operator {0:?}")]
    UnsupportedOperator(String),

    #[error("expected exactly one '=', found {0}")]
    EqualityCount(usize),

    #[error("last operator expected to be '='")]
    MissingResult,
}

/// A supported operator.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Operator {
    Add,
    Equals,
}

impl FromStr for Operator {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "=" => Ok(Operator::Equals),
            _ => Err(FormatError::UnsupportedOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Equals => write!(f, "="),
        }
    }
}

/// A parsed puzzle: the terms in order, and the operators between them.
///
/// There is always one more term than operators, exactly one operator is
/// `=`, and it is the last one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Equation {
    pub operators: Vec<Operator>,
    pub terms: Vec<String>,
}

impl Equation {
    /// The terms left of `=`.
    pub fn addends(&self) -> &[String] {
        &self.terms[..self.terms.len() - 1]
    }

    /// The term right of `=`.
    pub fn result(&self) -> &str {
        &self.terms[self.terms.len() - 1]
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terms[0])?;
        for (op, term) in self.operators.iter().zip(&self.terms[1..]) {
            write!(f, "{}{}", op, term)?;
        }
        Ok(())
    }
}

/// Parser result type over the puzzle text.
type PResult<'a, O> = IResult<&'a str, O>;

/// A maximal run of letters.
fn term(input: &str) -> PResult<'_, String> {
    map(take_while1(char::is_alphabetic), str::to_string).parse(input)
}

/// A maximal run of non-letters, with each run of `=` collapsed to one.
fn operator(input: &str) -> PResult<'_, String> {
    map(
        many1(alt((
            value("=", many1(char('='))),
            take_while1(|c: char| !c.is_alphabetic() && c != '='),
        ))),
        |parts: Vec<&str>| parts.concat(),
    )
    .parse(input)
}

/// Split the text into alternating term and operator tokens, after
/// removing whitespace.
fn tokenize(text: &str) -> Vec<String> {
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    // Every character starts either a term or an operator, so this
    // consumes the whole text.
    let tokens = match many0(alt((term, operator))).parse(text.as_str()) {
        Ok((_, tokens)) => tokens,
        Err(_) => Vec::new(),
    };
    tokens
}

/// Parse a puzzle into its operators and terms.
///
/// # Examples
///
/// ```
/// use alphametic_solver::parser::{parse, Operator};
///
/// let eq = parse("SEND + MORE == MONEY").unwrap();
/// assert_eq!(eq.terms, ["SEND", "MORE", "MONEY"]);
/// assert_eq!(eq.operators, [Operator::Add, Operator::Equals]);
/// ```
pub fn parse(text: &str) -> Result<Equation, FormatError> {
    let tokens = tokenize(text);
    let (terms, operators): (Vec<String>, Vec<String>) = tokens
        .iter()
        .cloned()
        .partition(|token| token.chars().all(char::is_alphabetic));

    if tokens.len() < MIN_TOKENS {
        return Err(FormatError::TooFewTokens(tokens.len()));
    }
    if terms.len() != operators.len() + 1 {
        return Err(FormatError::TermCount {
            terms: terms.len(),
            operators: operators.len(),
        });
    }

    let operators = operators
        .iter()
        .map(|op| op.parse())
        .collect::<Result<Vec<Operator>, _>>()?;

    let equals = operators.iter().filter(|&&op| op == Operator::Equals).count();
    if equals != 1 {
        return Err(FormatError::EqualityCount(equals));
    }
    if operators.last() != Some(&Operator::Equals) {
        return Err(FormatError::MissingResult);
    }

    Ok(Equation { operators, terms })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_collapses_equals() {
        assert_eq!(tokenize("AB + C\n=====\nDE"), ["AB", "+", "C", "=", "DE"]);
    }

    #[test]
    fn test_tokenize_mixed_operator_run() {
        assert_eq!(tokenize("A+==B-C"), ["A", "+=", "B", "-", "C"]);
        assert_eq!(tokenize(""), Vec::<String>::new());
    }

    #[test]
    fn test_parse_multiline() {
        let eq = parse("SEND\n\t+MORE\n\t=====\n\tMONEY").unwrap();
        assert_eq!(eq.addends(), ["SEND", "MORE"]);
        assert_eq!(eq.result(), "MONEY");
        assert_eq!(eq.to_string(), "SEND+MORE=MONEY");
    }

    #[test]
    fn test_parse_many_addends() {
        let eq = parse("SEND +MORE + STUFF= MONEY").unwrap();
        assert_eq!(eq.terms.len(), 4);
        assert_eq!(eq.operators, [Operator::Add, Operator::Add, Operator::Equals]);
    }

    #[test]
    fn test_no_operators() {
        assert_eq!(parse("SEND MORE MONEY"), Err(FormatError::TooFewTokens(1)));
    }

    #[test]
    fn test_two_equals() {
        assert_eq!(parse("A=B=C"), Err(FormatError::EqualityCount(2)));
    }

    #[test]
    fn test_no_equals() {
        assert_eq!(parse("A+B+C"), Err(FormatError::EqualityCount(0)));
    }

    #[test]
    fn test_equals_not_last() {
        assert_eq!(parse("A=B+C"), Err(FormatError::MissingResult));
    }

    #[test]
    fn test_unsupported_operator() {
        assert_eq!(
            parse("A-B=C"),
            Err(FormatError::UnsupportedOperator("-".to_string()))
        );
        assert_eq!(
            parse("A+B*C=D"),
            Err(FormatError::UnsupportedOperator("*".to_string()))
        );
    }

    #[test]
    fn test_dangling_operator() {
        assert_eq!(
            parse("+A+B=C"),
            Err(FormatError::TermCount {
                terms: 3,
                operators: 3
            })
        );
    }
}
