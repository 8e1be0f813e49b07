//! Exhaustiveness.
//!
//! The planned search must find exactly the assignments a brute-force
//! enumeration of every injective letter-to-digit mapping finds.

use alphametic_solver::{Error, Options, Puzzle, Solution, Val};

/// Split a puzzle into its addends and result, ignoring whitespace.
fn split(text: &str) -> (Vec<String>, String) {
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let (lhs, rhs) = text.split_once('=').expect("equation");
    let addends = lhs.split('+').map(str::to_string).collect();
    (addends, rhs.trim_start_matches('=').to_string())
}

fn value(term: &str, digits: &[(char, Val)], base: Val) -> i64 {
    term.chars().fold(0, |acc, c| {
        let &(_, digit) = digits.iter().find(|&&(l, _)| l == c).expect("letter");
        acc * base as i64 + digit as i64
    })
}

fn brute_force(text: &str, options: Options) -> Vec<Solution> {
    let (addends, result) = split(text);
    let mut letters: Vec<char> = Vec::new();
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        if !letters.contains(&c) {
            letters.push(c);
        }
    }

    let mut leading: Vec<char> = Vec::new();
    if !options.leading_zeros {
        for term in addends.iter().chain(std::iter::once(&result)) {
            if term.len() > 1 {
                leading.extend(term.chars().next());
            }
        }
    }

    let mut found = Vec::new();
    let mut digits = Vec::new();
    assign(&letters, &leading, options.base, &mut digits, &mut |digits: &[(char, Val)]| {
        let sum: i64 = addends
            .iter()
            .map(|term| value(term, digits, options.base))
            .sum();
        if sum == value(&result, digits, options.base) {
            found.push(digits.iter().copied().collect());
        }
    });
    found
}

fn assign(
    letters: &[char],
    leading: &[char],
    base: Val,
    digits: &mut Vec<(char, Val)>,
    check: &mut dyn FnMut(&[(char, Val)]),
) {
    let letter = match letters.get(digits.len()) {
        Some(&letter) => letter,
        None => return check(digits),
    };

    for digit in 0..base {
        if digits.iter().any(|&(_, d)| d == digit) {
            continue;
        }
        if digit == 0 && leading.contains(&letter) {
            continue;
        }
        digits.push((letter, digit));
        assign(letters, leading, base, digits, check);
        digits.pop();
    }
}

fn sorted(mut solutions: Vec<Solution>) -> Vec<String> {
    let mut shown: Vec<String> = solutions.drain(..).map(|s| s.to_string()).collect();
    shown.sort();
    shown
}

fn check(text: &str, options: Options) {
    let puzzle = Puzzle::with_options(text, options).expect("puzzle");
    let expected = sorted(brute_force(text, options));
    let actual = sorted(puzzle.solve_all());
    assert_eq!(actual, expected, "{} in base {}", text, options.base);
}

const PUZZLES: &[&str] = &[
    "A+A=B",
    "A+B=C",
    "A+B=BA",
    "A+B+B=A",
    "AB+BA=CC",
    "AB+C=D",
    "BA+BA=AC",
    "TO+GO=OUT",
    "AS+A=MOM",
    "I+BB=ILL",
    "A+A+A+B=BC",
    "AB+AB+AB=CAB",
];

#[test]
fn bruteforce_base10() {
    for text in PUZZLES {
        check(text, Options::default());
    }
}

#[test]
fn bruteforce_leading_zeros() {
    let options = Options {
        base: 10,
        leading_zeros: true,
    };
    for text in PUZZLES {
        check(text, options);
    }
}

#[test]
fn bruteforce_other_bases() {
    for base in [2, 3, 5, 7, 12] {
        for leading_zeros in [false, true] {
            let options = Options {
                base,
                leading_zeros,
            };
            for text in PUZZLES {
                match Puzzle::with_options(text, options) {
                    Ok(_) => check(text, options),
                    Err(Error::TooManyLetters { letters, .. }) => assert!(letters > base as usize),
                    Err(err) => panic!("{}: {}", text, err),
                }
            }
        }
    }
}

#[test]
fn bruteforce_is_repeatable() {
    let puzzle = Puzzle::new("AB+BA=CC").expect("puzzle");
    let first: Vec<Solution> = puzzle.solutions().collect();
    let second: Vec<Solution> = puzzle.solutions().collect();
    assert!(!first.is_empty());
    assert_eq!(first, second);

    let again = Puzzle::new("AB+BA=CC").expect("puzzle");
    assert_eq!(again.solve_all(), first);
}
