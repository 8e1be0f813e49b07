use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use alphametic_solver::{Options, Puzzle, Val};

/// Alphametic puzzle solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Puzzles to solve (e.g., "SEND+MORE=MONEY").  When none are given,
    /// puzzles are read from stdin, separated by blank lines.
    puzzles: Vec<String>,

    /// The number base, from 2 to 36
    #[arg(short, long, default_value_t = 10)]
    base: Val,

    /// Allow multi-letter terms to start with a zero
    #[arg(short = 'z', long)]
    leading_zeros: bool,

    /// Stop after this many solutions per puzzle
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Log the solving strategy
    #[arg(short, long)]
    debug: bool,
}

fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder.init();
}

/// Read puzzles, one per block of non-blank lines.
fn read_puzzles<R: BufRead>(input: R) -> io::Result<Vec<String>> {
    let mut puzzles = Vec::new();
    let mut lines: Vec<String> = Vec::new();

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            if !lines.is_empty() {
                puzzles.push(lines.join("\n"));
                lines.clear();
            }
        } else {
            lines.push(line);
        }
    }
    if !lines.is_empty() {
        puzzles.push(lines.join("\n"));
    }

    Ok(puzzles)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let puzzles = if cli.puzzles.is_empty() {
        match read_puzzles(io::stdin().lock()) {
            Ok(puzzles) => puzzles,
            Err(e) => {
                eprintln!("Error reading puzzles: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        cli.puzzles.clone()
    };

    let options = Options {
        base: cli.base,
        leading_zeros: cli.leading_zeros,
    };
    let mut failed = false;

    for (idx, text) in puzzles.iter().enumerate() {
        println!("\nSolving Puzzle #{}:\n", idx + 1);

        let puzzle = match Puzzle::with_options(text, options) {
            Ok(puzzle) => puzzle,
            Err(e) => {
                println!("Error in puzzle: {e}");
                failed = true;
                continue;
            }
        };

        log::debug!(
            "plan: {}",
            puzzle
                .steps()
                .iter()
                .map(|step| step.display(puzzle.variables()).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut solutions = puzzle.solutions();
        let mut count = 0;
        for solution in solutions.by_ref().take(cli.limit.unwrap_or(usize::MAX)) {
            count += 1;
            println!("Solution #{count}:");
            match puzzle.substitute(&solution) {
                Ok(numeric) => println!("{numeric}"),
                Err(_) => println!("{solution}"),
            }
            println!("{}", "-".repeat(20));
        }

        if count == 0 {
            println!("No solution found");
        }
        log::info!("{} guesses", solutions.num_guesses());
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
