//! Binary 'beltmatic' is a cmd-line companion for number-crafting games: it finds
//! the shortest chain of arithmetic operations building a target from the numbers
//! you have available.
//!

use clap::{Parser, Subcommand};
use ops::{Op, ALL_OPS};
use shared::{Config, Depth, ExitCode};
use std::process::exit;

// module declarations
mod ops;
mod shared;
mod solver;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Numbers available to build with, comma separated
    #[clap(short, long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    numbers: Vec<i64>,

    /// Operators the chain may draw from, comma separated (any of + - * / **);
    /// defaults to all five
    #[clap(short, long, value_delimiter = ',')]
    ops: Vec<String>,

    /// Intermediate values are kept within [-w, w] with w = window-factor * |target|.
    /// Tightening it speeds the search up but can make reachable targets report no solution
    #[clap(long, default_value_t = 3)]
    window_factor: i64,

    /// Largest operand ** accepts; raising it grows the search space quickly
    #[clap(long, default_value_t = 11)]
    max_exponent: i64,

    /// Allow odd exponents on negative values
    #[clap(long)]
    allow_odd_exponents: bool,

    /// Stop expanding nodes at this depth
    #[clap(long)]
    max_depth: Option<Depth>,

    /// Stop after expanding this many nodes
    #[clap(long)]
    max_nodes: Option<usize>,

    /// Find a chain / measure solve times
    #[clap(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Find the shortest chain reaching the target and print it
    Solve {
        /// The number to build
        #[clap(allow_hyphen_values = true)]
        target: i64,

        /// Print every node as it is expanded
        #[clap(short, long)]
        verbose: bool,
    },
    /// Measure solve time for every target in a range
    Bench {
        /// Given start target s we solve for s
        start: i64,
        /// Given end target e we solve for each target between s and e
        end: Option<i64>,
        /// Given interval i we solve for each target between s and e with intervals of i
        #[clap(default_value_t = 1)]
        interval: i64,
    },
}

fn main() {
    let cli = Cli::parse();
    let exit = |(exit_code, result): (ExitCode, String)| -> ! {
        println!("{}", result);
        exit(exit_code as i32);
    };

    // attempt to parse the operator set, and exit with exitcode and error if it fails
    let ops = if cli.ops.is_empty() {
        ALL_OPS.to_vec()
    } else {
        match cli.ops.iter().map(|s| s.parse()).collect::<Result<Vec<Op>, _>>() {
            Err(why) => exit((ExitCode::Error, format!("{}", why))),
            Ok(ops) => ops,
        }
    };

    let config = |verbose: bool| Config {
        window_factor: cli.window_factor,
        max_exponent: cli.max_exponent,
        guard_odd_exponents: !cli.allow_odd_exponents,
        max_depth: cli.max_depth,
        max_nodes: cli.max_nodes,
        verbose,
    };

    match cli.mode {
        Mode::Solve { target, verbose } => {
            exit(solver::print_solve(target, &cli.numbers, &ops, &config(verbose)))
        }
        Mode::Bench {
            start,
            end,
            interval,
        } => exit(solver::bench(
            &cli.numbers,
            &ops,
            start,
            end,
            interval,
            &config(false),
        )),
    };
}
