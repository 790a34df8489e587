//! Types shared between the CLI and the solver
//!
//!

use core::fmt;

/// Search cost of a node: number of operations applied since a seed
pub type Depth = i32;

/// Indicates if a chain was found, the search came up empty or another error occured
pub enum ExitCode {
    Solved = 0,
    NoSolution = 1,
    Error = 2,
}

#[derive(Debug, Clone)]
pub enum Error {
    Parse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(why) => write!(f, "Parse error: {}", why),
        }
    }
}

/// Tuning knobs for one solve call, assembled from the CLI flags
#[derive(Debug, Clone)]
pub struct Config {
    /// intermediate values are kept within `[-w, w]` with `w = window_factor * |target|`
    pub window_factor: i64,
    /// largest operand `**` accepts
    pub max_exponent: i64,
    /// reject odd exponents on negative values
    pub guard_odd_exponents: bool,
    /// nodes at this depth are no longer expanded
    pub max_depth: Option<Depth>,
    /// stop after expanding this many nodes
    pub max_nodes: Option<usize>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_factor: 3,
            max_exponent: 11,
            guard_odd_exponents: true,
            max_depth: None,
            max_nodes: None,
            verbose: false,
        }
    }
}

/// Bookkeeping collected over one solve call
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub nodes_expanded: usize,
    pub nodes_enqueued: usize,
    pub pruned_window: usize,
    pub pruned_dominated: usize,
    pub reached_depth: Depth,
    /// set when a max_depth / max_nodes cap cut the search short
    pub capped: bool,
}
