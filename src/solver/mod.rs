//! The search engine: uniform-cost exploration of the implicit graph whose
//! nodes are integer values and whose edges are legal `(operator, operand)`
//! applications. Every edge costs one step, so the first time the target is
//! popped off the frontier its chain is a shortest one.
//!
//!

pub mod node;

use crate::ops::Op;
use crate::shared::{Config, Depth, Diagnostics, ExitCode};
use crate::solver::node::{Arena, NodeId, Solution};

use colored::Colorize;
use rustc_hash::FxHashMap;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Searches for a shortest chain building `target` from `numbers` using the
/// operators in `ops`. Returns `None` when the frontier is exhausted or a
/// configured cap cut the search short.
pub fn solve(
    target: i64,
    numbers: &[i64],
    ops: &[Op],
    config: &Config,
) -> (Diagnostics, Option<Solution>) {
    let mut diagnostics = Diagnostics::default();
    let mut arena = Arena::new();

    // value -> cheapest depth at which it has been enqueued
    let mut best_depth: FxHashMap<i64, Depth> = FxHashMap::default();

    // min-heap on (depth, creation order) so ties resolve deterministically
    let mut frontier: BinaryHeap<Reverse<(Depth, NodeId)>> = BinaryHeap::new();

    // dedupe operands keeping first occurrence, so tie-breaks stay stable
    let mut operands: Vec<i64> = Vec::with_capacity(numbers.len());
    for &n in numbers {
        if !operands.contains(&n) {
            operands.push(n);
        }
    }

    let window = config.window_factor.saturating_mul(target.saturating_abs());

    for &n in &operands {
        let id = arena.seed(n);
        if n == target {
            return (diagnostics, Some(Solution::new(arena, id)));
        }
        best_depth.insert(n, 0);
        frontier.push(Reverse((0, id)));
        diagnostics.nodes_enqueued += 1;
    }

    while let Some(Reverse((depth, id))) = frontier.pop() {
        diagnostics.reached_depth = Depth::max(diagnostics.reached_depth, depth);

        // depth-ordered frontier: the first pop of the target is minimal
        if arena[id].value == target {
            return (diagnostics, Some(Solution::new(arena, id)));
        }

        if let Some(max_depth) = config.max_depth {
            if depth >= max_depth {
                diagnostics.capped = true;
                continue;
            }
        }
        if let Some(max_nodes) = config.max_nodes {
            if diagnostics.nodes_expanded >= max_nodes {
                diagnostics.capped = true;
                break;
            }
        }

        if config.verbose {
            print_debug(&arena, id, frontier.len());
        }

        let current_value = arena[id].value;
        diagnostics.nodes_expanded += 1;

        for &op in ops {
            for &operand in &operands {
                for (value, step) in op.apply(current_value, operand, config) {
                    if value < -window || value > window {
                        diagnostics.pruned_window += 1;
                        continue;
                    }
                    let child_depth = depth + 1;
                    match best_depth.get(&value) {
                        // an equal or cheaper chain to this value already exists
                        Some(&seen) if seen <= child_depth => {
                            diagnostics.pruned_dominated += 1;
                        }
                        _ => {
                            best_depth.insert(value, child_depth);
                            let child = arena.child(id, value, step);
                            frontier.push(Reverse((child_depth, child)));
                            diagnostics.nodes_enqueued += 1;
                        }
                    }
                }
            }
        }
    }

    (diagnostics, None)
}

/// prints the verbose debug info for one expanded node
fn print_debug(arena: &Arena, id: NodeId, frontier_len: usize) {
    let node = &arena[id];
    println!(
        "d={:<4} value={:<14} frontier={:<8} {}",
        node.depth,
        node.value,
        frontier_len,
        arena.chain(id).join(" ")
    );
}

/// solve and render the result plus diagnostics
pub fn print_solve(
    target: i64,
    numbers: &[i64],
    ops: &[Op],
    config: &Config,
) -> (ExitCode, String) {
    let now = Instant::now();
    let (dia, result) = solve(target, numbers, ops, config);
    let dur = now.elapsed();
    let run_time = format!("{:?},{:0>3}", dur.as_secs(), dur.as_millis());

    let mut msg = "".to_string();

    if dia.capped {
        msg.push_str(&format!(
            "{} the search hit a configured cap before exhausting the frontier. Raise --max-depth / --max-nodes to keep looking.\n",
            "Warning:".yellow().bold()
        ));
    }

    msg.push_str(&format!("{}", "Results\n".bold()));
    msg.push_str(&format!("Depth reached       {}\n", dia.reached_depth));
    msg.push_str(&format!("Time (s)            {}\n", &run_time[0..5]));
    msg.push_str(&format!("Nodes expanded      {}\n", dia.nodes_expanded));
    msg.push_str(&format!("Nodes enqueued      {}\n", dia.nodes_enqueued));
    msg.push_str(&format!("Pruned (window)     {}\n", dia.pruned_window));
    msg.push_str(&format!("Pruned (dominated)  {}\n", dia.pruned_dominated));

    match result {
        Some(solution) => {
            msg.push_str(&format!("Steps               {}\n", solution.depth()));
            msg.push_str(&format!(
                "{}              {} = {}\n",
                "Solved".green().bold(),
                solution,
                solution.value()
            ));
            (ExitCode::Solved, msg)
        }
        None => {
            msg.push_str(&format!("{}\n", "No solution found".red().bold()));
            (ExitCode::NoSolution, msg)
        }
    }
}

/// Measure solve time for every target from `start` to `end` with the given
/// interval, printing one table row per target.
pub fn bench(
    numbers: &[i64],
    ops: &[Op],
    start: i64,
    end: Option<i64>,
    interval: i64,
    config: &Config,
) -> (ExitCode, String) {
    let end = end.unwrap_or(start) + 1;
    let interval = i64::max(interval, 1);

    println!("target      time (s)    steps       expanded    enqueued    pruned");
    let mut target = start;
    while target < end {
        let now = Instant::now();
        let (dia, result) = solve(target, numbers, ops, config);
        let dur = now.elapsed();
        let time = format!("{:?},{:0>3}", dur.as_secs(), dur.as_millis());
        let steps = match &result {
            Some(solution) => solution.depth().to_string(),
            None => "-".to_owned(),
        };
        println!(
            "{:<12}{:<12}{:<12}{:<12}{:<12}{:<12}",
            target,
            &time[0..5],
            steps,
            dia.nodes_expanded,
            dia.nodes_enqueued,
            dia.pruned_window + dia.pruned_dominated
        );
        target += interval;
    }
    (ExitCode::Solved, "Benchmark done!".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{StepOp, ALL_OPS};

    fn solve_with(target: i64, numbers: &[i64], ops: &[Op]) -> Option<Solution> {
        solve(target, numbers, ops, &Config::default()).1
    }

    /// replays the chain's steps from the seed value
    fn replay(solution: &Solution) -> i64 {
        let (seed, steps) = solution.steps();
        steps
            .iter()
            .fold(seed, |value, step| step.eval(value).expect("replay overflowed"))
    }

    /// Independent breadth-first enumeration over the same legality rules and
    /// admissibility window, used as ground truth for minimality.
    fn reference_min_depth(target: i64, numbers: &[i64], ops: &[Op], config: &Config) -> Option<usize> {
        use std::collections::{HashSet, VecDeque};

        let mut operands: Vec<i64> = Vec::new();
        for &n in numbers {
            if !operands.contains(&n) {
                operands.push(n);
            }
        }
        if operands.contains(&target) {
            return Some(0);
        }
        let window = config.window_factor.saturating_mul(target.saturating_abs());

        let mut seen: HashSet<i64> = operands.iter().copied().collect();
        let mut queue: VecDeque<(i64, usize)> = operands.iter().map(|&n| (n, 0)).collect();
        while let Some((value, depth)) = queue.pop_front() {
            for &op in ops {
                for &operand in &operands {
                    for (next, _) in op.apply(value, operand, config) {
                        if next < -window || next > window || !seen.insert(next) {
                            continue;
                        }
                        if next == target {
                            return Some(depth + 1);
                        }
                        queue.push_back((next, depth + 1));
                    }
                }
            }
        }
        None
    }

    #[test]
    fn target_in_starting_numbers_is_a_zero_step_solution() {
        let solution = solve_with(5, &[1, 5, 9], &[Op::Add]).unwrap();
        assert_eq!(solution.depth(), 0);
        assert_eq!(solution.value(), 5);
        assert_eq!(solution.chain(), vec!["5"]);
    }

    #[test]
    fn doubling_never_reaches_an_odd_target() {
        assert!(solve_with(3, &[2], &[Op::Mul]).is_none());
    }

    #[test]
    fn one_step_addition() {
        let solution = solve_with(4, &[2], &[Op::Add]).unwrap();
        assert_eq!(solution.depth(), 1);
        assert_eq!(solution.chain(), vec!["2", "+ 2"]);
        assert_eq!(replay(&solution), 4);
    }

    #[test]
    fn thirteen_takes_two_steps() {
        let solution = solve_with(13, &[1, 2, 3, 5], &[Op::Add, Op::Sub, Op::Mul, Op::Div]).unwrap();
        assert!(solution.depth() <= 2);
        assert_eq!(solution.value(), 13);
        assert_eq!(replay(&solution), 13);
    }

    #[test]
    fn empty_starting_numbers_has_no_solution() {
        assert!(solve_with(7, &[], &ALL_OPS).is_none());
    }

    #[test]
    fn empty_operator_set_only_checks_seeds() {
        assert!(solve_with(5, &[2, 3], &[]).is_none());
        let solution = solve_with(3, &[2, 3], &[]).unwrap();
        assert_eq!(solution.depth(), 0);
    }

    #[test]
    fn duplicate_starting_numbers_are_deduped() {
        let solution = solve_with(4, &[2, 2, 2], &[Op::Add]).unwrap();
        assert_eq!(solution.chain(), vec!["2", "+ 2"]);
    }

    #[test]
    fn negative_targets_are_reachable() {
        let solution = solve_with(-4, &[2], &[Op::Sub]).unwrap();
        assert_eq!(replay(&solution), -4);
        assert_eq!(solution.depth(), 3);
    }

    #[test]
    fn chains_replay_to_the_target() {
        for target in [6, 24, 97, 360, 1001] {
            let solution = solve_with(target, &[2, 3, 5, 7], &ALL_OPS)
                .unwrap_or_else(|| panic!("no chain found for {}", target));
            assert_eq!(replay(&solution), target);
        }
    }

    #[test]
    fn repeated_solves_return_identical_chains() {
        let first = solve_with(4795, &[3, 5, 11, 19], &ALL_OPS).unwrap();
        let second = solve_with(4795, &[3, 5, 11, 19], &ALL_OPS).unwrap();
        assert_eq!(first.depth(), second.depth());
        assert_eq!(first.chain(), second.chain());
    }

    #[test]
    fn matches_reference_bfs_on_small_instances() {
        let numbers = [2, 3, 7];
        let ops = [Op::Add, Op::Sub, Op::Mul, Op::Div];
        let config = Config::default();
        for target in 1..=60 {
            let (_, result) = solve(target, &numbers, &ops, &config);
            let reference = reference_min_depth(target, &numbers, &ops, &config);
            assert_eq!(
                result.as_ref().map(|s| s.depth() as usize),
                reference,
                "target {}",
                target
            );
        }
    }

    #[test]
    fn remainder_steps_make_otherwise_unreachable_targets_reachable() {
        // with division alone, 2 is only reachable from {7, 5} as 7 % 5
        let solution = solve_with(2, &[7, 5], &[Op::Div]).unwrap();
        assert_eq!(solution.depth(), 1);
        assert_eq!(solution.chain(), vec!["7", "% 5"]);
        assert_eq!(replay(&solution), 2);
    }

    #[test]
    fn node_cap_reports_like_exhaustion() {
        let config = Config {
            max_nodes: Some(1),
            ..Config::default()
        };
        let (dia, result) = solve(9999, &[2], &[Op::Add], &config);
        assert!(result.is_none());
        assert!(dia.capped);
    }

    #[test]
    fn depth_cap_reports_like_exhaustion() {
        let config = Config {
            max_depth: Some(0),
            ..Config::default()
        };
        let (dia, result) = solve(4, &[2], &[Op::Add], &config);
        assert!(result.is_none());
        assert!(dia.capped);
    }

    #[test]
    fn zero_window_factor_degenerates_to_seeds() {
        let config = Config {
            window_factor: 0,
            ..Config::default()
        };
        let (_, result) = solve(5, &[2, 3], &[Op::Add], &config);
        assert!(result.is_none());
        let (_, seed_hit) = solve(3, &[2, 3], &[Op::Add], &config);
        assert_eq!(seed_hit.unwrap().depth(), 0);
    }
}
