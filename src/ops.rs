//! Operator legality rules and the checked arithmetic behind every chain step
//!
//!

use crate::shared::{Config, Error};

use core::fmt;
use std::str::FromStr;

/// The five operators a chain may draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

pub const ALL_OPS: [Op; 5] = [Op::Add, Op::Sub, Op::Mul, Op::Div, Op::Pow];

impl FromStr for Op {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "+" => Ok(Op::Add),
            "-" => Ok(Op::Sub),
            "*" => Ok(Op::Mul),
            "/" => Ok(Op::Div),
            "**" => Ok(Op::Pow),
            other => Err(Error::Parse(format!(
                "'{}' is not an operator (expected one of + - * / **)",
                other
            ))),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Add => write!(f, "+"),
            Op::Sub => write!(f, "-"),
            Op::Mul => write!(f, "*"),
            Op::Div => write!(f, "/"),
            Op::Pow => write!(f, "**"),
        }
    }
}

/// One applied step along a chain. Division is split into two step kinds
/// because a single `/` application can yield both a quotient and a remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOp {
    Add(i64),
    Sub(i64),
    Mul(i64),
    Div(i64),
    Rem(i64),
    Pow(u32),
}

impl StepOp {
    /// Applies the step to a value. `None` on overflow, which the search
    /// treats the same as an illegal combination.
    pub fn eval(self, value: i64) -> Option<i64> {
        match self {
            StepOp::Add(n) => value.checked_add(n),
            StepOp::Sub(n) => value.checked_sub(n),
            StepOp::Mul(n) => value.checked_mul(n),
            StepOp::Div(n) => value.checked_div(n),
            StepOp::Rem(n) => value.checked_rem(n),
            StepOp::Pow(e) => value.checked_pow(e),
        }
    }
}

impl fmt::Display for StepOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOp::Add(n) => write!(f, "+ {}", n),
            StepOp::Sub(n) => write!(f, "- {}", n),
            StepOp::Mul(n) => write!(f, "* {}", n),
            StepOp::Div(n) => write!(f, "/ {}", n),
            StepOp::Rem(n) => write!(f, "% {}", n),
            StepOp::Pow(e) => write!(f, "^ {}", e),
        }
    }
}

impl Op {
    /// The legality rule: every successor value of applying `self` with `operand`
    /// to `current`. Illegal or overflowing combinations yield no results rather
    /// than an error, so the search loop never has to recover from one.
    pub fn apply(self, current: i64, operand: i64, config: &Config) -> Vec<(i64, StepOp)> {
        let mut steps: Vec<StepOp> = Vec::new();
        match self {
            Op::Pow => {
                // negative exponents leave the integers, large ones blow up the search space
                if operand < 0 || operand > config.max_exponent {
                    return vec![];
                }
                if config.guard_odd_exponents && current < 0 && operand % 2 == 1 {
                    return vec![];
                }
                steps.push(StepOp::Pow(operand as u32));
            }
            Op::Div => {
                // operand 0 must never reach the arithmetic, operand 1 is a no-op
                if operand == 0 || operand == 1 {
                    return vec![];
                }
                steps.push(StepOp::Div(operand));
                // remainder 0 is redundant with exact division
                match current.checked_rem(operand) {
                    Some(0) | None => (),
                    Some(_) => steps.push(StepOp::Rem(operand)),
                }
            }
            Op::Add | Op::Sub if operand == 0 => return vec![],
            Op::Mul if operand == 1 => return vec![],
            Op::Add => steps.push(StepOp::Add(operand)),
            Op::Sub => steps.push(StepOp::Sub(operand)),
            Op::Mul => steps.push(StepOp::Mul(operand)),
        }
        steps
            .into_iter()
            .filter_map(|step| step.eval(current).map(|value| (value, step)))
            .collect()
    }
}
