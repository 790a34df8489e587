//! Arena-backed path nodes: each node records one reachable value and the step
//! that produced it, linked back to its seed by arena index
//!
//!

use crate::ops::StepOp;
use crate::shared::Depth;

use core::fmt;
use std::ops::Index;

/// Index into the arena. Ids are handed out in creation order, which doubles
/// as the deterministic tie-break for equal-depth frontier entries.
pub type NodeId = u32;

/// One reachable value plus how it was derived. Never mutated after creation;
/// `prev` always points at an earlier slot, so ancestry chains are acyclic.
#[derive(Debug, Clone)]
pub struct PathNode {
    pub value: i64,
    /// step applied to `prev` to get here, `None` for seeds
    pub step: Option<StepOp>,
    pub prev: Option<NodeId>,
    pub depth: Depth,
}

/// Dense storage for every node created during one solve call. The whole
/// arena stays alive until the call returns since the answer is a chain of
/// `prev` links back to a seed.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<PathNode>,
}

impl Arena {
    pub fn new() -> Self {
        Arena { nodes: vec![] }
    }

    pub fn seed(&mut self, value: i64) -> NodeId {
        self.push(PathNode {
            value,
            step: None,
            prev: None,
            depth: 0,
        })
    }

    pub fn child(&mut self, prev: NodeId, value: i64, step: StepOp) -> NodeId {
        let depth = self[prev].depth + 1;
        self.push(PathNode {
            value,
            step: Some(step),
            prev: Some(prev),
            depth,
        })
    }

    fn push(&mut self, node: PathNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Walks the ancestry of `id` back to its seed and returns the seed's
    /// value plus the steps in the order they were applied.
    pub fn steps(&self, id: NodeId) -> (i64, Vec<StepOp>) {
        let mut steps = vec![];
        let mut at = id;
        loop {
            let node = &self[at];
            match (node.step, node.prev) {
                (Some(step), Some(prev)) => {
                    steps.push(step);
                    at = prev;
                }
                _ => {
                    steps.reverse();
                    return (node.value, steps);
                }
            }
        }
    }

    /// Human-readable chain for `id`: the seed literal first, then each step
    /// label in execution order.
    pub fn chain(&self, id: NodeId) -> Vec<String> {
        let (seed, steps) = self.steps(id);
        let mut chain = vec![seed.to_string()];
        chain.extend(steps.iter().map(|step| step.to_string()));
        chain
    }
}

impl Index<NodeId> for Arena {
    type Output = PathNode;

    fn index(&self, id: NodeId) -> &PathNode {
        &self.nodes[id as usize]
    }
}

/// A found chain: the arena it lives in plus its terminal node
#[derive(Debug)]
pub struct Solution {
    arena: Arena,
    terminal: NodeId,
}

impl Solution {
    pub(super) fn new(arena: Arena, terminal: NodeId) -> Self {
        Solution { arena, terminal }
    }

    pub fn value(&self) -> i64 {
        self.arena[self.terminal].value
    }

    /// Number of operations applied to reach the value
    pub fn depth(&self) -> Depth {
        self.arena[self.terminal].depth
    }

    pub fn chain(&self) -> Vec<String> {
        self.arena.chain(self.terminal)
    }

    pub fn steps(&self) -> (i64, Vec<StepOp>) {
        self.arena.steps(self.terminal)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chain().join(" "))
    }
}
