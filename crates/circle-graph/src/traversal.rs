//! Depth-first and breadth-first traversal.
//!
//! Both walks follow outgoing edges only and visit neighbors in ascending
//! index order, so the output is fully determined by the graph and the
//! start node. Entities outside the reachable component are left out.

use crate::graph::RelationGraph;
use std::collections::VecDeque;

/// Traversal state over one graph.
///
/// The visited set persists across calls: a second walk from a node that
/// an earlier walk already reached returns nothing.
pub struct Traversal<'g> {
    graph: &'g RelationGraph,
    visited: Vec<bool>,
}

impl<'g> Traversal<'g> {
    pub fn new(graph: &'g RelationGraph) -> Self {
        Self {
            graph,
            visited: vec![false; graph.node_count()],
        }
    }

    /// Preorder depth-first walk from `start`.
    ///
    /// Uses an explicit stack of (node, neighbors, cursor) frames, which
    /// gives the same order as the recursive formulation.
    pub fn depth_first(&mut self, start: usize) -> Vec<usize> {
        if !self.claim(start) {
            return Vec::new();
        }

        let mut order = vec![start];
        let mut stack: Vec<(Vec<usize>, usize)> = vec![(self.graph.neighbors(start), 0)];

        while let Some((neighbors, cursor)) = stack.last_mut() {
            match neighbors.get(*cursor).copied() {
                Some(next) => {
                    *cursor += 1;
                    if self.claim(next) {
                        order.push(next);
                        stack.push((self.graph.neighbors(next), 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }

        order
    }

    /// Level-order breadth-first walk from `start`.
    pub fn breadth_first(&mut self, start: usize) -> Vec<usize> {
        if !self.claim(start) {
            return Vec::new();
        }

        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            order.push(current);
            for next in self.graph.neighbors(current) {
                if self.claim(next) {
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// Whether `index` has been visited by any walk so far.
    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.get(index).copied().unwrap_or(false)
    }

    /// Marks `index` visited. False if out of range or already visited.
    fn claim(&mut self, index: usize) -> bool {
        match self.visited.get_mut(index) {
            Some(seen) if !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }
}

/// Depth-first walk with a fresh visited set.
pub fn depth_first(graph: &RelationGraph, start: usize) -> Vec<usize> {
    Traversal::new(graph).depth_first(start)
}

/// Breadth-first walk with a fresh visited set.
pub fn breadth_first(graph: &RelationGraph, start: usize) -> Vec<usize> {
    Traversal::new(graph).breadth_first(start)
}
