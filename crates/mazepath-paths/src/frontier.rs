use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use mazepath_core::Point;

use crate::strategy::Strategy;

/// A frontier entry. `priority` orders the heap; `g` is the accumulated cost
/// the entry was pushed with, used to discard stale entries.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) pos: Point,
    pub(crate) priority: f64,
    pub(crate) g: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority first.
        other.priority.total_cmp(&self.priority)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

/// Discovered-but-unexpanded cells, in the container each strategy needs.
#[derive(Debug)]
pub(crate) enum Frontier {
    Queue(VecDeque<NodeRef>),
    Stack(Vec<NodeRef>),
    Heap(BinaryHeap<NodeRef>),
}

impl Frontier {
    pub(crate) fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Bfs => Self::Queue(VecDeque::new()),
            Strategy::Dfs => Self::Stack(Vec::new()),
            Strategy::Ucs | Strategy::AStar(_) | Strategy::Greedy(_) => {
                Self::Heap(BinaryHeap::new())
            }
        }
    }

    pub(crate) fn push(&mut self, node: NodeRef) {
        match self {
            Self::Queue(q) => q.push_back(node),
            Self::Stack(s) => s.push(node),
            Self::Heap(h) => h.push(node),
        }
    }

    pub(crate) fn pop(&mut self) -> Option<NodeRef> {
        match self {
            Self::Queue(q) => q.pop_front(),
            Self::Stack(s) => s.pop(),
            Self::Heap(h) => h.pop(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Queue(q) => q.len(),
            Self::Stack(s) => s.len(),
            Self::Heap(h) => h.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
