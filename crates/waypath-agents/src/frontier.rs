//! Discovered-but-unexpanded nodes.
//!
//! A [`Frontier`] pairs an ordering structure (a FIFO queue or a binary
//! heap) with a `state → entry` index, so that "is this state already
//! waiting, and with what priority?" is a hash lookup. Replacing an entry
//! pushes a fresh one and leaves the old one behind; [`Frontier::pop`]
//! skips such superseded entries lazily.

use std::collections::{BinaryHeap, HashMap, VecDeque};

use waypath_core::Point;

use crate::tree::NodeId;

/// How the frontier orders its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierKind {
    /// First in, first out. Priorities are recorded but ignored for ordering.
    Fifo,
    /// Smallest priority first; equal priorities leave in insertion order.
    Priority,
}

/// What the index knows about a waiting state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub node: NodeId,
    pub priority: f64,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    seq: u64,
    state: Point,
    node: NodeId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority, then
        // oldest entry, first.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
enum Queue {
    Fifo(VecDeque<Entry>),
    Heap(BinaryHeap<Entry>),
}

/// A FIFO or priority frontier with indexed membership by state.
#[derive(Debug)]
pub struct Frontier {
    queue: Queue,
    index: HashMap<Point, Slot>,
    seq: u64,
    high_water: usize,
}

impl Frontier {
    /// Create an empty frontier of the given kind.
    pub fn new(kind: FrontierKind) -> Self {
        let queue = match kind {
            FrontierKind::Fifo => Queue::Fifo(VecDeque::new()),
            FrontierKind::Priority => Queue::Heap(BinaryHeap::new()),
        };
        Self {
            queue,
            index: HashMap::new(),
            seq: 0,
            high_water: 0,
        }
    }

    /// Empty FIFO frontier.
    pub fn fifo() -> Self {
        Self::new(FrontierKind::Fifo)
    }

    /// Empty priority frontier.
    pub fn priority() -> Self {
        Self::new(FrontierKind::Priority)
    }

    /// The index entry for `state`, if it is waiting.
    #[inline]
    pub fn get(&self, state: Point) -> Option<Slot> {
        self.index.get(&state).copied()
    }

    /// Whether `state` is waiting.
    #[inline]
    pub fn contains(&self, state: Point) -> bool {
        self.index.contains_key(&state)
    }

    /// Add `node` for `state`, superseding any entry already waiting for
    /// that state. Returns the superseded node.
    pub fn push(&mut self, state: Point, node: NodeId, priority: f64) -> Option<NodeId> {
        let entry = Entry {
            priority,
            seq: self.seq,
            state,
            node,
        };
        self.seq += 1;
        match &mut self.queue {
            Queue::Fifo(q) => q.push_back(entry),
            Queue::Heap(h) => h.push(entry),
        }
        let old = self.index.insert(state, Slot { node, priority });
        self.high_water = self.high_water.max(self.index.len());
        old.map(|s| s.node)
    }

    /// Remove and return the next live node, skipping superseded entries.
    pub fn pop(&mut self) -> Option<(Point, NodeId)> {
        loop {
            let entry = match &mut self.queue {
                Queue::Fifo(q) => q.pop_front(),
                Queue::Heap(h) => h.pop(),
            }?;
            let live = self
                .index
                .get(&entry.state)
                .is_some_and(|slot| slot.node == entry.node);
            if live {
                self.index.remove(&entry.state);
                return Some((entry.state, entry.node));
            }
        }
    }

    /// Number of waiting states.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no state is waiting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Largest number of states ever waiting at once.
    #[inline]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
