//! Open and closed sets of the search, keyed by grid index.
//!
//! The frontier is a binary heap with lazy deletion: replacing an entry pushes a
//! new heap item and leaves the old one behind. Each live entry remembers the
//! sequence number of its newest heap item, and `pop` discards heap items whose
//! sequence number no longer matches.

use std::cmp::Ordering;
use std::collections::hash_map::{self, HashMap};
use std::collections::BinaryHeap;

use tracing::trace;

use crate::map::GridIndex;
use crate::node::Node;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    priority: f64,
    seq: u64,
    index: GridIndex,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

// `BinaryHeap` is a max-heap: lower priority must compare greater. Ties go to the
// most recently inserted entry.
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Candidate nodes awaiting expansion, at most one live node per grid index,
/// popped in order of `cost + heuristic`.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<HeapEntry>,
    live: HashMap<GridIndex, (Node, u64)>,
    next_seq: u64,
}

impl Frontier {
    /// Creates an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns true if no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Returns true if `index` has a live entry.
    pub fn contains(&self, index: GridIndex) -> bool {
        self.live.contains_key(&index)
    }

    /// Gets the live node for `index`.
    pub fn get(&self, index: GridIndex) -> Option<&Node> {
        self.live.get(&index).map(|(node, _)| node)
    }

    /// Number of superseded heap items still waiting to be discarded.
    pub fn stale_len(&self) -> usize {
        self.heap.len() - self.live.len()
    }

    /// Offers `node` for `index` with the given priority.
    ///
    /// The node is stored if `index` has no live entry, or if it is strictly
    /// cheaper than the live one. Returns whether it was stored.
    pub fn offer(&mut self, index: GridIndex, node: Node, priority: f64) -> bool {
        let seq = self.next_seq;
        match self.live.entry(index) {
            hash_map::Entry::Occupied(mut slot) => {
                if node.cost >= slot.get().0.cost {
                    return false;
                }
                trace!(index, old = slot.get().0.cost, new = node.cost, "Frontier entry improved");
                slot.insert((node, seq));
            }
            hash_map::Entry::Vacant(slot) => {
                slot.insert((node, seq));
            }
        }
        self.next_seq += 1;
        self.heap.push(HeapEntry {
            priority,
            seq,
            index,
        });
        true
    }

    /// Removes and returns the live entry with the lowest priority.
    pub fn pop(&mut self) -> Option<(GridIndex, Node)> {
        while let Some(entry) = self.heap.pop() {
            let current = match self.live.get(&entry.index) {
                Some(&(node, seq)) if seq == entry.seq => node,
                _ => continue,
            };
            self.live.remove(&entry.index);
            return Some((entry.index, current));
        }
        None
    }
}

/// Nodes whose cost has been finalized. Entries are never removed during a search.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    nodes: HashMap<GridIndex, Node>,
}

impl VisitedSet {
    /// Creates an empty visited set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `node` as finalized for `index`.
    pub fn insert(&mut self, index: GridIndex, node: Node) {
        self.nodes.insert(index, node);
    }

    /// Returns true if `index` is finalized.
    pub fn contains(&self, index: GridIndex) -> bool {
        self.nodes.contains_key(&index)
    }

    /// Gets the finalized node for `index`.
    pub fn get(&self, index: GridIndex) -> Option<&Node> {
        self.nodes.get(&index)
    }

    /// Number of finalized nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been finalized.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over finalized nodes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (GridIndex, &Node)> {
        self.nodes.iter().map(|(&index, node)| (index, node))
    }
}
