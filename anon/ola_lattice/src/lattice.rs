//! Lazy strategy lattice.
//!
//! The full lattice has `prod(max_level_i + 1)` nodes and is never built.
//! Nodes live in an arena and are created the first time the search touches
//! them; a lookup keyed by level vector hands back the same node (and its
//! memoized tag) on every later visit.

use std::collections::HashMap;

use log::debug;

use crate::heights::HeightSlices;
use crate::node::{Node, NodeId, SuitabilityTag};
use crate::oracle::SuitabilityOracle;
use crate::stats::LatticeStats;
use crate::strategy::Strategy;

#[derive(Debug, Clone, Default)]
pub struct Lattice {
    max_levels: Vec<usize>,
    nodes: Vec<Node>,
    index: HashMap<Strategy, NodeId>,
    stats: LatticeStats,
}

impl Lattice {
    pub fn new(max_levels: Vec<usize>) -> Self {
        Self {
            max_levels,
            nodes: Vec::new(),
            index: HashMap::new(),
            stats: LatticeStats::default(),
        }
    }

    /// Creates the lattice together with its bottom and top nodes.
    pub fn build(max_levels: Vec<usize>) -> (Self, NodeId, NodeId) {
        let mut lattice = Self::new(max_levels);
        let bottom = lattice.bottom();
        let top = lattice.top();
        (lattice, bottom, top)
    }

    pub fn max_levels(&self) -> &[usize] {
        &self.max_levels
    }

    /// Number of nodes the complete lattice would have.
    pub fn total_nodes(&self) -> u128 {
        self.max_levels
            .iter()
            .fold(1u128, |acc, m| acc.saturating_mul(*m as u128 + 1))
    }

    /// The all-zero strategy: no generalization.
    pub fn bottom(&mut self) -> NodeId {
        self.intern(Strategy::new(vec![0; self.max_levels.len()]))
    }

    /// The all-max strategy: every attribute suppressed.
    pub fn top(&mut self) -> NodeId {
        self.intern(Strategy::new(self.max_levels.clone()))
    }

    /// Whether `strategy` is a point of this lattice.
    pub fn contains(&self, strategy: &Strategy) -> bool {
        strategy.len() == self.max_levels.len()
            && strategy
                .levels()
                .iter()
                .zip(&self.max_levels)
                .all(|(level, max)| level <= max)
    }

    /// Returns the node for `strategy`, creating it on first use.
    pub fn intern(&mut self, strategy: Strategy) -> NodeId {
        debug_assert!(self.contains(&strategy), "{strategy} is outside the lattice");
        if let Some(id) = self.index.get(&strategy) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(strategy.clone(), id);
        self.nodes.push(Node::new(strategy));
        self.stats.visited += 1;
        id
    }

    /// Looks up an already instantiated node.
    pub fn find(&self, strategy: &Strategy) -> Option<NodeId> {
        self.index.get(strategy).copied()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn strategy(&self, id: NodeId) -> &Strategy {
        self.nodes[id.0].strategy()
    }

    pub fn tag(&self, id: NodeId) -> SuitabilityTag {
        self.nodes[id.0].tag()
    }

    /// Every node instantiated so far, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn dominates(&self, a: NodeId, b: NodeId) -> bool {
        self.strategy(a).dominates(self.strategy(b))
    }

    /// Height slices of the sub-lattice bounded by `bottom` and `top`.
    pub fn heights_between(&self, bottom: NodeId, top: NodeId) -> HeightSlices {
        HeightSlices::new(self.strategy(bottom).clone(), self.strategy(top).clone())
    }

    /// Runs the oracle on a node. Does not touch the tag; see [`Lattice::mark`].
    pub fn evaluate<O>(&mut self, id: NodeId, oracle: &mut O) -> Result<bool, O::Error>
    where
        O: SuitabilityOracle,
    {
        self.stats.checked += 1;
        let suitable = oracle.is_suitable(self.nodes[id.0].strategy())?;
        debug!(
            "evaluated {} -> {}",
            self.nodes[id.0].strategy(),
            if suitable { "suitable" } else { "non-suitable" }
        );
        Ok(suitable)
    }

    /// Records the outcome of an evaluation. A node is tagged at most once;
    /// later calls leave the first tag and the counters untouched.
    pub fn mark(&mut self, id: NodeId, suitable: bool) {
        let node = &mut self.nodes[id.0];
        if node.tag() != SuitabilityTag::Unknown {
            return;
        }
        node.set_tag(SuitabilityTag::from_suitable(suitable));
        if suitable {
            self.stats.suitable += 1;
        } else {
            self.stats.non_suitable += 1;
        }
    }

    /// Returns the memoized tag, evaluating and marking the node if needed.
    pub fn resolve<O>(&mut self, id: NodeId, oracle: &mut O) -> Result<bool, O::Error>
    where
        O: SuitabilityOracle,
    {
        if let Some(suitable) = self.tag(id).known() {
            return Ok(suitable);
        }
        let suitable = self.evaluate(id, oracle)?;
        self.mark(id, suitable);
        Ok(suitable)
    }

    pub fn stats(&self) -> LatticeStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::convert::Infallible;

    #[test]
    fn build_creates_bounds() {
        let (lattice, bottom, top) = Lattice::build(vec![2, 3]);
        assert_eq!(lattice.strategy(bottom), &Strategy::new(vec![0, 0]));
        assert_eq!(lattice.strategy(top), &Strategy::new(vec![2, 3]));
        assert_eq!(lattice.total_nodes(), 12);
        assert_eq!(lattice.stats().visited, 2);
        assert!(lattice.dominates(top, bottom));
    }

    #[test]
    fn interning_reuses_nodes() {
        let mut lattice = Lattice::new(vec![2, 2]);
        let a = lattice.intern(Strategy::new(vec![1, 0]));
        let b = lattice.intern(Strategy::new(vec![1, 0]));
        assert_eq!(a, b);
        assert_eq!(lattice.nodes().count(), 1);
        assert_eq!(lattice.find(&Strategy::new(vec![1, 0])), Some(a));
        assert_eq!(lattice.find(&Strategy::new(vec![0, 1])), None);
    }

    #[test]
    fn resolve_memoizes_the_tag() {
        let mut lattice = Lattice::new(vec![1, 1]);
        let node = lattice.intern(Strategy::new(vec![1, 0]));
        let mut calls = 0;
        let mut oracle = |_: &Strategy| {
            calls += 1;
            Ok::<_, Infallible>(true)
        };

        assert_eq!(lattice.resolve(node, &mut oracle), Ok(true));
        assert_eq!(lattice.resolve(node, &mut oracle), Ok(true));
        assert_eq!(calls, 1);
        assert_eq!(lattice.tag(node), SuitabilityTag::Suitable);
        assert_eq!(
            lattice.stats(),
            LatticeStats {
                visited: 1,
                checked: 1,
                suitable: 1,
                non_suitable: 0,
            }
        );
    }

    #[test]
    fn mark_is_set_once() {
        let mut lattice = Lattice::new(vec![1]);
        let node = lattice.intern(Strategy::new(vec![0]));
        lattice.mark(node, false);
        lattice.mark(node, true);
        assert_eq!(lattice.tag(node), SuitabilityTag::NonSuitable);
        assert_eq!(lattice.stats().non_suitable, 1);
        assert_eq!(lattice.stats().suitable, 0);
    }

    #[test]
    fn oracle_errors_propagate() {
        let mut lattice = Lattice::new(vec![1]);
        let node = lattice.intern(Strategy::new(vec![1]));
        let mut oracle = |_: &Strategy| Err::<bool, _>("boom");
        assert_eq!(lattice.resolve(node, &mut oracle), Err("boom"));
        assert_eq!(lattice.tag(node), SuitabilityTag::Unknown);
    }

    #[test]
    fn heights_between_uses_node_levels() {
        let (lattice, bottom, top) = Lattice::build(vec![1, 2]);
        let slices = lattice.heights_between(bottom, top);
        assert_eq!(slices.len(), 4);
    }
}
