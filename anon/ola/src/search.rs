//! OLA binary search over the strategy lattice.
//!
//! Each bracket `(bottom, top)` is cut at its middle height. A suitable node
//! at that height sends the search below it, a non-suitable one above it.
//! Brackets spanning at most two heights decide directly and feed the
//! k-minimal set. Suitability has to be upward-closed under dominance for
//! the result to be exact.

use log::{debug, trace};
use ola_lattice::{Lattice, NodeId, Strategy, SuitabilityOracle};

/// Antichain of minimal suitable strategies found so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KMinimalSet {
    members: Vec<Strategy>,
}

impl KMinimalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a suitable strategy, keeping only minimal members.
    ///
    /// A candidate that dominates an existing member is not minimal and is
    /// dropped. Otherwise every member dominating the candidate is evicted
    /// before the candidate goes in. Returns whether it was inserted.
    pub fn insert(&mut self, candidate: Strategy) -> bool {
        if self.members.contains(&candidate) {
            return false;
        }
        if let Some(below) = self.members.iter().find(|m| candidate.dominates(m)) {
            trace!("{candidate} not minimal, {below} already recorded");
            return false;
        }
        self.members.retain(|m| {
            let keep = !m.dominates(&candidate);
            if !keep {
                debug!("evicting {m} in favour of {candidate}");
            }
            keep
        });
        debug!("k-minimal candidate {candidate}");
        self.members.push(candidate);
        true
    }

    pub fn contains(&self, strategy: &Strategy) -> bool {
        self.members.contains(strategy)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.members.iter()
    }

    /// Members in lexicographic order of their level vectors.
    pub fn into_sorted_vec(mut self) -> Vec<Strategy> {
        self.members.sort();
        self.members
    }
}

/// One search run. Owns its accumulator, so nothing carries over between runs.
pub struct OlaSearch<'l, O> {
    lattice: &'l mut Lattice,
    oracle: O,
    k_minimal: KMinimalSet,
}

impl<'l, O: SuitabilityOracle> OlaSearch<'l, O> {
    pub fn new(lattice: &'l mut Lattice, oracle: O) -> Self {
        Self {
            lattice,
            oracle,
            k_minimal: KMinimalSet::new(),
        }
    }

    /// Searches the whole lattice and returns the k-minimal set.
    pub fn run(mut self) -> Result<KMinimalSet, O::Error> {
        let bottom = self.lattice.bottom();
        let top = self.lattice.top();
        self.k_min(bottom, top)?;
        Ok(self.k_minimal)
    }

    fn k_min(&mut self, bottom: NodeId, top: NodeId) -> Result<(), O::Error> {
        let slices = self.lattice.heights_between(bottom, top);
        let heights = slices.len();

        if heights > 2 {
            for strategy in slices.slice(heights / 2) {
                let node = self.lattice.intern(strategy);
                if self.lattice.resolve(node, &mut self.oracle)? {
                    self.k_min(bottom, node)?;
                } else {
                    self.k_min(node, top)?;
                }
            }
            return Ok(());
        }

        let candidate = if self.lattice.resolve(bottom, &mut self.oracle)? {
            bottom
        } else {
            top
        };
        if self.lattice.resolve(candidate, &mut self.oracle)? {
            let strategy = self.lattice.strategy(candidate).clone();
            self.k_minimal.insert(strategy);
        }
        Ok(())
    }
}

/// Runs a fresh search over `lattice`.
pub fn k_minimal<O: SuitabilityOracle>(
    lattice: &mut Lattice,
    oracle: O,
) -> Result<KMinimalSet, O::Error> {
    OlaSearch::new(lattice, oracle).run()
}
