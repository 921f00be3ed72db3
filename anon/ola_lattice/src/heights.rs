//! Height slices of a sub-lattice.
//!
//! The sub-lattice bounded by `lower` and `upper` is the box of strategies
//! lying componentwise between them. Every height between the two bounds is
//! populated, so the number of slices is known without enumerating anything;
//! a slice is only enumerated when it is asked for.

use crate::strategy::Strategy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightSlices {
    lower: Strategy,
    upper: Strategy,
}

impl HeightSlices {
    pub fn new(lower: Strategy, upper: Strategy) -> Self {
        Self { lower, upper }
    }

    pub fn lower(&self) -> &Strategy {
        &self.lower
    }

    pub fn upper(&self) -> &Strategy {
        &self.upper
    }

    /// Number of distinct heights, zero when `upper` does not dominate `lower`.
    pub fn len(&self) -> usize {
        if !self.upper.dominates(&self.lower) {
            return 0;
        }
        self.upper.height() - self.lower.height() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strategies of the box at height `lower.height() + idx`, in
    /// lexicographic order. Out-of-range indices yield an empty slice.
    pub fn slice(&self, idx: usize) -> Vec<Strategy> {
        let mut out = Vec::new();
        if idx >= self.len() {
            return out;
        }

        let spans: Vec<usize> = self
            .upper
            .levels()
            .iter()
            .zip(self.lower.levels())
            .map(|(u, l)| u - l)
            .collect();
        // capacity[i]: how much height positions i.. can still absorb
        let mut capacity = vec![0; spans.len() + 1];
        for i in (0..spans.len()).rev() {
            capacity[i] = capacity[i + 1] + spans[i];
        }

        let mut current = Vec::with_capacity(spans.len());
        self.fill(0, idx, &spans, &capacity, &mut current, &mut out);
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec<Strategy>> + '_ {
        (0..self.len()).map(move |idx| self.slice(idx))
    }

    fn fill(
        &self,
        pos: usize,
        remaining: usize,
        spans: &[usize],
        capacity: &[usize],
        current: &mut Vec<usize>,
        out: &mut Vec<Strategy>,
    ) {
        if pos == spans.len() {
            if remaining == 0 {
                out.push(Strategy::new(current.clone()));
            }
            return;
        }
        let lo = remaining.saturating_sub(capacity[pos + 1]);
        let hi = spans[pos].min(remaining);
        for step in lo..=hi {
            current.push(self.lower.levels()[pos] + step);
            self.fill(pos + 1, remaining - step, spans, capacity, current, out);
            current.pop();
        }
    }
}
