use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A generalization strategy: one level per quasi-identifier.
///
/// Derived ordering is lexicographic on the level vector. It is a total order
/// used for deterministic tie-breaking, not the lattice's dominance order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Strategy(Vec<usize>);

impl Strategy {
    pub fn new(levels: Vec<usize>) -> Self {
        Self(levels)
    }

    pub fn levels(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of levels, the grade of this strategy in the lattice.
    pub fn height(&self) -> usize {
        self.0.iter().sum()
    }

    /// True iff every level of `self` is at least the matching level of `other`.
    pub fn dominates(&self, other: &Strategy) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a >= b)
    }

    /// Dominance in either direction.
    pub fn comparable(&self, other: &Strategy) -> bool {
        self.dominates(other) || other.dominates(self)
    }
}

impl From<Vec<usize>> for Strategy {
    fn from(levels: Vec<usize>) -> Self {
        Self(levels)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, level) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{level}")?;
        }
        write!(f, ")")
    }
}
