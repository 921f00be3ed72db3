#[cfg(feature = "serde")]
use serde::Serialize;

use crate::strategy::Strategy;

/// Memoized outcome of evaluating a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SuitabilityTag {
    #[default]
    Unknown,
    Suitable,
    NonSuitable,
}

impl SuitabilityTag {
    pub fn from_suitable(suitable: bool) -> Self {
        if suitable {
            SuitabilityTag::Suitable
        } else {
            SuitabilityTag::NonSuitable
        }
    }

    /// `None` while the node has not been evaluated.
    pub fn known(self) -> Option<bool> {
        match self {
            SuitabilityTag::Unknown => None,
            SuitabilityTag::Suitable => Some(true),
            SuitabilityTag::NonSuitable => Some(false),
        }
    }
}

/// Handle to a node stored in a [`crate::Lattice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    strategy: Strategy,
    tag: SuitabilityTag,
}

impl Node {
    pub(crate) fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            tag: SuitabilityTag::Unknown,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn tag(&self) -> SuitabilityTag {
        self.tag
    }

    pub(crate) fn set_tag(&mut self, tag: SuitabilityTag) {
        self.tag = tag;
    }
}
