use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Counters for one search run. A fresh set is created with every lattice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LatticeStats {
    /// Nodes instantiated by the search.
    pub visited: usize,
    /// Nodes whose suitability was computed against the data.
    pub checked: usize,
    pub suitable: usize,
    pub non_suitable: usize,
}

impl fmt::Display for LatticeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "visited {} nodes, checked {} nodes ({} suitable, {} non-suitable)",
            self.visited, self.checked, self.suitable, self.non_suitable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SuitabilityTag;

    #[test]
    fn display_lists_every_counter() {
        let stats = LatticeStats {
            visited: 7,
            checked: 5,
            suitable: 3,
            non_suitable: 2,
        };
        assert_eq!(
            stats.to_string(),
            "visited 7 nodes, checked 5 nodes (3 suitable, 2 non-suitable)"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn report_fields_serialize() {
        let json = serde_json::to_value(LatticeStats::default()).unwrap();
        assert_eq!(json["non_suitable"], 0);
        assert_eq!(
            serde_json::to_string(&SuitabilityTag::NonSuitable).unwrap(),
            "\"non_suitable\""
        );
    }
}
