use thiserror::Error;

/// Errors raised while applying a generalization rule to a value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneralizationError {
    #[error("attribute '{attribute}': level {level} exceeds the maximum level {max_level}")]
    InvalidLevel {
        attribute: String,
        level: usize,
        max_level: usize,
    },
    #[error("attribute '{attribute}': value '{value}' has no mapping at level {level}")]
    MissingCoverage {
        attribute: String,
        value: String,
        level: usize,
    },
}

/// Errors raised while turning a hierarchy description into a rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("hierarchy for '{0}' is empty")]
    Empty(String),
    #[error("hierarchy for '{attribute}': row {row} has {found} columns, expected {expected}")]
    Ragged {
        attribute: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("hierarchy for '{attribute}': leaves sit at different depths ({first} and {other})")]
    UnevenDepth {
        attribute: String,
        first: usize,
        other: usize,
    },
    #[error(
        "hierarchy for '{attribute}': value '{value}' maps to both '{first}' and '{second}' at level {level}"
    )]
    Conflict {
        attribute: String,
        value: String,
        level: usize,
        first: String,
        second: String,
    },
}
