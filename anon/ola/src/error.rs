use ola_hierarchy::{GeneralizationError, HierarchyError};
use thiserror::Error;

/// Errors surfaced by an anonymization run. None of them is retried: they
/// all point at malformed input or configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnonymizeError {
    #[error(transparent)]
    Generalization(#[from] GeneralizationError),
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    #[error("no generalization strategy satisfies the privacy constraint")]
    NoStrategyFound,
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),
    #[error("attribute '{0}' has more than one generalization rule")]
    DuplicateAttribute(String),
    #[error("k must lie between 1 and the number of records ({records}), got {k}")]
    InvalidK { k: usize, records: usize },
    #[error("suppression fraction must lie in [0, 1], got {0}")]
    InvalidSuppression(f64),
    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column index {index} is out of range for {width} columns")]
    ColumnOutOfRange { index: usize, width: usize },
    #[error("the table has no records")]
    EmptyTable,
    #[error("unknown loss metric '{0}'")]
    UnknownMetric(String),
}
