//! Generalization rules for quasi-identifying attributes.
//!
//! This crate turns attribute hierarchies into [`GenRule`]s, the per-attribute
//! value mappings the lattice search applies when it evaluates a strategy.

pub mod error;
pub mod hierarchy;
pub mod rule;

pub use error::{GeneralizationError, HierarchyError};
pub use hierarchy::{Hierarchy, HierarchySource, HierarchyTree};
pub use rule::{GenRule, LevelMap, SUPPRESSED};
