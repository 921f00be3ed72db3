//! The generalization lattice searched by OLA.
//!
//! A [`Strategy`] assigns a generalization level to each quasi-identifier.
//! Strategies are partially ordered by dominance and graded by height; the
//! [`Lattice`] materializes only the nodes a search actually visits and
//! memoizes each node's [`SuitabilityTag`].

pub mod heights;
pub mod lattice;
pub mod node;
pub mod oracle;
pub mod stats;
pub mod strategy;

pub use heights::HeightSlices;
pub use lattice::Lattice;
pub use node::{Node, NodeId, SuitabilityTag};
pub use oracle::SuitabilityOracle;
pub use stats::LatticeStats;
pub use strategy::Strategy;
