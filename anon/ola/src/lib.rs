//! Optimal Lattice Anonymization.
//!
//! Given a table and one [`GenRule`] per quasi-identifier, OLA binary-searches
//! the lattice of generalization strategies for the k-minimal ones, picks the
//! one with the least information loss and releases the table generalized
//! accordingly, with undersized equivalence classes removed.
//!
//! ```no_run
//! use ola::{AnonymizationConfig, Anonymizer, Table};
//! use ola_hierarchy::{GenRule, Hierarchy};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Table::new(
//!     vec!["age".into(), "disease".into()],
//!     vec![vec!["23".into(), "flu".into()], vec!["25".into(), "cold".into()]],
//! )?;
//! let age = Hierarchy::from_rows("age", vec![vec!["23", "20-29"], vec!["25", "20-29"]])?;
//! let rules: Vec<GenRule> = vec![age.into_rule()];
//!
//! let result = Anonymizer::new(AnonymizationConfig::default()).run(&table, &rules)?;
//! println!("{:?} -> {:?}", result.report.optimal, result.stats);
//! # Ok(())
//! # }
//! ```

pub mod anonymizer;
pub mod check;
pub mod classes;
pub mod error;
pub mod generalize;
pub mod loss;
pub mod release;
pub mod search;
pub mod table;

pub use anonymizer::{Anonymization, AnonymizationConfig, Anonymizer, RunReport};
pub use check::{k_anonymity, KAnonymity, SuitabilityCheck};
pub use classes::{EquivalenceClass, EquivalenceClasses};
pub use error::AnonymizeError;
pub use generalize::{DatasetOracle, Generalizer};
pub use loss::{precision, Discernibility, LossMetric, MetricKind, Precision};
pub use release::{make_release, ReleaseStats};
pub use search::{k_minimal, KMinimalSet, OlaSearch};
pub use table::Table;

pub use ola_hierarchy::GenRule;
pub use ola_lattice::{Lattice, LatticeStats, Strategy};
