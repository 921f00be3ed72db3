//! JSON job files.
//!
//! ```json
//! {
//!   "columns": ["age", "zip", "disease"],
//!   "rows": [[23, "10001", "flu"], [25, "10002", "cold"]],
//!   "hierarchies": {
//!     "age": { "rows": [["23", "20-29", "*"], ["25", "20-29", "*"]] },
//!     "zip": { "tree": { "value": "*", "children": [{ "value": "100**", "children": [{ "value": "10001" }, { "value": "10002" }] }] } }
//!   },
//!   "config": { "k": 2, "max_suppression": 0.0, "metric": "precision" }
//! }
//! ```
//!
//! Instead of `columns`/`rows`, raw `records` may be given with `qi_index`
//! and `qi_names` naming the quasi-identifier columns.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ola::{AnonymizationConfig, AnonymizeError, GenRule, Table};
use ola_hierarchy::{HierarchyError, HierarchySource};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid job file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    #[error(transparent)]
    Anonymize(#[from] AnonymizeError),
}

impl CliError {
    /// 1 for rejected input or configuration, 2 for IO and malformed JSON.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Hierarchy(_) | CliError::Anonymize(_) => 1,
            CliError::Read { .. } | CliError::Write { .. } | CliError::Json(_) => 2,
        }
    }
}

/// A table cell. Numbers and booleans are kept as their JSON text, null is
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell(pub String);

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Cell(match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JobData {
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    },
    Records {
        records: Vec<Vec<Cell>>,
        qi_index: Vec<usize>,
        qi_names: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
pub struct Job {
    #[serde(flatten)]
    pub data: JobData,
    pub hierarchies: BTreeMap<String, HierarchySource>,
    #[serde(default)]
    pub config: AnonymizationConfig,
}

fn cells(rows: Vec<Vec<Cell>>) -> Vec<Vec<String>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(|c| c.0).collect())
        .collect()
}

impl Job {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn table(&self) -> Result<Table, CliError> {
        let table = match &self.data {
            JobData::Table { columns, rows } => Table::new(columns.clone(), cells(rows.clone()))?,
            JobData::Records {
                records,
                qi_index,
                qi_names,
            } => Table::from_records(cells(records.clone()), qi_index, qi_names)?,
        };
        Ok(table)
    }

    pub fn rules(&self) -> Result<Vec<GenRule>, CliError> {
        self.hierarchies
            .iter()
            .map(|(name, source)| source.clone().into_rule(name).map_err(CliError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_table_job_with_numeric_cells() {
        let job = Job::parse(
            r#"{
                "columns": ["age", "zip"],
                "rows": [[23, "10001"], [null, "10002"]],
                "hierarchies": { "zip": { "rows": [["10001", "100**"], ["10002", "100**"]] } },
                "config": { "k": 3 }
            }"#,
        )
        .unwrap();
        let table = job.table().unwrap();
        assert_eq!(table.rows()[0], vec!["23".to_string(), "10001".to_string()]);
        assert_eq!(table.rows()[1][0], "");
        assert_eq!(job.config.k, 3);
        assert_eq!(job.config.max_suppression, 0.0);
        let rules = job.rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].attribute(), "zip");
    }

    #[test]
    fn parses_records_job() {
        let job = Job::parse(
            r#"{
                "records": [[23, "flu"], [25, "cold"]],
                "qi_index": [0],
                "qi_names": ["age"],
                "hierarchies": { "age": { "rows": [["23", "*"], ["25", "*"]] } }
            }"#,
        )
        .unwrap();
        let table = job.table().unwrap();
        assert_eq!(table.columns(), &["age".to_string(), "1".to_string()]);
        assert_eq!(job.config, AnonymizationConfig::default());
        assert_eq!(job.rules().unwrap()[0].max_level(), 1);
    }

    #[test]
    fn missing_hierarchies_is_an_error() {
        let err = Job::parse(r#"{"columns": ["a"], "rows": [["x"]]}"#).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn malformed_hierarchy_exits_like_a_configuration_error() {
        let job = Job::parse(
            r#"{
                "columns": ["age"],
                "rows": [["23"]],
                "hierarchies": { "age": { "rows": [["23", "20s"], ["23", "30s"]] } }
            }"#,
        )
        .unwrap();
        let err = job.rules().unwrap_err();
        assert!(matches!(err, CliError::Hierarchy(HierarchyError::Conflict { .. })));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(CliError::from(AnonymizeError::NoStrategyFound).exit_code(), 1);
    }
}
