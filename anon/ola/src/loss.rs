//! Information-loss metrics used to rank k-minimal strategies.

use std::fmt;
use std::str::FromStr;

use ola_lattice::Strategy;
use serde::{Deserialize, Serialize};

use crate::error::AnonymizeError;
use crate::generalize::Generalizer;

/// Scores a strategy; lower is better.
pub trait LossMetric {
    fn loss(
        &self,
        strategy: &Strategy,
        generalizer: &Generalizer<'_>,
        k: usize,
    ) -> Result<f64, AnonymizeError>;
}

impl<F> LossMetric for F
where
    F: Fn(&Strategy) -> f64,
{
    fn loss(&self, strategy: &Strategy, _: &Generalizer<'_>, _: usize) -> Result<f64, AnonymizeError> {
        Ok(self(strategy))
    }
}

/// Prec: average fraction of the hierarchy height climbed per attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Precision;

impl LossMetric for Precision {
    fn loss(
        &self,
        strategy: &Strategy,
        generalizer: &Generalizer<'_>,
        _: usize,
    ) -> Result<f64, AnonymizeError> {
        Ok(precision(strategy, &generalizer.max_levels()))
    }
}

pub fn precision(strategy: &Strategy, max_levels: &[usize]) -> f64 {
    if max_levels.is_empty() {
        return 0.0;
    }
    let climbed: f64 = strategy
        .levels()
        .iter()
        .zip(max_levels)
        .map(|(&level, &max)| if max == 0 { 0.0 } else { level as f64 / max as f64 })
        .sum();
    climbed / max_levels.len() as f64
}

/// Discernibility: each record is charged the size of its class, or the
/// table size if its class would be suppressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discernibility;

impl LossMetric for Discernibility {
    fn loss(
        &self,
        strategy: &Strategy,
        generalizer: &Generalizer<'_>,
        k: usize,
    ) -> Result<f64, AnonymizeError> {
        let classes = generalizer.classes(strategy)?;
        let n = classes.total_records() as f64;
        Ok(classes
            .iter()
            .map(|c| {
                let size = c.len() as f64;
                if c.len() >= k {
                    size * size
                } else {
                    size * n
                }
            })
            .sum())
    }
}

/// Metric selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Precision,
    Discernibility,
}

impl LossMetric for MetricKind {
    fn loss(
        &self,
        strategy: &Strategy,
        generalizer: &Generalizer<'_>,
        k: usize,
    ) -> Result<f64, AnonymizeError> {
        match self {
            MetricKind::Precision => Precision.loss(strategy, generalizer, k),
            MetricKind::Discernibility => Discernibility.loss(strategy, generalizer, k),
        }
    }
}

impl FromStr for MetricKind {
    type Err = AnonymizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "precision" | "prec" => Ok(MetricKind::Precision),
            "discernibility" | "dm" => Ok(MetricKind::Discernibility),
            other => Err(AnonymizeError::UnknownMetric(other.to_string())),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Precision => write!(f, "precision"),
            MetricKind::Discernibility => write!(f, "discernibility"),
        }
    }
}
