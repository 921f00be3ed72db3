//! End-to-end driver: search, pick the optimum, build the release.

use std::time::Instant;

use log::{error, info};
use ola_hierarchy::GenRule;
use ola_lattice::{Lattice, LatticeStats, Strategy};
use serde::{Deserialize, Serialize};

use crate::check::{KAnonymity, SuitabilityCheck};
use crate::error::AnonymizeError;
use crate::generalize::{DatasetOracle, Generalizer};
use crate::loss::{LossMetric, MetricKind};
use crate::release::{make_release, ReleaseStats};
use crate::search::OlaSearch;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnonymizationConfig {
    pub k: usize,
    /// Largest fraction of records that may fall in classes smaller than `k`.
    pub max_suppression: f64,
    pub metric: MetricKind,
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_suppression: 0.0,
            metric: MetricKind::Precision,
        }
    }
}

impl AnonymizationConfig {
    pub fn validate(&self, records: usize) -> Result<(), AnonymizeError> {
        if records == 0 {
            return Err(AnonymizeError::EmptyTable);
        }
        if self.k == 0 || self.k > records {
            return Err(AnonymizeError::InvalidK { k: self.k, records });
        }
        if !(0.0..=1.0).contains(&self.max_suppression) {
            return Err(AnonymizeError::InvalidSuppression(self.max_suppression));
        }
        Ok(())
    }
}

/// What a run found, for reporting. Not needed to use the release.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub lattice: LatticeStats,
    pub total_nodes: u128,
    pub k_minimal: Vec<Strategy>,
    pub attributes: Vec<String>,
    pub optimal: Strategy,
    pub loss: f64,
    pub runtime_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anonymization {
    pub release: Table,
    pub stats: ReleaseStats,
    pub report: RunReport,
}

/// Runs OLA with a privacy check `C` and a loss metric `M`.
#[derive(Debug, Clone)]
pub struct Anonymizer<C = KAnonymity, M = MetricKind> {
    config: AnonymizationConfig,
    checker: C,
    metric: M,
}

impl Anonymizer {
    pub fn new(config: AnonymizationConfig) -> Self {
        Self {
            config,
            checker: KAnonymity,
            metric: config.metric,
        }
    }
}

impl<C, M> Anonymizer<C, M>
where
    C: SuitabilityCheck,
    M: LossMetric,
{
    pub fn with_checker<C2: SuitabilityCheck>(self, checker: C2) -> Anonymizer<C2, M> {
        Anonymizer {
            config: self.config,
            checker,
            metric: self.metric,
        }
    }

    pub fn with_metric<M2: LossMetric>(self, metric: M2) -> Anonymizer<C, M2> {
        Anonymizer {
            config: self.config,
            checker: self.checker,
            metric,
        }
    }

    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Anonymizes `table`, generalizing the columns named by `rules`.
    ///
    /// Every call builds its own lattice, so memoized tags and counters never
    /// leak from one run into the next.
    pub fn run(&self, table: &Table, rules: &[GenRule]) -> Result<Anonymization, AnonymizeError> {
        let AnonymizationConfig {
            k, max_suppression, ..
        } = self.config;
        self.config.validate(table.len())?;
        let started = Instant::now();

        info!("Building lattice...");
        let generalizer = Generalizer::new(table, rules)?;
        let mut lattice = Lattice::new(generalizer.max_levels());
        info!(
            "{} quasi-identifiers {:?}, {} strategies",
            rules.len(),
            generalizer.attributes(),
            lattice.total_nodes()
        );

        info!("Searching lattice...");
        let oracle = DatasetOracle::new(&generalizer, &self.checker, k, max_suppression);
        let k_minimal = OlaSearch::new(&mut lattice, oracle).run()?;
        if k_minimal.is_empty() {
            error!("No strategy was found! Aborting.");
            return Err(AnonymizeError::NoStrategyFound);
        }
        let stats = lattice.stats();
        info!("{stats}");

        info!("Choosing optimal generalization strategy...");
        let k_minimal = k_minimal.into_sorted_vec();
        let mut best: Option<(f64, &Strategy)> = None;
        for strategy in &k_minimal {
            let loss = self.metric.loss(strategy, &generalizer, k)?;
            log::debug!("loss of {strategy}: {loss}");
            // ties keep the lexicographically smaller strategy
            if best.map_or(true, |(best_loss, _)| loss.total_cmp(&best_loss).is_lt()) {
                best = Some((loss, strategy));
            }
        }
        let (loss, optimal) = best.ok_or(AnonymizeError::NoStrategyFound)?;
        let optimal = optimal.clone();
        info!("Best loss ({loss}) was obtained with node {optimal}");

        let generalized = generalizer.materialize(&optimal)?;
        let (release, release_stats) = make_release(&generalized, &generalizer.qi_columns(), k)?;
        info!("Done.");

        Ok(Anonymization {
            release,
            stats: release_stats,
            report: RunReport {
                lattice: stats,
                total_nodes: lattice.total_nodes(),
                attributes: generalizer
                    .attributes()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                k_minimal,
                optimal,
                loss,
                runtime_secs: started.elapsed().as_secs_f64(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::EquivalenceClasses;
    use ola_hierarchy::LevelMap;
    use pretty_assertions::assert_eq;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn table() -> Table {
        Table::new(
            strings(&["age", "zip"]),
            vec![
                strings(&["23", "10001"]),
                strings(&["23", "10002"]),
                strings(&["25", "10001"]),
                strings(&["25", "10002"]),
            ],
        )
        .unwrap()
    }

    fn rules() -> Vec<GenRule> {
        let decades: LevelMap = [("23", "20s"), ("25", "20s")].into_iter().collect();
        let prefixes: LevelMap = [("10001", "100"), ("10002", "100")].into_iter().collect();
        vec![
            GenRule::new("age", vec![decades]),
            GenRule::new("zip", vec![prefixes]),
        ]
    }

    #[test]
    fn config_validation() {
        let config = AnonymizationConfig::default();
        assert_eq!(config.validate(0), Err(AnonymizeError::EmptyTable));
        assert_eq!(
            AnonymizationConfig { k: 5, ..config }.validate(4),
            Err(AnonymizeError::InvalidK { k: 5, records: 4 })
        );
        assert_eq!(
            AnonymizationConfig { k: 0, ..config }.validate(4),
            Err(AnonymizeError::InvalidK { k: 0, records: 4 })
        );
        assert_eq!(
            AnonymizationConfig {
                max_suppression: 1.5,
                ..config
            }
            .validate(4),
            Err(AnonymizeError::InvalidSuppression(1.5))
        );
        assert_eq!(config.validate(4), Ok(()));
    }

    #[test]
    fn ties_prefer_smallest_level_vector() {
        init_logger();
        let table = table();
        let rules = rules();
        // (0, 1) and (1, 0) are both k-minimal; give them equal loss
        let anonymizer = Anonymizer::new(AnonymizationConfig::default()).with_metric(|_: &Strategy| 1.0);
        let result = anonymizer.run(&table, &rules).unwrap();
        assert_eq!(
            result.report.k_minimal,
            vec![Strategy::new(vec![0, 1]), Strategy::new(vec![1, 0])]
        );
        assert_eq!(result.report.optimal, Strategy::new(vec![0, 1]));
    }

    #[test]
    fn custom_metric_picks_cheapest() {
        let table = table();
        let rules = rules();
        let anonymizer = Anonymizer::new(AnonymizationConfig::default())
            .with_metric(|s: &Strategy| s.levels()[1] as f64);
        let result = anonymizer.run(&table, &rules).unwrap();
        assert_eq!(result.report.optimal, Strategy::new(vec![1, 0]));
        assert_eq!(result.report.loss, 0.0);
    }

    #[test]
    fn checker_rejecting_everything_reports_no_strategy() {
        let table = table();
        let rules = rules();
        let anonymizer = Anonymizer::new(AnonymizationConfig::default())
            .with_checker(|_: &EquivalenceClasses, _: usize, _: f64| false);
        assert_eq!(
            anonymizer.run(&table, &rules).unwrap_err(),
            AnonymizeError::NoStrategyFound
        );
    }

    #[test]
    fn runs_do_not_share_state() {
        let table = table();
        let rules = rules();
        let anonymizer = Anonymizer::new(AnonymizationConfig::default());
        let first = anonymizer.run(&table, &rules).unwrap();
        let second = anonymizer.run(&table, &rules).unwrap();
        assert_eq!(first.report.lattice, second.report.lattice);
        assert_eq!(first.release, second.release);
    }
}
