//! Applying a strategy to a table.

use log::debug;
use ola_hierarchy::{GenRule, GeneralizationError};
use ola_lattice::{Strategy, SuitabilityOracle};

use crate::check::SuitabilityCheck;
use crate::classes::EquivalenceClasses;
use crate::error::AnonymizeError;
use crate::table::Table;

#[derive(Debug, Clone, Copy)]
struct QuasiIdentifier<'a> {
    column: usize,
    rule: &'a GenRule,
}

/// Binds generalization rules to the columns of one table.
///
/// Quasi-identifiers are ordered by column position; strategies index
/// their levels in that order.
#[derive(Debug, Clone)]
pub struct Generalizer<'a> {
    table: &'a Table,
    qis: Vec<QuasiIdentifier<'a>>,
}

impl<'a> Generalizer<'a> {
    pub fn new(table: &'a Table, rules: &'a [GenRule]) -> Result<Self, AnonymizeError> {
        let mut qis: Vec<QuasiIdentifier<'a>> = Vec::with_capacity(rules.len());
        for rule in rules {
            let column = table
                .column_index(rule.attribute())
                .ok_or_else(|| AnonymizeError::UnknownAttribute(rule.attribute().to_string()))?;
            if qis.iter().any(|qi| qi.column == column) {
                return Err(AnonymizeError::DuplicateAttribute(
                    rule.attribute().to_string(),
                ));
            }
            qis.push(QuasiIdentifier { column, rule });
        }
        qis.sort_by_key(|qi| qi.column);
        Ok(Self { table, qis })
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn max_levels(&self) -> Vec<usize> {
        self.qis.iter().map(|qi| qi.rule.max_level()).collect()
    }

    pub fn qi_columns(&self) -> Vec<usize> {
        self.qis.iter().map(|qi| qi.column).collect()
    }

    pub fn attributes(&self) -> Vec<&'a str> {
        self.qis.iter().map(|qi| qi.rule.attribute()).collect()
    }

    /// Groups the table by its quasi-identifiers generalized to `strategy`.
    pub fn classes(&self, strategy: &Strategy) -> Result<EquivalenceClasses, GeneralizationError> {
        let keys = self
            .table
            .rows()
            .iter()
            .map(|row| self.generalize_key(row, strategy))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EquivalenceClasses::group(keys))
    }

    /// The whole table with quasi-identifier columns generalized to `strategy`.
    pub fn materialize(&self, strategy: &Strategy) -> Result<Table, GeneralizationError> {
        let mut rows = Vec::with_capacity(self.table.len());
        for row in self.table.rows() {
            let mut out = row.clone();
            for (qi, &level) in self.qis.iter().zip(strategy.levels()) {
                out[qi.column] = qi.rule.apply(&row[qi.column], level)?.to_string();
            }
            rows.push(out);
        }
        Ok(self.table.with_rows(rows))
    }

    fn generalize_key(
        &self,
        row: &[String],
        strategy: &Strategy,
    ) -> Result<Vec<String>, GeneralizationError> {
        self.qis
            .iter()
            .zip(strategy.levels())
            .map(|(qi, &level)| qi.rule.apply(&row[qi.column], level).map(str::to_string))
            .collect()
    }
}

/// Evaluates strategies against the data: generalize, group, then check.
pub struct DatasetOracle<'g, 'a, C> {
    generalizer: &'g Generalizer<'a>,
    checker: &'g C,
    k: usize,
    max_suppression: f64,
}

impl<'g, 'a, C: SuitabilityCheck> DatasetOracle<'g, 'a, C> {
    pub fn new(generalizer: &'g Generalizer<'a>, checker: &'g C, k: usize, max_suppression: f64) -> Self {
        Self {
            generalizer,
            checker,
            k,
            max_suppression,
        }
    }
}

impl<C: SuitabilityCheck> SuitabilityOracle for DatasetOracle<'_, '_, C> {
    type Error = GeneralizationError;

    fn is_suitable(&mut self, strategy: &Strategy) -> Result<bool, GeneralizationError> {
        let classes = self.generalizer.classes(strategy)?;
        debug!(
            "{strategy}: {} classes, smallest {:?}",
            classes.len(),
            classes.min_class_size()
        );
        Ok(self
            .checker
            .is_suitable(&classes, self.k, self.max_suppression))
    }
}
