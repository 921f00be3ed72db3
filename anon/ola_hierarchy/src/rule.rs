//! Generalization rules.
//!
//! A [`GenRule`] describes how one quasi-identifying attribute is coarsened.
//! Level `0` is the identity, levels `1..max_level` are lookup tables taken
//! from the attribute's hierarchy, and `max_level` maps every value to the
//! suppression marker [`SUPPRESSED`].

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeneralizationError;

/// Label emitted for every value at a rule's top level.
pub const SUPPRESSED: &str = "*";

/// One intermediate level of a hierarchy: raw value -> coarser label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelMap {
    mappings: HashMap<String, String>,
}

impl LevelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the label previously stored for `value`, if any.
    pub fn insert(&mut self, value: impl Into<String>, label: impl Into<String>) -> Option<String> {
        self.mappings.insert(value.into(), label.into())
    }

    pub fn get(&self, value: &str) -> Option<&str> {
        self.mappings.get(value).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LevelMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            mappings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered generalization levels for a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenRule {
    attribute: String,
    levels: Vec<LevelMap>,
}

impl GenRule {
    /// Builds a rule from the intermediate level tables, least general first.
    /// The identity and suppression levels are implicit.
    pub fn new(attribute: impl Into<String>, levels: Vec<LevelMap>) -> Self {
        Self {
            attribute: attribute.into(),
            levels,
        }
    }

    /// A rule with no intermediate levels: a value is either kept or suppressed.
    pub fn suppress_only(attribute: impl Into<String>) -> Self {
        Self::new(attribute, Vec::new())
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Highest valid level, the one that suppresses everything.
    pub fn max_level(&self) -> usize {
        self.levels.len() + 1
    }

    /// Number of hierarchy-supplied levels (identity and suppression excluded).
    pub fn levels_count(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[LevelMap] {
        &self.levels
    }

    /// Generalizes `value` to `level`.
    ///
    /// Values missing from an intermediate table are an error and are never
    /// passed through unchanged.
    pub fn apply<'v>(&'v self, value: &'v str, level: usize) -> Result<&'v str, GeneralizationError> {
        self.verify_level(level)?;
        if level == 0 {
            return Ok(value);
        }
        if level == self.max_level() {
            return Ok(SUPPRESSED);
        }
        self.levels[level - 1]
            .get(value)
            .ok_or_else(|| GeneralizationError::MissingCoverage {
                attribute: self.attribute.clone(),
                value: value.to_string(),
                level,
            })
    }

    fn verify_level(&self, level: usize) -> Result<(), GeneralizationError> {
        if level > self.max_level() {
            return Err(GeneralizationError::InvalidLevel {
                attribute: self.attribute.clone(),
                level,
                max_level: self.max_level(),
            });
        }
        Ok(())
    }
}
