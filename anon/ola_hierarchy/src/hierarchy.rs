//! Conversion of attribute hierarchies into [`GenRule`]s.
//!
//! Two shapes are accepted: a flat table of leaf-to-root paths, one row per
//! raw value, and a tree rooted at the most general label.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::HierarchyError;
use crate::rule::{GenRule, LevelMap, SUPPRESSED};

/// A node of a value generalization tree. The root is the most general label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HierarchyTree {
    pub value: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<HierarchyTree>,
}

impl HierarchyTree {
    pub fn leaf(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn node(value: impl Into<String>, children: Vec<HierarchyTree>) -> Self {
        Self {
            value: value.into(),
            children,
        }
    }

    fn collect_paths<'t>(&'t self, prefix: &mut Vec<&'t str>, out: &mut Vec<Vec<&'t str>>) {
        prefix.push(&self.value);
        if self.children.is_empty() {
            out.push(prefix.clone());
        } else {
            for child in &self.children {
                child.collect_paths(prefix, out);
            }
        }
        prefix.pop();
    }
}

/// Hierarchy description as found in a job file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum HierarchySource {
    Rows { rows: Vec<Vec<String>> },
    Tree { tree: HierarchyTree },
}

impl HierarchySource {
    pub fn into_rule(self, attribute: &str) -> Result<GenRule, HierarchyError> {
        let hierarchy = match self {
            HierarchySource::Rows { rows } => Hierarchy::from_rows(attribute, rows)?,
            HierarchySource::Tree { tree } => Hierarchy::from_tree(attribute, &tree)?,
        };
        Ok(hierarchy.into_rule())
    }
}

/// Validated level tables for one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    attribute: String,
    levels: Vec<LevelMap>,
}

impl Hierarchy {
    /// Builds the hierarchy from rows shaped `[raw, level1, ..., levelN]`.
    ///
    /// A last column holding only the suppression marker is dropped, the top
    /// level of every rule already suppresses.
    pub fn from_rows<R, S>(attribute: &str, rows: R) -> Result<Self, HierarchyError>
    where
        R: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        let rows: Vec<Vec<S>> = rows.into_iter().collect();
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(HierarchyError::Empty(attribute.to_string())),
        };
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(HierarchyError::Ragged {
                    attribute: attribute.to_string(),
                    row: idx,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let mut depth = width;
        if depth > 1 && rows.iter().all(|row| row[depth - 1].as_ref() == SUPPRESSED) {
            depth -= 1;
        }

        let mut levels = Vec::with_capacity(depth.saturating_sub(1));
        for col in 1..depth {
            let mut map = LevelMap::new();
            for row in &rows {
                let value = row[0].as_ref();
                let label = row[col].as_ref();
                if let Some(previous) = map.insert(value, label) {
                    if previous != label {
                        return Err(HierarchyError::Conflict {
                            attribute: attribute.to_string(),
                            value: value.to_string(),
                            level: col,
                            first: previous,
                            second: label.to_string(),
                        });
                    }
                }
            }
            levels.push(map);
        }

        log::debug!(
            "hierarchy '{attribute}': {} values, {} intermediate levels",
            rows.len(),
            levels.len()
        );
        Ok(Self {
            attribute: attribute.to_string(),
            levels,
        })
    }

    /// Builds the hierarchy from a tree whose leaves are the raw values.
    /// The root is dropped; it stands for the implicit suppression level.
    pub fn from_tree(attribute: &str, tree: &HierarchyTree) -> Result<Self, HierarchyError> {
        let mut paths = Vec::new();
        tree.collect_paths(&mut Vec::new(), &mut paths);

        let depth = paths.first().map(Vec::len).unwrap_or_default();
        if let Some(uneven) = paths.iter().find(|p| p.len() != depth) {
            return Err(HierarchyError::UnevenDepth {
                attribute: attribute.to_string(),
                first: depth - 1,
                other: uneven.len() - 1,
            });
        }
        if depth <= 1 {
            // root only: nothing to generalize to but suppression
            return Ok(Self {
                attribute: attribute.to_string(),
                levels: Vec::new(),
            });
        }

        let rows = paths.into_iter().map(|path| {
            let mut row: Vec<&str> = path[1..].to_vec();
            row.reverse();
            row
        });
        Self::from_rows(attribute, rows)
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn into_rule(self) -> GenRule {
        GenRule::new(self.attribute, self.levels)
    }
}
