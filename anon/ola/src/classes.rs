use std::collections::HashMap;

use crate::error::AnonymizeError;

/// Records sharing one tuple of (generalized) quasi-identifier values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
    key: Vec<String>,
    rows: Vec<usize>,
}

impl EquivalenceClass {
    pub fn key(&self) -> &[String] {
        &self.key
    }

    /// Indices of the member rows in the source table.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Partition of a table's rows by quasi-identifier tuple. Classes keep the
/// order in which their first member appears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceClasses {
    classes: Vec<EquivalenceClass>,
    total: usize,
}

impl EquivalenceClasses {
    /// Groups rows given their keys in row order.
    pub fn group<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut index: HashMap<Vec<String>, usize> = HashMap::new();
        let mut classes: Vec<EquivalenceClass> = Vec::new();
        let mut total = 0;
        for (row, key) in keys.into_iter().enumerate() {
            total += 1;
            match index.get(&key) {
                Some(&slot) => classes[slot].rows.push(row),
                None => {
                    index.insert(key.clone(), classes.len());
                    classes.push(EquivalenceClass {
                        key,
                        rows: vec![row],
                    });
                }
            }
        }
        Self { classes, total }
    }

    /// Groups table rows by the values found at `columns`.
    pub fn from_rows(rows: &[Vec<String>], columns: &[usize]) -> Result<Self, AnonymizeError> {
        let keys = rows
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|&index| {
                        r.get(index)
                            .cloned()
                            .ok_or(AnonymizeError::ColumnOutOfRange {
                                index,
                                width: r.len(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::group(keys))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquivalenceClass> {
        self.classes.iter()
    }

    pub fn total_records(&self) -> usize {
        self.total
    }

    /// Number of records that sit in classes smaller than `k`.
    pub fn records_below(&self, k: usize) -> usize {
        self.classes
            .iter()
            .filter(|c| c.len() < k)
            .map(EquivalenceClass::len)
            .sum()
    }

    pub fn min_class_size(&self) -> Option<usize> {
        self.classes.iter().map(EquivalenceClass::len).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let rows = vec![
            row(&["12345", "30", "flu"]),
            row(&["99999", "40", "flu"]),
            row(&["12345", "30", "cold"]),
            row(&["99999", "40", "allergy"]),
            row(&["55555", "50", "flu"]),
        ];
        let classes = EquivalenceClasses::from_rows(&rows, &[0, 1]).unwrap();
        assert_eq!(classes.len(), 3);
        assert_eq!(classes.total_records(), 5);

        let keys: Vec<&[String]> = classes.iter().map(EquivalenceClass::key).collect();
        assert_eq!(
            keys,
            vec![
                row(&["12345", "30"]).as_slice(),
                row(&["99999", "40"]).as_slice(),
                row(&["55555", "50"]).as_slice(),
            ]
        );
        assert_eq!(classes.iter().next().unwrap().rows(), &[0, 2]);
        assert_eq!(classes.records_below(2), 1);
        assert_eq!(classes.min_class_size(), Some(1));
    }

    #[test]
    fn out_of_range_column_is_an_error() {
        let rows = vec![row(&["12345", "30"]), row(&["99999"])];
        assert_eq!(
            EquivalenceClasses::from_rows(&rows, &[1]),
            Err(AnonymizeError::ColumnOutOfRange { index: 1, width: 1 })
        );
    }

    #[test]
    fn empty_input() {
        let classes = EquivalenceClasses::group(Vec::<Vec<String>>::new());
        assert!(classes.is_empty());
        assert_eq!(classes.total_records(), 0);
        assert_eq!(classes.min_class_size(), None);
    }
}
