use serde::Serialize;

use crate::error::AnonymizeError;

/// A row-oriented table of string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Every row must be as wide as the column list.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, AnonymizeError> {
        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
            .map(|(i, r)| (i, r.len()))
        {
            return Err(AnonymizeError::RaggedRow {
                row,
                expected: columns.len(),
                found,
            });
        }
        Ok(Self { columns, rows })
    }

    /// Builds a table from raw records. Quasi-identifier columns take the
    /// given names, every other column is named after its position.
    pub fn from_records(
        records: Vec<Vec<String>>,
        qi_index: &[usize],
        qi_names: &[String],
    ) -> Result<Self, AnonymizeError> {
        let width = records.first().map(Vec::len).unwrap_or_default();
        let mut columns: Vec<String> = (0..width).map(|i| i.to_string()).collect();
        for (&index, name) in qi_index.iter().zip(qi_names) {
            let slot = columns
                .get_mut(index)
                .ok_or(AnonymizeError::ColumnOutOfRange { index, width })?;
            *slot = name.clone();
        }
        Self::new(columns, records)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, index: usize) -> Result<impl Iterator<Item = &str>, AnonymizeError> {
        self.check_columns(&[index])?;
        Ok(self.rows.iter().map(move |r| r[index].as_str()))
    }

    /// Fails with `ColumnOutOfRange` unless every index names a column.
    pub fn check_columns(&self, indices: &[usize]) -> Result<(), AnonymizeError> {
        let width = self.columns.len();
        match indices.iter().find(|&&index| index >= width) {
            Some(&index) => Err(AnonymizeError::ColumnOutOfRange { index, width }),
            None => Ok(()),
        }
    }

    /// A table with the same columns and the given rows.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Table::new(
            strings(&["age", "zip"]),
            vec![strings(&["23", "10001"]), strings(&["25"])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            AnonymizeError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn from_records_names_quasi_identifiers() {
        let table = Table::from_records(
            vec![strings(&["23", "10001", "flu"]), strings(&["25", "10002", "cold"])],
            &[0, 1],
            &strings(&["age", "zip"]),
        )
        .unwrap();
        assert_eq!(table.columns(), strings(&["age", "zip", "2"]).as_slice());
        assert_eq!(table.column_index("zip"), Some(1));
        assert_eq!(table.column(2).unwrap().collect::<Vec<_>>(), vec!["flu", "cold"]);
    }

    #[test]
    fn column_out_of_range_is_an_error() {
        let table = Table::new(strings(&["age"]), vec![strings(&["23"])]).unwrap();
        assert_eq!(
            table.column(1).err(),
            Some(AnonymizeError::ColumnOutOfRange { index: 1, width: 1 })
        );
        assert_eq!(table.check_columns(&[0]), Ok(()));
    }

    #[test]
    fn from_records_rejects_bad_index() {
        let err = Table::from_records(vec![strings(&["23"])], &[3], &strings(&["age"])).unwrap_err();
        assert_eq!(err, AnonymizeError::ColumnOutOfRange { index: 3, width: 1 });
    }
}
