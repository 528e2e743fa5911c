use std::collections::BTreeSet;
use std::fmt;

use super::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Cell – a single table cell
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell.
///
/// Source files load as `Str`/`Null` only; `Bool` and `List` appear in
/// derived annotation columns (predicate masks and token lists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Str(String),
    Bool(bool),
    List(Vec<String>),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Str(s) => write!(f, "{s}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::List(items) => write!(f, "[{}]", items.join(", ")),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

impl Cell {
    /// The underlying text, if this is a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to interpret the cell as an `f64` for aggregation and plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Str(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

// ---------------------------------------------------------------------------
// Table – an ordered record table
// ---------------------------------------------------------------------------

/// A loaded record table: ordered column names and rows of cells.
///
/// Every row is exactly `columns.len()` wide (checked at construction) and
/// row order is preserved by every operation. Annotation never mutates an
/// existing table; derived tables are independent copies.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, verifying that every row matches the header width.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let expected = columns.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(DataError::MalformedSource {
                    row: i,
                    detail: format!("expected {expected} fields, found {}", row.len()),
                });
            }
        }
        Ok(Table { columns, rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in load order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Position of a column, or `UnknownColumn`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DataError::UnknownColumn {
                name: name.to_string(),
            })
    }

    /// The cells of one column, row-ordered.
    pub fn column(&self, name: &str) -> Result<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Append a derived column. The cells must be row-aligned with this
    /// table; annotation code produces them from the table itself.
    pub(crate) fn push_column(&mut self, name: &str, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.rows.len());
        self.columns.push(name.to_string());
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row.push(cell);
        }
    }

    /// Rows where the aligned mask is true, as a new table. Callers build
    /// the mask from this same table, so the lengths always agree.
    pub(crate) fn subset(&self, mask: &[bool]) -> Table {
        debug_assert_eq!(mask.len(), self.rows.len());
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .zip(mask)
                .filter(|(_, &keep)| keep)
                .map(|(row, _)| row.clone())
                .collect(),
        }
    }

    /// Sorted unique display values of a column, nulls and lists excluded.
    /// Used for categorical grouping (facet panels, colour legend).
    pub fn unique_values(&self, name: &str) -> Result<BTreeSet<String>> {
        let idx = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| match &row[idx] {
                Cell::Str(s) => Some(s.clone()),
                Cell::Bool(b) => Some(b.to_string()),
                Cell::List(_) | Cell::Null => None,
            })
            .collect())
    }

    /// Drop rows with a null in any of the given columns, returning a new
    /// independent table. The original is untouched.
    pub fn drop_null(&self, required: &[&str]) -> Result<Table> {
        let indices: Vec<usize> = required
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<_>>()?;

        let rows: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .filter(|row| indices.iter().all(|&i| !row[i].is_null()))
            .cloned()
            .collect();

        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Cell {
        Cell::Str(s.to_string())
    }

    fn sample() -> Table {
        Table::from_rows(
            vec!["Days".into(), "Time".into()],
            vec![
                vec![cell("TuTh"), cell("9:00AM - 10:15AM")],
                vec![Cell::Null, cell("1:00PM")],
                vec![cell("MWF"), Cell::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = Table::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![cell("1")], vec![cell("2"), cell("3")]],
        )
        .unwrap_err();
        match err {
            DataError::MalformedSource { row, detail } => {
                assert_eq!(row, 0);
                assert!(detail.contains("expected 2 fields"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn column_lookup() {
        let t = sample();
        assert_eq!(t.column_index("Time").unwrap(), 1);
        assert!(matches!(
            t.column_index("Number"),
            Err(DataError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn drop_null_removes_only_offending_rows() {
        let t = sample();
        let trimmed = t.drop_null(&["Days"]).unwrap();
        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed.rows()[0][0], cell("TuTh"));
        assert_eq!(trimmed.rows()[1][0], cell("MWF"));
        // original untouched
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn drop_null_multiple_columns() {
        let t = sample();
        let trimmed = t.drop_null(&["Days", "Time"]).unwrap();
        assert_eq!(trimmed.len(), 1);
    }

    #[test]
    fn unique_values_skips_nulls() {
        let t = sample();
        let unique = t.unique_values("Days").unwrap();
        assert_eq!(
            unique.into_iter().collect::<Vec<_>>(),
            vec!["MWF".to_string(), "TuTh".to_string()]
        );
    }

    #[test]
    fn cell_numeric_parse() {
        assert_eq!(cell("2.5").as_f64(), Some(2.5));
        assert_eq!(cell(" 10 ").as_f64(), Some(10.0));
        assert_eq!(cell("9:00AM").as_f64(), None);
        assert_eq!(Cell::Null.as_f64(), None);
    }

    #[test]
    fn leading_zeros_round_trip_as_text() {
        let c = cell("0420");
        assert_eq!(c.as_str(), Some("0420"));
        assert_eq!(c.to_string(), "0420");
    }
}
