use super::error::Result;
use super::filter::Pattern;
use super::model::{Cell, Table};

// ---------------------------------------------------------------------------
// Splitting a text column into tokens
// ---------------------------------------------------------------------------

/// What to do with the pieces of a split column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// Append one list-valued column with the given name; the source table's
    /// columns are all kept.
    AsList(String),
    /// Build a new table with one column per piece position, named "0",
    /// "1", … Width is the maximum piece count; shorter rows get trailing
    /// nulls. Row order matches the input but no columns are shared.
    Expand,
}

/// Split each row's value in `column` on every non-overlapping match of
/// `delimiter`. Standard split semantics apply: adjacent delimiter matches
/// produce an empty piece, and a value with no match yields itself as the
/// single piece. Null source cells stay null (a whole row of nulls in
/// `Expand` mode).
pub fn split_column(
    table: &Table,
    column: &str,
    delimiter: &Pattern,
    mode: SplitMode,
) -> Result<Table> {
    let idx = table.column_index(column)?;
    let compiled = delimiter.compile()?;

    // Per-row piece lists; None where the source cell has no text.
    let pieces: Vec<Option<Vec<String>>> = table
        .rows()
        .iter()
        .map(|row| row[idx].as_str().map(|value| compiled.split(value)))
        .collect();

    match mode {
        SplitMode::AsList(new_column) => {
            let cells = pieces
                .into_iter()
                .map(|p| match p {
                    Some(items) => Cell::List(items),
                    None => Cell::Null,
                })
                .collect();
            let mut out = table.clone();
            out.push_column(&new_column, cells);
            Ok(out)
        }
        SplitMode::Expand => {
            let width = pieces
                .iter()
                .filter_map(|p| p.as_ref().map(Vec::len))
                .max()
                .unwrap_or(0);
            let columns: Vec<String> = (0..width).map(|i| i.to_string()).collect();

            let rows: Vec<Vec<Cell>> = pieces
                .into_iter()
                .map(|p| {
                    let mut row: Vec<Cell> = match p {
                        Some(items) => items.into_iter().map(Cell::Str).collect(),
                        None => Vec::new(),
                    };
                    row.resize(width, Cell::Null);
                    row
                })
                .collect();

            Table::from_rows(columns, rows)
        }
    }
}
