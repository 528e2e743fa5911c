use std::io::Read;
use std::path::Path;

use super::error::{DataError, Result};
use super::model::{Cell, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a comma-delimited text file (header row naming columns) as an
/// all-string table.
///
/// Every field is kept as text exactly as written — no type inference, so
/// leading zeros and mixed-format numeric-looking strings round-trip.
/// Empty fields load as [`Cell::Null`]. The file handle is scoped to this
/// call and released once parsing ends.
pub fn load(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|source| DataError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_from_reader(file)?;
    log::info!(
        "Loaded {} rows with columns {:?}",
        table.len(),
        table.columns()
    );
    Ok(table)
}

/// Load and immediately drop rows missing a value in any required column.
/// The plain [`load`] keeps incomplete rows; both behaviours are exposed
/// so callers choose explicitly.
pub fn load_trimmed(path: &Path, required_columns: &[&str]) -> Result<Table> {
    let table = load(path)?;
    let trimmed = table.drop_null(required_columns)?;
    log::info!(
        "Trimmed {} incomplete rows ({} remain)",
        table.len() - trimmed.len(),
        trimmed.len()
    );
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse CSV text from any reader. Split out from [`load`] so parsing can
/// be exercised without touching the filesystem.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Table> {
    // flexible: width is checked below so the mismatch reports our row number.
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| DataError::MalformedSource {
            row: 0,
            detail: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| DataError::MalformedSource {
            row: row_no,
            detail: e.to_string(),
        })?;

        if record.len() != headers.len() {
            return Err(DataError::MalformedSource {
                row: row_no,
                detail: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        let row: Vec<Cell> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Null
                } else {
                    Cell::Str(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Table::from_rows(headers, rows)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;

    const SCHEDULE: &str = "\
Number,Name,Days,Time
0150,Intro,TuTh,9:00AM - 10:15AM
2200,Micro,,1:00PM
3305,Econometrics,MWF,11:00AM
";

    fn parse(text: &str) -> Table {
        load_from_reader(Cursor::new(text)).unwrap()
    }

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("textframe_{}_{}.csv", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn fields_load_as_text() {
        let t = parse(SCHEDULE);
        assert_eq!(
            t.columns(),
            &["Number", "Name", "Days", "Time"]
        );
        assert_eq!(t.len(), 3);
        // leading zero preserved, no numeric inference
        assert_eq!(t.rows()[0][0], Cell::Str("0150".into()));
    }

    #[test]
    fn empty_field_loads_as_null() {
        let t = parse(SCHEDULE);
        assert_eq!(t.rows()[1][2], Cell::Null);
    }

    #[test]
    fn ragged_row_is_malformed() {
        let err = load_from_reader(Cursor::new("a,b\n1,2\n3\n")).unwrap_err();
        match err {
            DataError::MalformedSource { row, .. } => assert_eq!(row, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = load(Path::new("/no/such/dir/schedule.csv")).unwrap_err();
        assert!(matches!(err, DataError::SourceNotFound { .. }));
    }

    #[test]
    fn load_trimmed_drops_rows_missing_required_column() {
        let path = temp_csv("trim", SCHEDULE);
        let t = load_trimmed(&path, &["Days"]).unwrap();
        std::fs::remove_file(&path).unwrap();

        // Exactly the row with a blank Days field is gone.
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows()[0][1], Cell::Str("Intro".into()));
        assert_eq!(t.rows()[1][1], Cell::Str("Econometrics".into()));
    }

    #[test]
    fn load_keeps_incomplete_rows() {
        let path = temp_csv("notrim", SCHEDULE);
        let t = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(t.len(), 3);
    }
}
