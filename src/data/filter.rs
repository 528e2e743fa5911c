use regex::Regex;

use super::error::{DataError, Result};
use super::model::{Cell, Table};

// ---------------------------------------------------------------------------
// Pattern – literal or regular-expression text matcher
// ---------------------------------------------------------------------------

/// A matching or delimiting pattern over one column's text.
///
/// `Regex` patterns are not validated up front; compilation happens at the
/// first operation that uses the pattern and a bad expression surfaces as
/// [`DataError::InvalidPattern`] there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Plain substring match / fixed delimiter.
    Literal(String),
    /// Regular expression, unanchored unless the expression anchors itself.
    Regex(String),
}

impl Pattern {
    pub fn literal(s: impl Into<String>) -> Self {
        Pattern::Literal(s.into())
    }

    pub fn regex(s: impl Into<String>) -> Self {
        Pattern::Regex(s.into())
    }

    pub(crate) fn compile(&self) -> Result<CompiledPattern<'_>> {
        match self {
            Pattern::Literal(s) => Ok(CompiledPattern::Literal(s)),
            Pattern::Regex(src) => Regex::new(src)
                .map(CompiledPattern::Regex)
                .map_err(|source| DataError::InvalidPattern {
                    pattern: src.clone(),
                    source,
                }),
        }
    }
}

/// A pattern ready to run against cell text.
pub(crate) enum CompiledPattern<'a> {
    Literal(&'a str),
    Regex(Regex),
}

impl CompiledPattern<'_> {
    /// Unanchored "contains" test.
    pub(crate) fn matches(&self, value: &str) -> bool {
        match self {
            CompiledPattern::Literal(needle) => value.contains(needle),
            CompiledPattern::Regex(re) => re.is_match(value),
        }
    }

    /// Split on every non-overlapping match. Standard split semantics:
    /// adjacent delimiters yield empty pieces, and a value with no match
    /// comes back whole as a single piece.
    pub(crate) fn split(&self, value: &str) -> Vec<String> {
        match self {
            CompiledPattern::Literal(delim) => {
                value.split(*delim).map(str::to_string).collect()
            }
            CompiledPattern::Regex(re) => re.split(value).map(str::to_string).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Masks – row-aligned boolean predicates
// ---------------------------------------------------------------------------

/// A boolean sequence aligned 1:1 with a table's rows.
pub type Mask = Vec<bool>;

/// Evaluate `pattern` as a contains-test against each row's value in
/// `column`. Null (and non-string) cells test false. Pure: the table is
/// never touched, and the same inputs always produce the same mask.
pub fn filter_mask(table: &Table, column: &str, pattern: &Pattern) -> Result<Mask> {
    let idx = table.column_index(column)?;
    let compiled = pattern.compile()?;

    Ok(table
        .rows()
        .iter()
        .map(|row| match row[idx].as_str() {
            Some(value) => compiled.matches(value),
            None => false,
        })
        .collect())
}

/// Elementwise AND of two row-aligned masks.
pub fn mask_and(a: &Mask, b: &Mask) -> Mask {
    a.iter().zip(b).map(|(&x, &y)| x && y).collect()
}

/// Elementwise OR of two row-aligned masks.
pub fn mask_or(a: &Mask, b: &Mask) -> Mask {
    a.iter().zip(b).map(|(&x, &y)| x || y).collect()
}

/// The sub-table of rows where `mask` is true, all columns and original
/// row order preserved.
pub fn select(table: &Table, mask: &Mask) -> Table {
    table.subset(mask)
}

/// The table plus one derived boolean column holding `mask`. The input
/// table is untouched.
pub fn append_mask(table: &Table, new_column: &str, mask: &Mask) -> Table {
    let mut annotated = table.clone();
    annotated.push_column(new_column, mask.iter().map(|&b| Cell::Bool(b)).collect());
    annotated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Cell {
        Cell::Str(s.to_string())
    }

    fn schedule() -> Table {
        Table::from_rows(
            vec!["Number".into(), "Days".into(), "Time".into()],
            vec![
                vec![cell("150"), cell("TuTh"), cell("9:00AM - 10:15AM")],
                vec![cell("2200"), cell("MWF"), cell("1:00PM")],
                vec![cell("3305"), Cell::Null, cell("11:00AM")],
                vec![cell("225"), cell("Th"), Cell::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn regex_contains_spans_the_value() {
        let t = Table::from_rows(
            vec!["Time".into()],
            vec![
                vec![cell("TuTh 9:00AM - 10:15AM")],
                vec![cell("MWF 1:00PM")],
            ],
        )
        .unwrap();
        let mask = filter_mask(&t, "Time", &Pattern::regex("AM.*PM")).unwrap();
        assert_eq!(mask, vec![true, false]);
    }

    #[test]
    fn literal_contains() {
        let t = schedule();
        let mask = filter_mask(&t, "Time", &Pattern::literal("AM")).unwrap();
        assert_eq!(mask, vec![true, false, true, false]);
    }

    #[test]
    fn null_cells_test_false() {
        let t = schedule();
        let mask = filter_mask(&t, "Days", &Pattern::regex("Tu|Th")).unwrap();
        assert_eq!(mask, vec![true, false, false, true]);
    }

    #[test]
    fn anchors_are_respected() {
        let t = schedule();
        let low = filter_mask(&t, "Number", &Pattern::regex("^1|^2")).unwrap();
        assert_eq!(low, vec![true, true, false, true]);
    }

    #[test]
    fn masks_compose_elementwise() {
        let t = schedule();
        let low = filter_mask(&t, "Number", &Pattern::regex("^1|^2")).unwrap();
        let ends = filter_mask(&t, "Number", &Pattern::regex("0$|5$")).unwrap();
        let both = mask_and(&low, &ends);
        assert_eq!(both, vec![true, true, false, true]);

        let either = mask_or(&low, &ends);
        assert_eq!(either, vec![true, true, true, true]);
    }

    #[test]
    fn mask_length_matches_row_count() {
        let t = schedule();
        let mask = filter_mask(&t, "Days", &Pattern::literal("W")).unwrap();
        assert_eq!(mask.len(), t.len());
    }

    #[test]
    fn mask_is_idempotent() {
        let t = schedule();
        let p = Pattern::regex("0$|5$");
        let first = filter_mask(&t, "Number", &p).unwrap();
        let second = filter_mask(&t, "Number", &p).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn select_preserves_order_and_columns() {
        let t = schedule();
        let mask = filter_mask(&t, "Number", &Pattern::regex("^1|^2")).unwrap();
        let sub = select(&t, &mask);

        assert_eq!(sub.columns(), t.columns());
        assert_eq!(sub.len(), 3);
        let numbers: Vec<_> = sub
            .rows()
            .iter()
            .map(|r| r[0].as_str().unwrap().to_string())
            .collect();
        assert_eq!(numbers, vec!["150", "2200", "225"]);
    }

    #[test]
    fn append_mask_adds_bool_column() {
        let t = schedule();
        let mask = filter_mask(&t, "Time", &Pattern::literal("AM")).unwrap();
        let annotated = append_mask(&t, "has_AM", &mask);

        assert_eq!(annotated.columns().last().unwrap(), "has_AM");
        assert_eq!(annotated.rows()[0][3], Cell::Bool(true));
        assert_eq!(annotated.rows()[1][3], Cell::Bool(false));
        // input untouched
        assert_eq!(t.columns().len(), 3);
    }

    #[test]
    fn bad_regex_fails_at_first_use() {
        let t = schedule();
        let err = filter_mask(&t, "Days", &Pattern::regex("(unclosed")).unwrap_err();
        assert!(matches!(err, DataError::InvalidPattern { .. }));
    }

    #[test]
    fn unknown_column_is_reported() {
        let t = schedule();
        let err = filter_mask(&t, "Room", &Pattern::literal("A")).unwrap_err();
        assert!(matches!(err, DataError::UnknownColumn { .. }));
    }
}
