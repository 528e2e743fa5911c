use super::error::Result;
use super::model::Table;

// ---------------------------------------------------------------------------
// Numeric boundary for the chart layer
// ---------------------------------------------------------------------------

/// Read a column as a numeric sequence, row-aligned with the table.
/// Null and non-numeric cells become NaN; the aggregations below skip
/// NaN rather than poisoning the result.
pub fn numeric_column(table: &Table, column: &str) -> Result<Vec<f64>> {
    Ok(table
        .column(column)?
        .iter()
        .map(|cell| cell.as_f64().unwrap_or(f64::NAN))
        .collect())
}

/// NaN-skipping mean. None when no finite values remain.
pub fn mean(values: &[f64]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &v in values {
        if !v.is_nan() {
            sum += v;
            n += 1;
        }
    }
    (n > 0).then(|| sum / n as f64)
}

/// NaN-skipping median. None when no finite values remain.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(f64::total_cmp);
    let mid = finite.len() / 2;
    Some(if finite.len() % 2 == 1 {
        finite[mid]
    } else {
        (finite[mid - 1] + finite[mid]) / 2.0
    })
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Equal-width histogram between the smallest and largest finite value.
/// `edges` has `counts.len() + 1` entries; the last bin includes its upper
/// edge so the maximum lands in a bin.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        if self.edges.len() < 2 {
            0.0
        } else {
            self.edges[1] - self.edges[0]
        }
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        (self.edges[bin] + self.edges[bin + 1]) / 2.0
    }
}

/// Bucket the finite values into `bins` equal-width bins. NaN values are
/// skipped. When every value is identical the single point is centred in
/// a unit-wide range so the bins stay non-degenerate.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if bins == 0 || finite.is_empty() {
        return Histogram {
            edges: Vec::new(),
            counts: Vec::new(),
        };
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in &finite {
        min = min.min(v);
        max = max.max(v);
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for &v in &finite {
        let mut bin = ((v - min) / width) as usize;
        if bin >= bins {
            bin = bins - 1; // max value goes in the last bin
        }
        counts[bin] += 1;
    }

    Histogram { edges, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    #[test]
    fn numeric_column_maps_nulls_to_nan() {
        let t = Table::from_rows(
            vec!["etr".into()],
            vec![
                vec![Cell::Str("0.25".into())],
                vec![Cell::Null],
                vec![Cell::Str("n/a".into())],
            ],
        )
        .unwrap();
        let values = numeric_column(&t, "etr").unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], 0.25);
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
    }

    #[test]
    fn mean_and_median_skip_nan() {
        let values = [1.0, f64::NAN, 3.0];
        assert_eq!(mean(&values), Some(2.0));
        assert_eq!(median(&values), Some(2.0));
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
    }

    #[test]
    fn empty_aggregations_are_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[f64::NAN]), None);
    }

    #[test]
    fn histogram_counts_every_finite_value() {
        let values = [0.0, 0.1, 0.5, 0.9, 1.0, f64::NAN];
        let h = histogram(&values, 2);
        assert_eq!(h.counts.len(), 2);
        assert_eq!(h.edges.len(), 3);
        assert_eq!(h.counts.iter().sum::<usize>(), 5);
        // the maximum lands in the last bin, not out of range
        assert_eq!(h.counts, vec![3, 2]);
    }

    #[test]
    fn histogram_of_identical_values() {
        let h = histogram(&[2.0, 2.0, 2.0], 4);
        assert_eq!(h.counts.iter().sum::<usize>(), 3);
        assert!(h.edges[0] < 2.0 && *h.edges.last().unwrap() > 2.0);
    }

    #[test]
    fn histogram_degenerate_inputs() {
        assert!(histogram(&[], 10).counts.is_empty());
        assert!(histogram(&[1.0], 0).counts.is_empty());
    }
}
