use crate::color::ColorMap;
use crate::config::PresentationConfig;
use crate::data::filter::{self, Mask, Pattern};
use crate::data::model::Table;
use crate::data::split::{split_column, SplitMode};

// ---------------------------------------------------------------------------
// Side-panel widgets' backing state
// ---------------------------------------------------------------------------

/// One pattern predicate configured in the side panel.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    pub column: String,
    pub pattern_text: String,
    pub use_regex: bool,
    pub enabled: bool,
    /// Column name used when the mask is saved onto the table.
    pub save_name: String,
}

impl PatternFilter {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            pattern_text: String::new(),
            use_regex: true,
            enabled: true,
            save_name: String::new(),
        }
    }

    pub fn pattern(&self) -> Pattern {
        if self.use_regex {
            Pattern::regex(self.pattern_text.clone())
        } else {
            Pattern::literal(self.pattern_text.clone())
        }
    }

    fn is_active(&self) -> bool {
        self.enabled && !self.column.is_empty() && !self.pattern_text.is_empty()
    }
}

/// How the filter stack's masks combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    All,
    Any,
}

/// Which view the central panel renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Table,
    Histogram,
    Scatter,
    FacetGrid,
    ColorScatter,
}

/// Split-tool inputs.
#[derive(Debug, Clone)]
pub struct SplitTool {
    pub column: String,
    pub delimiter: String,
    pub use_regex: bool,
    pub new_column: String,
    pub expand: bool,
}

impl Default for SplitTool {
    fn default() -> Self {
        Self {
            column: String::new(),
            delimiter: String::new(),
            use_regex: true,
            new_column: "Split".to_string(),
            expand: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Working (annotated) table. None until a file is loaded.
    pub table: Option<Table>,

    /// Drop rows missing `required_column` when loading.
    pub trim_on_load: bool,
    pub required_column: String,

    /// Pattern predicate stack and how its masks combine.
    pub filters: Vec<PatternFilter>,
    pub combine: Combine,

    /// Cached row mask from the current filter stack.
    pub visible_mask: Mask,

    /// Central panel contents and its column choices.
    pub chart: ChartKind,
    pub x_column: String,
    pub y_column: String,
    pub facet_column: String,
    pub color_column: String,

    /// Active colour map for the colour-coded scatter.
    pub color_map: Option<ColorMap>,

    /// Split tool inputs.
    pub split: SplitTool,

    /// Presentation defaults (bins, point radius, …).
    pub config: PresentationConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(config: PresentationConfig) -> Self {
        Self {
            table: None,
            trim_on_load: false,
            required_column: String::new(),
            filters: Vec::new(),
            combine: Combine::All,
            visible_mask: Mask::new(),
            chart: ChartKind::Table,
            x_column: String::new(),
            y_column: String::new(),
            facet_column: String::new(),
            color_column: String::new(),
            color_map: None,
            split: SplitTool::default(),
            config,
            status_message: None,
            loading: false,
        }
    }

    /// Ingest a loaded or newly annotated table; keep column choices that
    /// still exist, default the rest, and recompute the mask.
    pub fn set_table(&mut self, table: Table) {
        let columns = table.columns().to_vec();
        let pick = |current: &str, default_idx: usize| -> String {
            if columns.iter().any(|c| c == current) {
                current.to_string()
            } else {
                columns.get(default_idx).cloned().unwrap_or_default()
            }
        };
        let last = columns.len().saturating_sub(1);
        self.x_column = pick(&self.x_column, 0);
        self.y_column = pick(&self.y_column, 1.min(last));
        self.facet_column = pick(&self.facet_column, last);
        self.color_column = pick(&self.color_column, last);
        self.required_column = pick(&self.required_column, 0);
        if !columns.iter().any(|c| *c == self.split.column) {
            self.split.column = columns.first().cloned().unwrap_or_default();
        }
        for f in &mut self.filters {
            if !columns.iter().any(|c| *c == f.column) {
                f.column.clear();
            }
        }

        self.visible_mask = vec![true; table.len()];
        self.table = Some(table);
        self.rebuild_color_map();
        self.refilter();
        self.loading = false;
    }

    /// Rebuild the colour map from the current `color_column`.
    pub fn rebuild_color_map(&mut self) {
        self.color_map = match &self.table {
            Some(table) if !self.color_column.is_empty() => table
                .unique_values(&self.color_column)
                .ok()
                .map(|vals| ColorMap::new(&self.color_column, &vals)),
            _ => None,
        };
    }

    /// Set colour column and rebuild the map.
    pub fn set_color_column(&mut self, column: String) {
        self.color_column = column;
        self.rebuild_color_map();
    }

    /// Recompute `visible_mask` from the filter stack. A bad pattern is
    /// reported in the status line and the previous mask stays in place
    /// rather than applying a partial result.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            self.visible_mask.clear();
            return;
        };

        let active: Vec<&PatternFilter> =
            self.filters.iter().filter(|f| f.is_active()).collect();

        let mut mask = match self.combine {
            Combine::Any if !active.is_empty() => vec![false; table.len()],
            _ => vec![true; table.len()],
        };

        for f in &active {
            match filter::filter_mask(table, &f.column, &f.pattern()) {
                Ok(m) => {
                    mask = match self.combine {
                        Combine::All => filter::mask_and(&mask, &m),
                        Combine::Any => filter::mask_or(&mask, &m),
                    };
                }
                Err(e) => {
                    self.status_message = Some(format!("Filter error: {e}"));
                    return;
                }
            }
        }

        self.visible_mask = mask;
        self.status_message = None;
    }

    /// Number of rows passing the current filters.
    pub fn visible_rows(&self) -> usize {
        self.visible_mask.iter().filter(|&&b| b).count()
    }

    /// Save one filter's mask as a boolean column on the working table.
    pub fn save_mask_column(&mut self, index: usize) {
        let Some(table) = &self.table else { return };
        let Some(f) = self.filters.get(index) else { return };
        if !f.is_active() {
            return;
        }

        let name = if f.save_name.is_empty() {
            format!("match_{index}")
        } else {
            f.save_name.clone()
        };

        match filter::filter_mask(table, &f.column, &f.pattern()) {
            Ok(mask) => {
                let annotated = filter::append_mask(table, &name, &mask);
                log::info!("Saved mask column {name:?}");
                self.set_table(annotated);
            }
            Err(e) => self.status_message = Some(format!("Filter error: {e}")),
        }
    }

    /// Run the split tool. `AsList` annotates the working table with a new
    /// token column; `Expand` replaces it with the position-indexed table.
    pub fn apply_split(&mut self) {
        let Some(table) = &self.table else { return };

        let delimiter = if self.split.use_regex {
            Pattern::regex(self.split.delimiter.clone())
        } else {
            Pattern::literal(self.split.delimiter.clone())
        };
        let mode = if self.split.expand {
            SplitMode::Expand
        } else {
            SplitMode::AsList(self.split.new_column.clone())
        };

        match split_column(table, &self.split.column, &delimiter, mode) {
            Ok(out) => {
                log::info!(
                    "Split {:?} on {:?} ({} columns now)",
                    self.split.column,
                    self.split.delimiter,
                    out.columns().len()
                );
                self.set_table(out);
            }
            Err(e) => self.status_message = Some(format!("Split error: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    fn cell(s: &str) -> Cell {
        Cell::Str(s.to_string())
    }

    fn schedule() -> Table {
        Table::from_rows(
            vec!["Number".into(), "Time".into()],
            vec![
                vec![cell("150"), cell("9:00AM - 10:15AM")],
                vec![cell("2200"), cell("1:00PM")],
                vec![cell("3305"), cell("11:00AM")],
            ],
        )
        .unwrap()
    }

    fn state_with_table() -> AppState {
        let mut state = AppState::new(PresentationConfig::default());
        state.set_table(schedule());
        state
    }

    #[test]
    fn set_table_defaults_columns_and_mask() {
        let state = state_with_table();
        assert_eq!(state.x_column, "Number");
        assert_eq!(state.y_column, "Time");
        assert_eq!(state.visible_mask, vec![true, true, true]);
        assert_eq!(state.visible_rows(), 3);
    }

    #[test]
    fn refilter_all_vs_any() {
        let mut state = state_with_table();

        let mut am = PatternFilter::new("Time");
        am.pattern_text = "AM".into();
        let mut pm = PatternFilter::new("Time");
        pm.pattern_text = "PM".into();
        state.filters = vec![am, pm];

        state.combine = Combine::All;
        state.refilter();
        assert_eq!(state.visible_mask, vec![true, false, false]);

        state.combine = Combine::Any;
        state.refilter();
        assert_eq!(state.visible_mask, vec![true, true, true]);
    }

    #[test]
    fn bad_pattern_keeps_previous_mask() {
        let mut state = state_with_table();
        let mut f = PatternFilter::new("Time");
        f.pattern_text = "(unclosed".into();
        state.filters = vec![f];

        state.refilter();
        assert!(state.status_message.is_some());
        assert_eq!(state.visible_mask, vec![true, true, true]);
    }

    #[test]
    fn save_mask_column_annotates_table() {
        let mut state = state_with_table();
        let mut f = PatternFilter::new("Time");
        f.pattern_text = "AM.*PM".into();
        f.save_name = "has_AMPM".into();
        state.filters = vec![f];

        state.save_mask_column(0);
        let table = state.table.as_ref().unwrap();
        assert_eq!(table.columns().last().unwrap(), "has_AMPM");
        assert_eq!(table.rows()[0][2], Cell::Bool(true));
        assert_eq!(table.rows()[1][2], Cell::Bool(false));
    }

    #[test]
    fn apply_split_as_list_annotates_table() {
        let mut state = state_with_table();
        state.split.column = "Time".into();
        state.split.delimiter = ":| - | ".into();
        state.split.new_column = "Split".into();

        state.apply_split();
        let table = state.table.as_ref().unwrap();
        assert_eq!(table.columns().last().unwrap(), "Split");
    }

    #[test]
    fn apply_split_expand_replaces_table() {
        let mut state = state_with_table();
        state.split.column = "Time".into();
        state.split.delimiter = ":| - | ".into();
        state.split.expand = true;

        state.apply_split();
        let table = state.table.as_ref().unwrap();
        assert_eq!(table.columns().first().unwrap(), "0");
        assert_eq!(table.len(), 3);
    }
}
