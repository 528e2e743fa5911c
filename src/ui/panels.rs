use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::state::{AppState, ChartKind, Combine, PatternFilter};

// ---------------------------------------------------------------------------
// Left side panel – annotation and chart controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Annotate");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No table loaded.");
        load_options(ui, state, &[]);
        return;
    };
    let columns = table.columns().to_vec();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            load_options(ui, state, &columns);
            ui.separator();
            filter_stack(ui, state, &columns);
            ui.separator();
            split_tool(ui, state, &columns);
            ui.separator();
            chart_controls(ui, state, &columns);
        });
}

/// Trim-on-load options. Shown even before the first load so the choice is
/// explicit rather than inherited from whichever script ran last.
fn load_options(ui: &mut Ui, state: &mut AppState, columns: &[String]) {
    ui.strong("Loading");
    ui.checkbox(&mut state.trim_on_load, "Drop rows with missing required field");
    if state.trim_on_load && !columns.is_empty() {
        column_combo(ui, "required_col", "Required", &mut state.required_column, columns);
    }
}

fn filter_stack(ui: &mut Ui, state: &mut AppState, columns: &[String]) {
    ui.strong("Filters");

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Combine:");
        let mut changed = false;
        changed |= ui
            .selectable_value(&mut state.combine, Combine::All, "All")
            .changed();
        changed |= ui
            .selectable_value(&mut state.combine, Combine::Any, "Any")
            .changed();
        if changed {
            state.refilter();
        }
    });

    let mut remove: Option<usize> = None;
    let mut save: Option<usize> = None;
    let mut changed = false;

    for (i, f) in state.filters.iter_mut().enumerate() {
        egui::CollapsingHeader::new(RichText::new(format!("{} ~ {}", f.column, f.pattern_text)).strong())
            .id_salt(("filter", i))
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                changed |= combo_in_place(ui, ("filter_col", i), "Column", &mut f.column, columns);

                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Pattern:");
                    changed |= ui.text_edit_singleline(&mut f.pattern_text).changed();
                });
                ui.horizontal(|ui: &mut Ui| {
                    changed |= ui.checkbox(&mut f.use_regex, "Regex").changed();
                    changed |= ui.checkbox(&mut f.enabled, "Enabled").changed();
                });
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Save as:");
                    ui.text_edit_singleline(&mut f.save_name);
                    if ui.small_button("Add column").clicked() {
                        save = Some(i);
                    }
                });
                if ui.small_button("Remove").clicked() {
                    remove = Some(i);
                }
            });
    }

    if ui.button("Add filter").clicked() {
        let column = columns.first().cloned().unwrap_or_default();
        state.filters.push(PatternFilter::new(&column));
    }

    if let Some(i) = remove {
        state.filters.remove(i);
        changed = true;
    }
    if let Some(i) = save {
        state.save_mask_column(i);
    }
    if changed {
        state.refilter();
    }
}

fn split_tool(ui: &mut Ui, state: &mut AppState, columns: &[String]) {
    ui.strong("Split");

    column_combo(ui, "split_col", "Column", &mut state.split.column, columns);
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Delimiter:");
        ui.text_edit_singleline(&mut state.split.delimiter);
    });
    ui.checkbox(&mut state.split.use_regex, "Regex");
    ui.checkbox(&mut state.split.expand, "Expand into position columns");
    if !state.split.expand {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("New column:");
            ui.text_edit_singleline(&mut state.split.new_column);
        });
    }
    if ui.button("Apply split").clicked() {
        state.apply_split();
    }
}

fn chart_controls(ui: &mut Ui, state: &mut AppState, columns: &[String]) {
    ui.strong("Chart");

    let kinds = [
        (ChartKind::Table, "Table"),
        (ChartKind::Histogram, "Histogram"),
        (ChartKind::Scatter, "Scatter"),
        (ChartKind::FacetGrid, "Facet grid"),
        (ChartKind::ColorScatter, "Color scatter"),
    ];
    egui::ComboBox::from_id_salt("chart_kind")
        .selected_text(kinds.iter().find(|(k, _)| *k == state.chart).map(|(_, n)| *n).unwrap_or(""))
        .show_ui(ui, |ui: &mut Ui| {
            for (kind, name) in kinds {
                ui.selectable_value(&mut state.chart, kind, name);
            }
        });

    match state.chart {
        ChartKind::Table => {}
        ChartKind::Histogram => {
            column_combo(ui, "hist_x", "Values", &mut state.x_column, columns);
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Bins:");
                ui.add(DragValue::new(&mut state.config.bins).range(1..=200));
            });
        }
        ChartKind::Scatter => {
            column_combo(ui, "scatter_x", "X", &mut state.x_column, columns);
            column_combo(ui, "scatter_y", "Y", &mut state.y_column, columns);
        }
        ChartKind::FacetGrid => {
            column_combo(ui, "facet_x", "X", &mut state.x_column, columns);
            column_combo(ui, "facet_y", "Y", &mut state.y_column, columns);
            column_combo(ui, "facet_by", "Facet by", &mut state.facet_column, columns);
        }
        ChartKind::ColorScatter => {
            column_combo(ui, "color_x", "X", &mut state.x_column, columns);
            column_combo(ui, "color_y", "Y", &mut state.y_column, columns);
            let mut color_col = state.color_column.clone();
            if column_combo(ui, "color_by", "Color by", &mut color_col, columns) {
                state.set_color_column(color_col);
            }
        }
    }
}

/// Column picker writing straight into `current`. Returns true on change.
fn column_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    current: &mut String,
    columns: &[String],
) -> bool {
    combo_in_place(ui, (id, 0), label, current, columns)
}

fn combo_in_place(
    ui: &mut Ui,
    id: (&str, usize),
    label: &str,
    current: &mut String,
    columns: &[String],
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{label}:"));
        egui::ComboBox::from_id_salt(id)
            .selected_text(current.clone())
            .show_ui(ui, |ui: &mut Ui| {
                for col in columns {
                    if ui.selectable_label(current == col, col).clicked() {
                        *current = col.clone();
                        changed = true;
                    }
                }
            });
    });
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows loaded, {} matching",
                table.len(),
                state.visible_rows()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open delimited text data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        let result = if state.trim_on_load && !state.required_column.is_empty() {
            loader::load_trimmed(&path, &[state.required_column.as_str()])
        } else {
            loader::load(&path)
        };
        match result {
            Ok(table) => {
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
                state.loading = false;
            }
        }
    }
}
