use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, HLine, Legend, LineStyle, Plot, PlotPoints, Points, VLine};

use crate::data::error::Result;
use crate::data::model::{Cell, Table};
use crate::data::stats;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Central panel – annotated table and charts
// ---------------------------------------------------------------------------

/// Render the central panel for the current chart kind.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a delimited text file to begin  (File → Open…)");
        });
        return;
    };

    let rendered = match state.chart {
        ChartKind::Table => {
            table_grid(ui, state, table);
            Ok(())
        }
        ChartKind::Histogram => histogram_chart(ui, state, table),
        ChartKind::Scatter => scatter_chart(ui, state, table),
        ChartKind::FacetGrid => facet_grid(ui, state, table),
        ChartKind::ColorScatter => color_scatter(ui, state, table),
    };

    if let Err(e) = rendered {
        ui.label(RichText::new(format!("Cannot draw chart: {e}")).color(Color32::RED));
    }
}

// ---------------------------------------------------------------------------
// Table grid
// ---------------------------------------------------------------------------

fn table_grid(ui: &mut Ui, state: &AppState, table: &Table) {
    use egui_extras::{Column, TableBuilder};

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true).at_least(60.0), table.columns().len())
        .header(20.0, |mut header| {
            for name in table.columns() {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for (row, &keep) in table.rows().iter().zip(&state.visible_mask) {
                if !keep {
                    continue;
                }
                body.row(18.0, |mut table_row| {
                    for cell in row {
                        table_row.col(|ui| {
                            match cell {
                                Cell::Null => {
                                    ui.label(RichText::new("<null>").weak());
                                }
                                other => {
                                    ui.label(other.to_string());
                                }
                            };
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn histogram_chart(ui: &mut Ui, state: &AppState, table: &Table) -> Result<()> {
    let values = masked_values(table, &state.visible_mask, &state.x_column)?;
    let hist = stats::histogram(&values, state.config.bins);

    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(hist.bin_center(i), count as f64).width(hist.bin_width())
        })
        .collect();

    Plot::new("histogram")
        .x_axis_label(state.x_column.as_str())
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(&state.x_column)
                    .color(Color32::LIGHT_BLUE),
            );
        });
    Ok(())
}

fn scatter_chart(ui: &mut Ui, state: &AppState, table: &Table) -> Result<()> {
    let xs = masked_values(table, &state.visible_mask, &state.x_column)?;
    let ys = masked_values(table, &state.visible_mask, &state.y_column)?;
    let median_x = stats::median(&xs);
    let median_y = stats::median(&ys);
    let points = finite_pairs(&xs, &ys);

    Plot::new("scatter")
        .x_axis_label(state.x_column.as_str())
        .y_axis_label(state.y_column.as_str())
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(state.config.point_radius)
                    .color(Color32::LIGHT_BLUE),
            );
            // Median cross-hairs over the pooled data.
            if let Some(m) = median_y {
                plot_ui.hline(
                    HLine::new(m)
                        .color(Color32::RED)
                        .style(LineStyle::dashed_loose())
                        .width(state.config.line_width),
                );
            }
            if let Some(m) = median_x {
                plot_ui.vline(
                    VLine::new(m)
                        .color(Color32::RED)
                        .style(LineStyle::dashed_loose())
                        .width(state.config.line_width),
                );
            }
        });
    Ok(())
}

/// One scatter panel per unique value of the facet column, two per row,
/// all sharing the pooled axis ranges so the panels compare directly.
fn facet_grid(ui: &mut Ui, state: &AppState, table: &Table) -> Result<()> {
    let xs = masked_values(table, &state.visible_mask, &state.x_column)?;
    let ys = masked_values(table, &state.visible_mask, &state.y_column)?;
    let facet_idx = table.column_index(&state.facet_column)?;
    let facets: Vec<String> = table
        .unique_values(&state.facet_column)?
        .into_iter()
        .collect();

    if facets.is_empty() {
        ui.label("No values to facet on.");
        return Ok(());
    }

    let (x_range, y_range) = (finite_range(&xs), finite_range(&ys));
    let n_rows = facets.len().div_ceil(2);
    let panel_height = (ui.available_height() / n_rows as f32 - 24.0).max(120.0);

    for chunk in facets.chunks(2) {
        ui.columns(chunk.len(), |columns| {
            for (ui, facet) in columns.iter_mut().zip(chunk) {
                ui.label(RichText::new(facet).strong());

                let points: Vec<[f64; 2]> = table
                    .rows()
                    .iter()
                    .zip(&state.visible_mask)
                    .zip(xs.iter().zip(&ys))
                    .filter(|((row, &keep), _)| {
                        keep && row[facet_idx].as_str() == Some(facet.as_str())
                    })
                    .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
                    .map(|(_, (&x, &y))| [x, y])
                    .collect();

                let mut plot = Plot::new(("facet", facet.clone()))
                    .height(panel_height)
                    .x_axis_label(state.x_column.as_str())
                    .y_axis_label(state.y_column.as_str());
                if let Some((lo, hi)) = x_range {
                    plot = plot.include_x(lo).include_x(hi);
                }
                if let Some((lo, hi)) = y_range {
                    plot = plot.include_y(lo).include_y(hi);
                }
                plot.show(ui, |plot_ui| {
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .radius(state.config.point_radius)
                            .color(Color32::LIGHT_BLUE),
                    );
                });
            }
        });
    }
    Ok(())
}

/// Scatter with point colour keyed on a third column through the colour map.
fn color_scatter(ui: &mut Ui, state: &AppState, table: &Table) -> Result<()> {
    let xs = masked_values(table, &state.visible_mask, &state.x_column)?;
    let ys = masked_values(table, &state.visible_mask, &state.y_column)?;
    let color_idx = table.column_index(&state.color_column)?;

    // Group points per category so the legend lists each value once.
    let categories: Vec<String> = table
        .unique_values(&state.color_column)?
        .into_iter()
        .collect();

    Plot::new("color_scatter")
        .legend(Legend::default())
        .x_axis_label(state.x_column.as_str())
        .y_axis_label(state.y_column.as_str())
        .show(ui, |plot_ui| {
            for category in &categories {
                let points: Vec<[f64; 2]> = table
                    .rows()
                    .iter()
                    .zip(&state.visible_mask)
                    .zip(xs.iter().zip(&ys))
                    .filter(|((row, &keep), _)| {
                        keep && row[color_idx].as_str() == Some(category.as_str())
                    })
                    .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
                    .map(|(_, (&x, &y))| [x, y])
                    .collect();

                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(Color32::GRAY);

                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category)
                        .radius(state.config.point_radius)
                        .color(color),
                );
            }
        });
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Numeric values of a column with unselected rows blanked to NaN, so the
/// result stays row-aligned with the table.
fn masked_values(table: &Table, mask: &[bool], column: &str) -> Result<Vec<f64>> {
    let mut values = stats::numeric_column(table, column)?;
    for (v, &keep) in values.iter_mut().zip(mask) {
        if !keep {
            *v = f64::NAN;
        }
    }
    Ok(values)
}

fn finite_pairs(xs: &[f64], ys: &[f64]) -> Vec<[f64; 2]> {
    xs.iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| [x, y])
        .collect()
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    (lo <= hi).then_some((lo, hi))
}
