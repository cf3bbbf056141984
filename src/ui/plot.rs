use std::f64::consts::TAU;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::charts::{ChartData, ChartSpec, LineSeries, PieSlice, TextInfo};
use crate::color::{ChartColor, ColorMap};
use crate::dashboard::ChartSlot;
use crate::data::aggregate::{BoxGroup, CategoryValue, Histogram};
use crate::error::DashboardError;

const PLOT_HEIGHT: f32 = 340.0;

fn to_color32(c: &ChartColor) -> Color32 {
    Color32::from_rgb(c.rgb[0], c.rgb[1], c.rgb[2])
}

// ---------------------------------------------------------------------------
// Chart slot (central panel)
// ---------------------------------------------------------------------------

/// Render one chart, or a "No data" placeholder.
pub fn chart(ui: &mut Ui, slot: &ChartSlot) {
    let spec = match slot {
        Ok(spec) => spec,
        Err(DashboardError::NoData) => {
            no_data(ui);
            return;
        }
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(&spec.title);
        if ui.small_button("Copy JSON").on_hover_text("Copy the chart specification").clicked() {
            match spec.to_json() {
                Ok(json) => ui.ctx().copy_text(json),
                Err(e) => log::error!("Failed to serialize {:?} chart '{}': {e}", spec.kind(), spec.id),
            }
        }
    });

    match &spec.data {
        ChartData::Line { series, markers } => line_plot(ui, spec, series, *markers),
        ChartData::Bar { bars, color } => bar_plot(ui, spec, bars, color),
        ChartData::Pie { slices, hole, text_info } => pie_plot(ui, spec, slices, *hole, *text_info),
        ChartData::Histogram { histogram, colors, stacked } => {
            histogram_plot(ui, spec, histogram, colors, *stacked)
        }
        ChartData::Box { groups, colors } => box_plot(ui, spec, groups, colors),
    }
}

fn no_data(ui: &mut Ui) {
    ui.allocate_ui(egui::vec2(ui.available_width(), PLOT_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data");
        });
    });
}

fn base_plot(spec: &ChartSpec) -> Plot {
    let mut plot = Plot::new(spec.id.clone())
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .allow_scroll(false);
    if spec.show_legend {
        let legend = Legend::default();
        plot = plot.legend(legend);
    }
    plot
}

/// Axis formatter showing `labels[i]` at integer positions.
fn category_formatter(labels: Vec<String>) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let v = mark.value;
        if (v - v.round()).abs() > 1e-6 || v < 0.0 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

fn date_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn line_plot(ui: &mut Ui, spec: &ChartSpec, series: &[LineSeries], markers: bool) {
    base_plot(spec)
        .x_axis_formatter(|mark, _range| {
            NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for s in series {
                let color = to_color32(&s.color);
                let pts: Vec<[f64; 2]> = s.points.iter().map(|p| [date_x(p.date), p.value]).collect();
                plot_ui.line(Line::new(PlotPoints::from(pts.clone())).name(&s.name).color(color).width(1.5));
                if markers {
                    plot_ui.points(Points::new(PlotPoints::from(pts)).name(&s.name).color(color).radius(2.5));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Bar
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, spec: &ChartSpec, bars: &[CategoryValue], color: &ChartColor) {
    let color = to_color32(color);
    let chart_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, b)| Bar::new(i as f64, b.value).name(&b.label).fill(color).width(0.8))
        .collect();

    base_plot(spec)
        .x_axis_formatter(category_formatter(spec.category_order.clone()))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart_bars).color(color));
        });
}

// ---------------------------------------------------------------------------
// Pie / donut
// ---------------------------------------------------------------------------

/// Arc segments per full turn; each segment is drawn as a convex quad.
const PIE_SEGMENTS: usize = 180;

fn pie_plot(ui: &mut Ui, spec: &ChartSpec, slices: &[PieSlice], hole: f64, text_info: TextInfo) {
    base_plot(spec)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            // Slices start at twelve o'clock and run clockwise.
            let mut start = TAU / 4.0;
            for slice in slices {
                let sweep = slice.fraction * TAU;
                let end = start - sweep;
                let color = to_color32(&slice.color);

                let steps = ((slice.fraction * PIE_SEGMENTS as f64).ceil() as usize).max(1);
                for k in 0..steps {
                    let a0 = start - sweep * k as f64 / steps as f64;
                    let a1 = start - sweep * (k + 1) as f64 / steps as f64;
                    let quad = vec![
                        [hole * a0.cos(), hole * a0.sin()],
                        [a0.cos(), a0.sin()],
                        [a1.cos(), a1.sin()],
                        [hole * a1.cos(), hole * a1.sin()],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(quad))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(0.5, color)),
                    );
                }

                let mid = (start + end) / 2.0;
                let r = (1.0 + hole) / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(r * mid.cos(), r * mid.sin()),
                        RichText::new(slice.text(text_info)).color(Color32::WHITE).strong(),
                    )
                    .name(&slice.label),
                );
                start = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

fn histogram_plot(ui: &mut Ui, spec: &ChartSpec, histogram: &Histogram, colors: &ColorMap, stacked: bool) {
    let edges = &histogram.edges;
    let charts: Vec<BarChart> = histogram
        .groups
        .iter()
        .map(|group| {
            let color = to_color32(&colors.color_for(&group.label));
            let bars: Vec<Bar> = group
                .counts
                .iter()
                .take(histogram.bin_count())
                .enumerate()
                .map(|(i, &n)| {
                    let (lo, hi) = (edges[i], edges[i + 1]);
                    Bar::new((lo + hi) / 2.0, n as f64)
                        .width(hi - lo)
                        .fill(color)
                        .name(format!("{:.0} – {:.0}", lo, hi))
                })
                .collect();
            BarChart::new(bars).name(&group.label).color(color)
        })
        .collect();

    base_plot(spec).show(ui, |plot_ui| {
        let mut drawn: Vec<BarChart> = Vec::with_capacity(charts.len());
        for chart in charts {
            let chart = if stacked {
                let below: Vec<&BarChart> = drawn.iter().collect();
                chart.stack_on(&below)
            } else {
                chart
            };
            drawn.push(chart);
        }
        for chart in drawn {
            plot_ui.bar_chart(chart);
        }
    });
    ui.label(RichText::new(format!("{} loans in {} bins", histogram.total(), histogram.bin_count())).weak());
}

// ---------------------------------------------------------------------------
// Box
// ---------------------------------------------------------------------------

fn box_plot(ui: &mut Ui, spec: &ChartSpec, groups: &[BoxGroup], colors: &ColorMap) {
    let legend = colors.legend_entries();
    let series_count = legend.len().max(1) as f64;
    let slot_width = 0.8 / series_count;

    base_plot(spec)
        .x_axis_formatter(category_formatter(spec.category_order.clone()))
        .show(ui, |plot_ui| {
            for (series_idx, (term, chart_color)) in legend.iter().enumerate() {
                let color = to_color32(chart_color);
                let offset = -0.4 + slot_width * (series_idx as f64 + 0.5);
                let mut outliers: Vec<[f64; 2]> = Vec::new();

                let elems: Vec<BoxElem> = groups
                    .iter()
                    .filter(|g| &g.series == term)
                    .filter_map(|g| {
                        let x = spec.category_order.iter().position(|c| *c == g.category)? as f64 + offset;
                        let s = &g.stats;
                        outliers.extend(s.outliers.iter().map(|&v| [x, v]));
                        Some(
                            BoxElem::new(
                                x,
                                BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                            )
                            .name(format!("{} ({term})", g.category))
                            .box_width(slot_width * 0.8)
                            .whisker_width(slot_width * 0.4)
                            .fill(color.gamma_multiply(0.5))
                            .stroke(Stroke::new(1.5, color)),
                        )
                    })
                    .collect();
                if elems.is_empty() {
                    continue;
                }

                plot_ui.box_plot(BoxPlot::new(elems).name(term).color(color));
                if !outliers.is_empty() {
                    plot_ui.points(Points::new(PlotPoints::from(outliers)).name(term).color(color).radius(2.0));
                }
            }
        });
}
