//! Declarative chart specifications.
//!
//! A [`ChartSpec`] is everything a renderer needs to draw one chart: the
//! aggregated series, category order, colours, title and axis labels. It
//! holds no reference to the dataset it was built from.
//!
//! ```text
//!   LoanDataset + indices
//!          │  aggregate
//!          ▼
//!   series / bins / box stats
//!          │  build (title, LabelMap, colours)
//!          ▼
//!      ChartSpec ──► ui::plot (egui_plot)
//!                └─► serde_json (clipboard export)
//! ```

pub mod build;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::{ChartColor, ColorMap};
use crate::data::aggregate::{BoxGroup, CategoryValue, DatePoint, Histogram};

// ---------------------------------------------------------------------------
// Label overrides
// ---------------------------------------------------------------------------

/// Source column name → axis / legend title.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelMap(BTreeMap<String, String>);

impl LabelMap {
    pub fn new<const N: usize>(pairs: [(&str, &str); N]) -> Self {
        LabelMap(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// The display label for `key`, or `key` itself when not overridden.
    pub fn label(&self, key: &str) -> String {
        self.0.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Histogram,
    Box,
}

/// Which numbers a pie slice shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextInfo {
    Percent,
    Value,
    PercentAndValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<DatePoint>,
    pub color: ChartColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the whole, in `0.0..=1.0`.
    pub fraction: f64,
    pub color: ChartColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Line {
        series: Vec<LineSeries>,
        markers: bool,
    },
    Bar {
        bars: Vec<CategoryValue>,
        color: ChartColor,
    },
    Pie {
        slices: Vec<PieSlice>,
        /// Inner radius as a fraction of the outer one; `0.0` is a full pie.
        hole: f64,
        text_info: TextInfo,
    },
    Histogram {
        histogram: Histogram,
        colors: ColorMap,
        /// Groups stack on top of each other instead of overlapping.
        stacked: bool,
    },
    Box {
        groups: Vec<BoxGroup>,
        colors: ColorMap,
    },
}

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Stable identifier, also used as the egui plot id.
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Title of the colour legend, when the chart has one.
    pub legend_title: Option<String>,
    pub show_legend: bool,
    /// Explicit category-axis order (bar, box and pie charts).
    pub category_order: Vec<String>,
    /// Styling template name; only a hint for renderers.
    pub template: String,
    pub data: ChartData,
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self.data {
            ChartData::Line { .. } => ChartKind::Line,
            ChartData::Bar { .. } => ChartKind::Bar,
            ChartData::Pie { .. } => ChartKind::Pie,
            ChartData::Histogram { .. } => ChartKind::Histogram,
            ChartData::Box { .. } => ChartKind::Box,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl PieSlice {
    /// Slice caption for the given text mode, e.g. `"2\n66.7%"`.
    pub fn text(&self, info: TextInfo) -> String {
        let percent = format!("{:.1}%", self.fraction * 100.0);
        let value = crate::format::format_number(self.value, 0);
        match info {
            TextInfo::Percent => percent,
            TextInfo::Value => value,
            TextInfo::PercentAndValue => format!("{value}\n{percent}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_map_falls_back_to_key() {
        let labels = LabelMap::new([("value", "Number of Loans")]);
        assert_eq!(labels.label("value"), "Number of Loans");
        assert_eq!(labels.label("issue_date"), "issue_date");
    }

    #[test]
    fn pie_slice_text() {
        let slice = PieSlice {
            label: "Good Loan".into(),
            value: 2000.0,
            fraction: 2.0 / 3.0,
            color: crate::color::seaborn(0),
        };
        assert_eq!(slice.text(TextInfo::PercentAndValue), "2,000\n66.7%");
        assert_eq!(slice.text(TextInfo::Percent), "66.7%");
    }
}
