use serde::Serialize;

use crate::charts::{build, ChartSpec};
use crate::data::aggregate::summarize;
use crate::data::filter::{filter_by_condition, ConditionSelector};
use crate::data::model::LoanDataset;
use crate::error::DashboardError;
use crate::format::MetricFormat;

// ---------------------------------------------------------------------------
// Metric tiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: f64,
    pub format: MetricFormat,
    pub help: Option<&'static str>,
}

impl MetricTile {
    pub fn display(&self) -> String {
        self.format.format(self.value)
    }
}

/// The four top-line tiles. Always computed over the whole dataset,
/// whatever the condition selector says.
pub fn metric_tiles(dataset: &LoanDataset) -> Result<Vec<MetricTile>, DashboardError> {
    let m = summarize(dataset.records())?;
    Ok(vec![
        MetricTile {
            label: "Total Loans",
            value: m.total_loans as f64,
            format: MetricFormat::Count,
            help: Some("Total Number of Loans"),
        },
        MetricTile {
            label: "Total Loan Amount",
            value: m.total_amount,
            format: MetricFormat::Currency { decimals: 0 },
            help: None,
        },
        MetricTile {
            label: "Average Interest Rate",
            value: m.mean_interest_rate,
            format: MetricFormat::Number { decimals: 2 },
            help: None,
        },
        MetricTile {
            label: "Average Loan Amount",
            value: m.mean_loan_amount,
            format: MetricFormat::Currency { decimals: 2 },
            help: None,
        },
    ])
}

// ---------------------------------------------------------------------------
// Rendered view
// ---------------------------------------------------------------------------

/// A chart, or the reason it has nothing to show.
pub type ChartSlot = Result<ChartSpec, DashboardError>;

/// Everything one render pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub selector: ConditionSelector,
    pub metrics: Result<Vec<MetricTile>, DashboardError>,
    pub loans_over_time: ChartSlot,
    pub amount_over_time: ChartSlot,
    pub loans_by_weekday: ChartSlot,
    pub loans_by_condition: ChartSlot,
    pub loans_by_grade: ChartSlot,
    /// Rows matching `selector`.
    pub filtered_rows: usize,
    pub amount_histogram: ChartSlot,
    pub amount_by_purpose: ChartSlot,
}

impl DashboardView {
    /// All charts in page order.
    pub fn charts(&self) -> [&ChartSlot; 7] {
        [
            &self.loans_over_time,
            &self.amount_over_time,
            &self.loans_by_weekday,
            &self.loans_by_condition,
            &self.loans_by_grade,
            &self.amount_histogram,
            &self.amount_by_purpose,
        ]
    }
}

/// Recompute the whole dashboard from the dataset and the selector.
///
/// Pure: no state is kept between calls, nothing in `dataset` changes.
pub fn render(dataset: &LoanDataset, selector: ConditionSelector) -> DashboardView {
    let rows = filter_by_condition(dataset, selector);
    log::debug!(
        "Rendering dashboard: {} loans, {} '{}' loans",
        dataset.len(),
        rows.len(),
        selector
    );

    DashboardView {
        selector,
        metrics: metric_tiles(dataset),
        loans_over_time: build::loans_over_time(dataset.records()),
        amount_over_time: build::amount_over_time(dataset.records()),
        loans_by_weekday: build::loans_by_weekday(dataset.records()),
        loans_by_condition: build::loans_by_condition(dataset.records()),
        loans_by_grade: build::loans_by_grade(dataset.records()),
        filtered_rows: rows.len(),
        amount_histogram: build::amount_histogram(dataset.rows(&rows), &dataset.terms),
        amount_by_purpose: build::amount_by_purpose(dataset.rows(&rows), &dataset.terms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartData;
    use crate::data::model::{LoanCondition, LoanRecord};
    use chrono::NaiveDate;

    fn dataset() -> LoanDataset {
        let d1 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        LoanDataset::from_records(vec![
            LoanRecord::new("1", d1, 100.0, 10.0, LoanCondition::Good, "B", "36 months", "car"),
            LoanRecord::new("2", d1, 200.0, 12.0, LoanCondition::Good, "A", "60 months", "credit_card"),
            LoanRecord::new("3", d2, 50.0, 14.0, LoanCondition::Good, "B", "36 months", "car"),
        ])
        .unwrap()
    }

    #[test]
    fn worked_example_tiles() {
        let tiles = metric_tiles(&dataset()).unwrap();
        let shown: Vec<String> = tiles.iter().map(MetricTile::display).collect();
        assert_eq!(shown, ["3", "$350", "12.00", "$116.67"]);
        assert_eq!(tiles[0].help, Some("Total Number of Loans"));
    }

    #[test]
    fn metrics_ignore_the_selector() {
        let ds = dataset();
        let good = render(&ds, ConditionSelector::from(LoanCondition::Good));
        let bad = render(&ds, ConditionSelector::from(LoanCondition::Bad));
        assert_eq!(good.metrics, bad.metrics);
        assert_eq!(good.loans_by_grade, bad.loans_by_grade);
    }

    #[test]
    fn filtered_charts_follow_the_selector() {
        let ds = dataset();
        let good = render(&ds, ConditionSelector::from(LoanCondition::Good));
        assert_eq!(good.filtered_rows, 3);
        match &good.amount_histogram {
            Ok(spec) => match &spec.data {
                ChartData::Histogram { histogram, .. } => assert_eq!(histogram.total(), 3),
                other => panic!("unexpected data {other:?}"),
            },
            Err(e) => panic!("unexpected error {e}"),
        }

        // No bad loans in this dataset: the filtered charts degrade.
        let bad = render(&ds, ConditionSelector::from(LoanCondition::Bad));
        assert_eq!(bad.filtered_rows, 0);
        assert_eq!(bad.amount_histogram, Err(DashboardError::NoData));
        assert_eq!(bad.amount_by_purpose, Err(DashboardError::NoData));
        assert!(bad.metrics.is_ok());
    }

    #[test]
    fn empty_dataset_renders_no_data_everywhere() {
        let view = render(&LoanDataset::default(), ConditionSelector::default());
        assert_eq!(view.metrics, Err(DashboardError::NoData));
        assert!(view.charts().iter().all(|c| **c == Err(DashboardError::NoData)));
    }

    #[test]
    fn render_is_repeatable() {
        let ds = dataset();
        let sel = ConditionSelector::default();
        assert_eq!(render(&ds, sel), render(&ds, sel));
    }
}
