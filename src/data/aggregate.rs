use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::model::{weekday_name, LoanCondition, LoanRecord, CANONICAL_WEEKDAYS};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Series types
// ---------------------------------------------------------------------------

/// One point of a date-keyed series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One entry of a category-keyed series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

impl CategoryValue {
    fn new(label: impl Into<String>, value: f64) -> Self {
        CategoryValue {
            label: label.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Top-line reductions over the full dataset. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_loans: usize,
    pub total_amount: f64,
    pub mean_interest_rate: f64,
    pub mean_loan_amount: f64,
}

/// Count, sum and means. An empty input has no mean and reports `NoData`.
pub fn summarize<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Result<SummaryMetrics, DashboardError> {
    let mut total_loans = 0usize;
    let mut total_amount = 0.0;
    let mut rate_sum = 0.0;

    for rec in records {
        total_loans += 1;
        total_amount += rec.loan_amount;
        rate_sum += rec.interest_rate;
    }

    if total_loans == 0 {
        return Err(DashboardError::NoData);
    }

    let n = total_loans as f64;
    Ok(SummaryMetrics {
        total_loans,
        total_amount,
        mean_interest_rate: rate_sum / n,
        mean_loan_amount: total_amount / n,
    })
}

// ---------------------------------------------------------------------------
// Group-by reductions
// ---------------------------------------------------------------------------

fn by_date<'a>(
    records: impl IntoIterator<Item = &'a LoanRecord>,
    value: impl Fn(&LoanRecord) -> f64,
) -> Vec<DatePoint> {
    let mut groups: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for rec in records {
        *groups.entry(rec.issue_date).or_default() += value(rec);
    }
    groups
        .into_iter()
        .map(|(date, value)| DatePoint { date, value })
        .collect()
}

/// Number of loans issued per date, ascending by date.
pub fn count_by_date<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Vec<DatePoint> {
    by_date(records, |_| 1.0)
}

/// Total loan amount issued per date, ascending by date.
pub fn sum_by_date<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Vec<DatePoint> {
    by_date(records, |r| r.loan_amount)
}

/// Loans per weekday: always seven entries, Monday first, zero-filled.
pub fn count_by_weekday<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Vec<CategoryValue> {
    let mut counts = [0usize; 7];
    for rec in records {
        counts[rec.issue_weekday.num_days_from_monday() as usize] += 1;
    }
    CANONICAL_WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(day, n)| CategoryValue::new(weekday_name(*day), n as f64))
        .collect()
}

/// Loans per condition present in the input, Good before Bad.
pub fn count_by_condition<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Vec<CategoryValue> {
    let mut counts: BTreeMap<LoanCondition, usize> = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.loan_condition).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(c, n)| CategoryValue::new(c.label(), n as f64))
        .collect()
}

/// Loans per grade, sorted by grade label rather than by count.
pub fn count_by_grade<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Vec<CategoryValue> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.grade.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(g, n)| CategoryValue::new(g, n as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Bin counts of one colour group. `counts[i]` covers `edges[i]..edges[i + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramGroup {
    pub label: String,
    pub counts: Vec<usize>,
}

/// Equal-width bins shared by every group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub groups: Vec<HistogramGroup>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn total(&self) -> usize {
        self.groups.iter().flat_map(|g| g.counts.iter()).sum()
    }
}

/// Bin loan amounts into `bins` equal-width bins over `[min, max]`,
/// one group per term (ascending). The last bin is closed on the right.
pub fn amount_histogram<'a>(
    records: impl IntoIterator<Item = &'a LoanRecord>,
    bins: usize,
) -> Result<Histogram, DashboardError> {
    let bins = bins.max(1);
    let mut by_term: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for rec in records {
        by_term.entry(rec.term.as_str()).or_default().push(rec.loan_amount);
    }

    let (min, max) = by_term
        .values()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if !min.is_finite() {
        return Err(DashboardError::NoData);
    }

    // A single distinct value still gets a visible bar.
    let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let groups = by_term
        .into_iter()
        .map(|(term, values)| {
            let mut counts = vec![0usize; bins];
            for v in values {
                let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
                counts[idx] += 1;
            }
            HistogramGroup {
                label: term.to_string(),
                counts,
            }
        })
        .collect();

    Ok(Histogram { edges, groups })
}

// ---------------------------------------------------------------------------
// Box statistics
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey whiskers (1.5 × IQR).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub mean: f64,
    pub outliers: Vec<f64>,
}

/// Linear-interpolation quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let inside = || sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
    let lower_whisker = inside().fold(f64::INFINITY, f64::min);
    let upper_whisker = inside().fold(f64::NEG_INFINITY, f64::max);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxStats {
        count: sorted.len(),
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
        outliers,
    })
}

/// Loan-amount distribution of one (purpose, term) cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGroup {
    pub category: String,
    pub series: String,
    pub stats: BoxStats,
}

/// Amount statistics per purpose and term, ordered by purpose (first
/// appearance) then term (ascending). Empty cells are omitted.
pub fn amount_by_purpose_and_term<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Vec<BoxGroup> {
    let mut purposes: Vec<&str> = Vec::new();
    let mut cells: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
    for rec in records {
        if !purposes.contains(&rec.purpose.as_str()) {
            purposes.push(&rec.purpose);
        }
        cells
            .entry((rec.term.as_str(), rec.purpose.as_str()))
            .or_default()
            .push(rec.loan_amount);
    }

    let mut groups = Vec::new();
    for ((term, purpose), values) in &cells {
        if let Some(stats) = box_stats(values) {
            groups.push(BoxGroup {
                category: purpose.to_string(),
                series: term.to_string(),
                stats,
            });
        }
    }
    groups.sort_by_key(|g| {
        let rank = purposes.iter().position(|p| *p == g.category).unwrap_or(usize::MAX);
        (rank, g.series.clone())
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LoanDataset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(id: &str, d: NaiveDate, amount: f64, rate: f64, c: LoanCondition, grade: &str, term: &str) -> LoanRecord {
        LoanRecord::new(id, d, amount, rate, c, grade, term, "debt_consolidation")
    }

    fn worked_example() -> LoanDataset {
        LoanDataset::from_records(vec![
            loan("1", date(2020, 1, 1), 100.0, 10.0, LoanCondition::Good, "B", "36 months"),
            loan("2", date(2020, 1, 1), 200.0, 12.0, LoanCondition::Bad, "A", "60 months"),
            loan("3", date(2020, 1, 2), 50.0, 14.0, LoanCondition::Good, "B", "36 months"),
        ])
        .unwrap()
    }

    #[test]
    fn worked_example_series_and_metrics() {
        let ds = worked_example();

        let counts = count_by_date(ds.records());
        assert_eq!(
            counts,
            vec![
                DatePoint { date: date(2020, 1, 1), value: 2.0 },
                DatePoint { date: date(2020, 1, 2), value: 1.0 },
            ]
        );
        let sums = sum_by_date(ds.records());
        assert_eq!(
            sums,
            vec![
                DatePoint { date: date(2020, 1, 1), value: 300.0 },
                DatePoint { date: date(2020, 1, 2), value: 50.0 },
            ]
        );

        let m = summarize(ds.records()).unwrap();
        assert_eq!(m.total_loans, 3);
        assert_eq!(m.total_amount, 350.0);
        assert!((m.mean_loan_amount - 116.666_666).abs() < 1e-3);
        assert!((m.mean_interest_rate - 12.0).abs() < 1e-12);
    }

    #[test]
    fn date_series_sum_to_totals() {
        let ds = worked_example();
        let m = summarize(ds.records()).unwrap();
        let amount: f64 = sum_by_date(ds.records()).iter().map(|p| p.value).sum();
        let count: f64 = count_by_date(ds.records()).iter().map(|p| p.value).sum();
        assert_eq!(amount, m.total_amount);
        assert_eq!(count as usize, m.total_loans);
    }

    #[test]
    fn empty_input_has_no_metrics() {
        assert_eq!(summarize(std::iter::empty()), Err(DashboardError::NoData));
    }

    #[test]
    fn weekday_distribution_is_complete_and_ordered() {
        let ds = worked_example();
        let days = count_by_weekday(ds.records());
        let labels: Vec<&str> = days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
        // 2020-01-01 is a Wednesday, 2020-01-02 a Thursday.
        let values: Vec<f64> = days.iter().map(|d| d.value).collect();
        assert_eq!(values, [0.0, 0.0, 2.0, 1.0, 0.0, 0.0, 0.0]);

        let empty = count_by_weekday(std::iter::empty());
        assert_eq!(empty.len(), 7);
        assert!(empty.iter().all(|d| d.value == 0.0));
    }

    #[test]
    fn grade_distribution_sorted_by_label() {
        let ds = worked_example();
        let grades = count_by_grade(ds.records());
        assert_eq!(grades, vec![CategoryValue::new("A", 1.0), CategoryValue::new("B", 2.0)]);
        let total: f64 = grades.iter().map(|g| g.value).sum();
        assert_eq!(total, 3.0);
    }

    #[test]
    fn condition_distribution() {
        let ds = worked_example();
        assert_eq!(
            count_by_condition(ds.records()),
            vec![CategoryValue::new("Good Loan", 2.0), CategoryValue::new("Bad Loan", 1.0)]
        );
    }

    #[test]
    fn histogram_has_fixed_bins_and_counts_every_loan() {
        let d = date(2020, 1, 1);
        let records: Vec<LoanRecord> = (0..=20)
            .map(|i| {
                let term = if i % 2 == 0 { "60 months" } else { "36 months" };
                loan(&i.to_string(), d, 1000.0 + 100.0 * i as f64, 10.0, LoanCondition::Good, "A", term)
            })
            .collect();
        let h = amount_histogram(&records, 20).unwrap();

        assert_eq!(h.bin_count(), 20);
        assert_eq!(h.edges[0], 1000.0);
        assert_eq!(h.edges[20], 3000.0);
        assert_eq!(h.total(), 21);
        let labels: Vec<&str> = h.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["36 months", "60 months"]);
        // 2900 and the maximum 3000 share the last, right-closed bin.
        assert_eq!(h.groups[0].counts[19], 1);
        assert_eq!(h.groups[1].counts[19], 1);
        assert_eq!(h.groups[1].counts[0], 1);
    }

    #[test]
    fn histogram_of_single_value() {
        let records = vec![loan("1", date(2020, 1, 1), 500.0, 10.0, LoanCondition::Good, "A", "36 months")];
        let h = amount_histogram(&records, 20).unwrap();
        assert_eq!(h.total(), 1);
        assert!(h.edges[0] < 500.0 && h.edges[20] > 500.0);
    }

    #[test]
    fn histogram_of_nothing_is_no_data() {
        assert_eq!(amount_histogram(std::iter::empty(), 20), Err(DashboardError::NoData));
    }

    #[test]
    fn box_stats_quartiles_and_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0];
        let s = box_stats(&values).unwrap();
        assert_eq!(s.count, 9);
        assert_eq!(s.q1, 3.0);
        assert_eq!(s.median, 5.0);
        assert_eq!(s.q3, 7.0);
        assert_eq!(s.lower_whisker, 1.0);
        assert_eq!(s.upper_whisker, 8.0);
        assert_eq!(s.outliers, vec![100.0]);
        assert!(box_stats(&[]).is_none());
    }

    #[test]
    fn box_groups_follow_purpose_appearance() {
        let d = date(2020, 1, 1);
        let records = vec![
            LoanRecord::new("1", d, 100.0, 10.0, LoanCondition::Good, "A", "60 months", "house"),
            LoanRecord::new("2", d, 200.0, 10.0, LoanCondition::Good, "A", "36 months", "car"),
            LoanRecord::new("3", d, 300.0, 10.0, LoanCondition::Good, "A", "36 months", "house"),
        ];
        let groups = amount_by_purpose_and_term(&records);
        let keys: Vec<(&str, &str)> = groups
            .iter()
            .map(|g| (g.series.as_str(), g.category.as_str()))
            .collect();
        assert_eq!(keys, [("36 months", "house"), ("60 months", "house"), ("36 months", "car")]);
    }
}
