use super::{ChartData, ChartSpec, LabelMap, LineSeries, PieSlice, TextInfo};
use crate::color::{seaborn, ColorMap};
use crate::data::aggregate::{
    amount_by_purpose_and_term, amount_histogram as bin_amounts, count_by_condition, count_by_date,
    count_by_grade, count_by_weekday, sum_by_date, CategoryValue, DatePoint,
};
use crate::data::model::LoanRecord;
use crate::error::DashboardError;

pub const TEMPLATE: &str = "seaborn";
pub const HISTOGRAM_BINS: usize = 20;
pub const HISTOGRAM_COLORS: [&str; 2] = ["darkslateblue", "tomato"];
pub const BOX_COLORS: [&str; 3] = ["darkslateblue", "tomato", "lightblue"];
pub const DONUT_HOLE: f64 = 0.4;

// ---------------------------------------------------------------------------
// Generic builders
// ---------------------------------------------------------------------------

/// Single-series line chart over a date axis.
pub fn line_chart(
    id: &str,
    title: &str,
    points: Vec<DatePoint>,
    x_key: &str,
    y_key: &str,
    labels: &LabelMap,
) -> Result<ChartSpec, DashboardError> {
    if points.is_empty() {
        return Err(DashboardError::NoData);
    }
    Ok(ChartSpec {
        id: id.to_string(),
        title: title.to_string(),
        x_label: labels.label(x_key),
        y_label: labels.label(y_key),
        legend_title: None,
        show_legend: false,
        category_order: Vec::new(),
        template: TEMPLATE.to_string(),
        data: ChartData::Line {
            series: vec![LineSeries {
                name: y_key.to_string(),
                points,
                color: seaborn(0),
            }],
            markers: true,
        },
    })
}

/// Single-colour bar chart; bars are drawn in the order given.
pub fn bar_chart(
    id: &str,
    title: &str,
    bars: Vec<CategoryValue>,
    x_key: &str,
    y_key: &str,
    labels: &LabelMap,
) -> Result<ChartSpec, DashboardError> {
    if bars.iter().all(|b| b.value == 0.0) {
        return Err(DashboardError::NoData);
    }
    Ok(ChartSpec {
        id: id.to_string(),
        title: title.to_string(),
        x_label: labels.label(x_key),
        y_label: labels.label(y_key),
        legend_title: None,
        show_legend: false,
        category_order: bars.iter().map(|b| b.label.clone()).collect(),
        template: TEMPLATE.to_string(),
        data: ChartData::Bar {
            bars,
            color: seaborn(0),
        },
    })
}

/// Pie (or donut, when `hole > 0`) of category shares.
pub fn pie_chart(
    id: &str,
    title: &str,
    values: Vec<CategoryValue>,
    hole: f64,
    text_info: TextInfo,
) -> Result<ChartSpec, DashboardError> {
    let total: f64 = values.iter().map(|v| v.value).sum();
    if total <= 0.0 {
        return Err(DashboardError::NoData);
    }
    let slices: Vec<PieSlice> = values
        .into_iter()
        .enumerate()
        .map(|(i, v)| PieSlice {
            fraction: v.value / total,
            label: v.label,
            value: v.value,
            color: seaborn(i),
        })
        .collect();

    Ok(ChartSpec {
        id: id.to_string(),
        title: title.to_string(),
        x_label: String::new(),
        y_label: String::new(),
        legend_title: None,
        show_legend: true,
        category_order: slices.iter().map(|s| s.label.clone()).collect(),
        template: TEMPLATE.to_string(),
        data: ChartData::Pie {
            slices,
            hole: hole.clamp(0.0, 0.95),
            text_info,
        },
    })
}

// ---------------------------------------------------------------------------
// Dashboard charts
// ---------------------------------------------------------------------------

fn count_labels() -> LabelMap {
    LabelMap::new([
        ("value", "Number of Loans"),
        ("issue_date", "Issue Date"),
        ("issue_weekday", "Issue Weekday"),
    ])
}

pub fn loans_over_time<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Result<ChartSpec, DashboardError> {
    line_chart(
        "loans_over_time",
        "Number of Loans Issued Over Time",
        count_by_date(records),
        "issue_date",
        "value",
        &count_labels(),
    )
}

pub fn amount_over_time<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Result<ChartSpec, DashboardError> {
    let labels = LabelMap::new([("value", "Total Loan Amount"), ("issue_date", "Issue Date")]);
    line_chart(
        "amount_over_time",
        "Total Loan Amount Issued Over Time",
        sum_by_date(records),
        "issue_date",
        "value",
        &labels,
    )
}

/// Category order is the fixed Monday-first week, zero days included.
pub fn loans_by_weekday<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Result<ChartSpec, DashboardError> {
    bar_chart(
        "loans_by_weekday",
        "Distribution of Loans by Day of the Week",
        count_by_weekday(records),
        "issue_weekday",
        "value",
        &count_labels(),
    )
}

pub fn loans_by_condition<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Result<ChartSpec, DashboardError> {
    pie_chart(
        "loans_by_condition",
        "Distribution of Loans by Condition",
        count_by_condition(records),
        DONUT_HOLE,
        TextInfo::PercentAndValue,
    )
}

pub fn loans_by_grade<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Result<ChartSpec, DashboardError> {
    let labels = LabelMap::new([("grade", "Grade"), ("value", "Number of Loans")]);
    bar_chart(
        "loans_by_grade",
        "Distribution of Loans by Grade",
        count_by_grade(records),
        "grade",
        "value",
        &labels,
    )
}

/// Term → colour over every known term. Terms missing from `all_terms`
/// (such as callers passing an empty list) are added from `present`.
fn term_colors<S: AsRef<str>>(present: &[&str], all_terms: &[S], sequence: &[&str]) -> ColorMap {
    let mut terms: Vec<&str> = all_terms.iter().map(|t| t.as_ref()).collect();
    terms.extend(present.iter().copied());
    ColorMap::from_sequence("term", &terms, sequence)
}

/// Stacked 20-bin histogram of loan amounts, one colour per term.
///
/// Colours are keyed on `all_terms`, so a term keeps its colour whatever
/// subset of the rows is plotted.
pub fn amount_histogram<'a, S: AsRef<str>>(
    records: impl IntoIterator<Item = &'a LoanRecord>,
    all_terms: &[S],
) -> Result<ChartSpec, DashboardError> {
    let labels = LabelMap::new([
        ("loan_amount", "Loan Amount"),
        ("count", "Number of Loans"),
        ("term", "Loan Term"),
    ]);
    let histogram = bin_amounts(records, HISTOGRAM_BINS)?;
    let terms: Vec<&str> = histogram.groups.iter().map(|g| g.label.as_str()).collect();
    let colors = term_colors(&terms, all_terms, &HISTOGRAM_COLORS);

    Ok(ChartSpec {
        id: "amount_histogram".to_string(),
        title: "Loan Amount Distribution by Condition".to_string(),
        x_label: labels.label("loan_amount"),
        y_label: labels.label("count"),
        legend_title: Some(labels.label("term")),
        show_legend: true,
        category_order: terms.iter().map(|t| t.to_string()).collect(),
        template: TEMPLATE.to_string(),
        data: ChartData::Histogram {
            histogram,
            colors,
            stacked: true,
        },
    })
}

/// Box plot of loan amounts per purpose, one colour per term.
pub fn amount_by_purpose<'a, S: AsRef<str>>(
    records: impl IntoIterator<Item = &'a LoanRecord>,
    all_terms: &[S],
) -> Result<ChartSpec, DashboardError> {
    let labels = LabelMap::new([
        ("loan_amount", "Loan Amount"),
        ("term", "Loan Term"),
        ("purpose", "Loan Purpose"),
    ]);
    let groups = amount_by_purpose_and_term(records);
    if groups.is_empty() {
        return Err(DashboardError::NoData);
    }

    let mut purposes: Vec<String> = Vec::new();
    let mut terms: Vec<&str> = Vec::new();
    for g in &groups {
        if !purposes.contains(&g.category) {
            purposes.push(g.category.clone());
        }
        terms.push(&g.series);
    }
    let colors = term_colors(&terms, all_terms, &BOX_COLORS);

    Ok(ChartSpec {
        id: "amount_by_purpose".to_string(),
        title: "Loan Amount Distribution by Purpose".to_string(),
        x_label: labels.label("purpose"),
        y_label: labels.label("loan_amount"),
        legend_title: Some(labels.label("term")),
        show_legend: true,
        category_order: purposes,
        template: TEMPLATE.to_string(),
        data: ChartData::Box { groups, colors },
    })
}
