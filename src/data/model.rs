use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// LoanCondition – the binary good/bad classification
// ---------------------------------------------------------------------------

/// Binary loan classification. Partitions every dataset in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LoanCondition {
    Good,
    Bad,
}

impl LoanCondition {
    pub const ALL: [LoanCondition; 2] = [LoanCondition::Good, LoanCondition::Bad];

    /// Label as it appears in the source data and the selector widget.
    pub fn label(self) -> &'static str {
        match self {
            LoanCondition::Good => "Good Loan",
            LoanCondition::Bad => "Bad Loan",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == s)
    }
}

impl fmt::Display for LoanCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Weekdays
// ---------------------------------------------------------------------------

/// Monday-first ordering used by the weekday distribution.
pub const CANONICAL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a full English weekday name ("Monday"), case-insensitive.
pub fn parse_weekday_name(s: &str) -> Option<Weekday> {
    let s = s.trim();
    CANONICAL_WEEKDAYS
        .into_iter()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(s))
}

// ---------------------------------------------------------------------------
// LoanRecord – one row of the cleaned loan table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LoanRecord {
    pub id: String,
    pub issue_date: NaiveDate,
    pub issue_weekday: Weekday,
    pub loan_amount: f64,
    /// Percentage, e.g. `13.5` for 13.5 %.
    pub interest_rate: f64,
    pub loan_condition: LoanCondition,
    pub grade: String,
    pub term: String,
    pub purpose: String,
}

impl LoanRecord {
    /// Build a record whose weekday is derived from `issue_date`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        issue_date: NaiveDate,
        loan_amount: f64,
        interest_rate: f64,
        loan_condition: LoanCondition,
        grade: impl Into<String>,
        term: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        LoanRecord {
            id: id.into(),
            issue_date,
            issue_weekday: issue_date.weekday(),
            loan_amount,
            interest_rate,
            loan_condition,
            grade: grade.into(),
            term: term.into(),
            purpose: purpose.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoanDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed category indices.
///
/// Built once and never mutated afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct LoanDataset {
    records: Vec<LoanRecord>,
    /// Distinct terms, ascending.
    pub terms: Vec<String>,
    /// Distinct grades, ascending.
    pub grades: Vec<String>,
    /// Distinct purposes in order of first appearance.
    pub purposes: Vec<String>,
}

impl LoanDataset {
    /// Build category indices, checking the weekday/date dependency and
    /// the amount/rate domains of every row.
    pub fn from_records(records: Vec<LoanRecord>) -> Result<Self, DashboardError> {
        let mut terms = BTreeSet::new();
        let mut grades = BTreeSet::new();
        let mut purposes: Vec<String> = Vec::new();

        for (row, rec) in records.iter().enumerate() {
            if rec.issue_weekday != rec.issue_date.weekday() {
                return Err(DashboardError::schema(
                    "issue_weekday",
                    format!(
                        "row {row}: {} is a {}, not a {}",
                        rec.issue_date,
                        weekday_name(rec.issue_date.weekday()),
                        weekday_name(rec.issue_weekday)
                    ),
                ));
            }
            if !rec.loan_amount.is_finite() || rec.loan_amount <= 0.0 {
                return Err(DashboardError::schema(
                    "loan_amount",
                    format!("row {row}: expected a positive amount, got {}", rec.loan_amount),
                ));
            }
            if !rec.interest_rate.is_finite() {
                return Err(DashboardError::schema(
                    "interest_rate",
                    format!("row {row}: not a finite number"),
                ));
            }

            terms.insert(rec.term.clone());
            grades.insert(rec.grade.clone());
            if !purposes.contains(&rec.purpose) {
                purposes.push(rec.purpose.clone());
            }
        }

        Ok(LoanDataset {
            records,
            terms: terms.into_iter().collect(),
            grades: grades.into_iter().collect(),
            purposes,
        })
    }

    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    /// Records at the given row indices, in index order.
    pub fn rows<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a LoanRecord> + 'a {
        indices.iter().filter_map(move |&i| self.records.get(i))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
