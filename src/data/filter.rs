use std::fmt;

use super::model::{LoanCondition, LoanDataset};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Condition selector: the one piece of user-controlled state
// ---------------------------------------------------------------------------

/// A validated choice from the "Select Loan Condition" widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionSelector(LoanCondition);

impl ConditionSelector {
    /// Accepts exactly "Good Loan" or "Bad Loan".
    pub fn parse(value: &str) -> Result<Self, DashboardError> {
        LoanCondition::from_label(value)
            .map(ConditionSelector)
            .ok_or_else(|| DashboardError::InvalidSelector(value.to_string()))
    }

    pub fn condition(self) -> LoanCondition {
        self.0
    }

    /// Values offered by the selector widget, in display order.
    pub fn options() -> [&'static str; 2] {
        LoanCondition::ALL.map(LoanCondition::label)
    }
}

impl Default for ConditionSelector {
    fn default() -> Self {
        ConditionSelector(LoanCondition::Good)
    }
}

impl From<LoanCondition> for ConditionSelector {
    fn from(c: LoanCondition) -> Self {
        ConditionSelector(c)
    }
}

impl fmt::Display for ConditionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Return indices of loans whose condition equals the selector, in
/// dataset order.
pub fn filter_by_condition(dataset: &LoanDataset, selector: ConditionSelector) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.loan_condition == selector.condition())
        .map(|(i, _)| i)
        .collect()
}
