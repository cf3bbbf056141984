use std::sync::Arc;

use crate::dashboard::{render, DashboardView};
use crate::data::filter::ConditionSelector;
use crate::data::model::LoanDataset;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendTab {
    #[default]
    LoansOverTime,
    AmountOverTime,
    IssueDate,
}

impl TrendTab {
    pub const ALL: [TrendTab; 3] = [TrendTab::LoansOverTime, TrendTab::AmountOverTime, TrendTab::IssueDate];

    pub fn title(self) -> &'static str {
        match self {
            TrendTab::LoansOverTime => "Loans Issued Over Time",
            TrendTab::AmountOverTime => "Loan Amount Over Time",
            TrendTab::IssueDate => "Issue Date Analysis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinanceTab {
    #[default]
    ByPeriod,
    ByPurpose,
}

impl FinanceTab {
    pub const ALL: [FinanceTab; 2] = [FinanceTab::ByPeriod, FinanceTab::ByPurpose];

    pub fn title(self) -> &'static str {
        match self {
            FinanceTab::ByPeriod => "Loan Amount Distribution by Period",
            FinanceTab::ByPurpose => "Loan Amount Distribution by Purpose",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<LoanDataset>>,

    /// Fatal load error; while set, no dashboard is shown.
    pub load_error: Option<String>,

    /// Current "Select Loan Condition" value.
    pub selector: ConditionSelector,

    /// Output of the last render pass.
    pub view: Option<DashboardView>,

    pub trend_tab: TrendTab,
    pub finance_tab: FinanceTab,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(selector: ConditionSelector) -> Self {
        Self {
            selector,
            ..Default::default()
        }
    }

    /// Ingest a newly loaded dataset and render it.
    pub fn set_dataset(&mut self, dataset: LoanDataset) {
        self.dataset = Some(Arc::new(dataset));
        self.load_error = None;
        self.status_message = None;
        self.rerender();
    }

    /// Record a failed load. Any previous dashboard is dropped.
    pub fn set_load_error(&mut self, error: &anyhow::Error) {
        log::error!("Failed to load loan data: {error:#}");
        self.dataset = None;
        self.view = None;
        self.load_error = Some(format!("{error:#}"));
    }

    /// Apply a selector value from the UI. Invalid values are rejected and
    /// leave both the selection and the rendered view untouched.
    pub fn set_condition(&mut self, value: &str) -> Result<(), DashboardError> {
        match ConditionSelector::parse(value) {
            Ok(selector) => {
                if selector != self.selector {
                    self.selector = selector;
                    self.rerender();
                }
                self.status_message = None;
                Ok(())
            }
            Err(e) => {
                log::warn!("Rejected selector update: {e}");
                self.status_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Recompute the view from the current dataset and selector.
    pub fn rerender(&mut self) {
        self.view = self
            .dataset
            .as_deref()
            .map(|ds| render(ds, self.selector));

        if let Some(view) = &self.view {
            let empty = view.charts().iter().filter(|slot| slot.is_err()).count();
            if empty > 0 {
                log::info!("{empty} chart(s) have no data for '{}'", self.selector);
            }
        }
    }
}
