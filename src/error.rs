use thiserror::Error;

/// Conditions the dashboard reports instead of crashing.
///
/// `SchemaMismatch` and `UnsupportedFormat` are fatal at load time; `NoData`
/// and `InvalidSelector` are recoverable and travel inside the rendered view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("schema mismatch in column '{column}': {reason}")]
    SchemaMismatch { column: String, reason: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("no data")]
    NoData,

    #[error("invalid loan condition selector '{0}' (expected \"Good Loan\" or \"Bad Loan\")")]
    InvalidSelector(String),
}

impl DashboardError {
    pub fn schema(column: &str, reason: impl Into<String>) -> Self {
        DashboardError::SchemaMismatch {
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}
