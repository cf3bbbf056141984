/// Data layer: loan records, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LoanDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LoanDataset  │  Vec<LoanRecord>, term / grade / purpose domains
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  loan condition → row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  counts, sums, histogram bins, box statistics
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
