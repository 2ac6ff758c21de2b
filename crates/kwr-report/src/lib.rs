//! Keyword report aggregation and spreadsheet export.
//!
//! [`generate_report`] collects related keywords for each base keyword,
//! filters and ranks them, derives the summary views and renders the
//! downloadable workbook.

pub mod aggregate;
pub mod error;
pub mod export;
pub mod generate;
pub mod types;

pub use aggregate::build_report;
pub use error::ReportError;
pub use export::{build_workbook, export_filename, XLSX_CONTENT_TYPE};
pub use generate::{collect_records, generate_report, GeneratedReport};
pub use types::{
    BudgetEstimate, ChartSeries, RecommendedGroup, ReportParams, ReportResult, SortBy,
    SummaryRow, TitleGroup,
};
