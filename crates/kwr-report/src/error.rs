use kwr_searchad::SearchAdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("at least one base keyword is required")]
    NoBaseKeywords,

    /// A keyword API call failed; the whole batch is abandoned.
    #[error("keyword fetch failed for '{base_keyword}': {source}")]
    Remote {
        base_keyword: String,
        #[source]
        source: SearchAdError,
    },

    #[error("spreadsheet export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}
