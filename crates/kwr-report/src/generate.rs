//! Report orchestration: collect, aggregate, export.

use std::time::Duration;

use kwr_core::{CompanyInfo, IndustryTemplate, KeywordRecord};
use kwr_searchad::{normalize_keyword, KeywordSource};

use crate::aggregate::build_report;
use crate::error::ReportError;
use crate::export::build_workbook;
use crate::types::{ReportParams, ReportResult};

/// A report plus the workbook bytes, when one was produced.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub result: ReportResult,
    pub workbook: Option<Vec<u8>>,
}

/// Queries `source` once per base keyword, in order, pausing `delay` between
/// calls.
///
/// # Errors
///
/// Returns [`ReportError::Remote`] on the first failed call; records already
/// collected are discarded.
pub async fn collect_records<S>(
    source: &S,
    base_keywords: &[String],
    delay: Duration,
) -> Result<Vec<KeywordRecord>, ReportError>
where
    S: KeywordSource + Sync,
{
    let mut records = Vec::new();

    for (i, base) in base_keywords.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let rows = source.fetch_keyword_stats(base).await.map_err(|e| {
            tracing::error!(base_keyword = %base, error = %e, "keyword fetch failed; aborting report");
            ReportError::Remote {
                base_keyword: base.clone(),
                source: e,
            }
        })?;

        let before = records.len();
        records.extend(rows.iter().filter_map(|raw| normalize_keyword(raw, base)));
        tracing::debug!(
            base_keyword = %base,
            returned = rows.len(),
            kept = records.len() - before,
            "collected related keywords"
        );
    }

    Ok(records)
}

/// Runs a full report: collection, aggregation and, when anything was
/// collected, the spreadsheet export.
///
/// # Errors
///
/// - [`ReportError::NoBaseKeywords`] if `params.base_keywords` is empty.
/// - [`ReportError::Remote`] if any keyword call fails.
/// - [`ReportError::Export`] if the workbook cannot be rendered.
pub async fn generate_report<S>(
    source: &S,
    params: &ReportParams,
    template: &IndustryTemplate,
    company: &CompanyInfo,
    delay: Duration,
) -> Result<GeneratedReport, ReportError>
where
    S: KeywordSource + Sync,
{
    if params.base_keywords.is_empty() {
        return Err(ReportError::NoBaseKeywords);
    }

    let records = collect_records(source, &params.base_keywords, delay).await?;
    let mut result = build_report(records, params, template);

    let workbook = if result.all_records.is_empty() {
        None
    } else {
        Some(build_workbook(
            &result.all_records,
            &result.filtered_records,
            company,
        )?)
    };
    result.spreadsheet_ready = workbook.is_some();

    tracing::info!(
        base_keywords = params.base_keywords.len(),
        collected = result.all_records.len(),
        passed = result.filtered_records.len(),
        "report generated"
    );

    Ok(GeneratedReport { result, workbook })
}
