//! Pure aggregation over collected keyword records.
//!
//! Nothing here performs I/O; [`build_report`] turns an already-collected
//! record set into every derived view of a report.

use std::cmp::Ordering;

use kwr_core::templates::{PLACEHOLDER_KEYWORD, PLACEHOLDER_REGION};
use kwr_core::{IndustryTemplate, KeywordRecord};

use crate::types::{
    BudgetEstimate, ChartSeries, RecommendedGroup, ReportParams, ReportResult, SortBy,
    SummaryRow, TitleGroup,
};

pub const CHART_LIMIT: usize = 20;
pub const RECOMMEND_PHRASES: usize = 3;
pub const TITLE_PATTERN_LIMIT: usize = 5;

pub const CLICK_RATE_LOW: f64 = 0.01;
pub const CLICK_RATE_HIGH: f64 = 0.03;
pub const CPC_LOW: i64 = 500;
pub const CPC_HIGH: i64 = 1500;

pub const MSG_NOTHING_COLLECTED: &str = "수집된 키워드가 없습니다.";
pub const MSG_NOTHING_MATCHED: &str = "조건에 맞는 키워드가 없습니다.";
const BUDGET_NOTE: &str =
    "※ 네이버 검색량 기준의 예상 광고비용이며, 실제 광고 집행 결과와는 다를 수 있습니다.";

/// Builds a full report from collected records.
///
/// The returned result never has `spreadsheet_ready` set; the caller flips it
/// once a workbook has actually been produced.
#[must_use]
pub fn build_report(
    records: Vec<KeywordRecord>,
    params: &ReportParams,
    template: &IndustryTemplate,
) -> ReportResult {
    let mut result = ReportResult {
        report_title: template.report_title.clone(),
        industry: template.industry.clone(),
        good_keyword_rule: template.good_keyword_rule.clone(),
        ..ReportResult::default()
    };

    if records.is_empty() {
        result.message = MSG_NOTHING_COLLECTED.to_string();
        return result;
    }

    let filtered = sort_records(filter_records(&records, params), params.sort_by);
    let bases = distinct_bases(&records);

    result.summary_rows = summarize(&records, &bases, params);
    result.chart = chart_series(&records);

    if filtered.is_empty() {
        result.message = MSG_NOTHING_MATCHED.to_string();
    } else {
        let summary = template.render_summary(
            records.len(),
            filtered.len(),
            mean_total(&filtered),
            mean_competition(&filtered),
        );
        result.message = format!(
            "리포트 생성 완료. {summary} ({})",
            template.good_keyword_rule
        );
        result.budget = Some(estimate_budget(&filtered));
        result.recommended_groups = recommend(&filtered, &bases);
        result.title_groups = titles(
            &result.recommended_groups,
            &template.recommended_title_patterns,
            &params.region,
        );
    }

    result.filtered_records = filtered;
    result.all_records = records;
    result
}

/// Records passing the minimum-volume and competition-ceiling criteria,
/// in their original order.
#[must_use]
pub fn filter_records(records: &[KeywordRecord], params: &ReportParams) -> Vec<KeywordRecord> {
    records
        .iter()
        .filter(|r| params.passes(r))
        .cloned()
        .collect()
}

/// Stable sort by the requested key.
#[must_use]
pub fn sort_records(mut records: Vec<KeywordRecord>, sort_by: SortBy) -> Vec<KeywordRecord> {
    match sort_by {
        SortBy::Total => records.sort_by(|a, b| b.total_count.cmp(&a.total_count)),
        SortBy::Competition => {
            records.sort_by(|a, b| cmp_competition(a.competition_score, b.competition_score));
        }
    }
    records
}

fn cmp_competition(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Distinct base keywords in first-seen order.
fn distinct_bases(records: &[KeywordRecord]) -> Vec<&str> {
    let mut bases: Vec<&str> = Vec::new();
    for record in records {
        if !bases.contains(&record.source_keyword.as_str()) {
            bases.push(&record.source_keyword);
        }
    }
    bases
}

/// One row per base keyword, computed over its unfiltered records.
#[must_use]
pub fn summarize(
    records: &[KeywordRecord],
    bases: &[&str],
    params: &ReportParams,
) -> Vec<SummaryRow> {
    bases
        .iter()
        .filter_map(|base| {
            let subset: Vec<&KeywordRecord> = records
                .iter()
                .filter(|r| r.source_keyword == *base)
                .collect();
            if subset.is_empty() {
                return None;
            }
            Some(SummaryRow {
                source_keyword: (*base).to_string(),
                collected_count: subset.len(),
                avg_total: mean_total(subset.iter().copied()),
                avg_competition: mean_competition(subset.iter().copied()),
                passed_count: subset.iter().filter(|r| params.passes(r)).count(),
            })
        })
        .collect()
}

/// Top records by total volume across the unfiltered set.
#[must_use]
pub fn chart_series(records: &[KeywordRecord]) -> ChartSeries {
    let top = sort_records(records.to_vec(), SortBy::Total);
    let mut chart = ChartSeries::default();
    for record in top.into_iter().take(CHART_LIMIT) {
        chart.pc.push(record.pc_count);
        chart.mobile.push(record.mobile_count);
        chart.competition.push(record.competition_score.unwrap_or(0.0));
        chart.labels.push(record.keyword);
    }
    chart
}

/// Prefixes `base` onto `keyword` unless the keyword already contains it.
#[must_use]
pub fn recommended_phrase(base: &str, keyword: &str) -> String {
    if !base.is_empty() && !keyword.contains(base) {
        format!("{base} {keyword}")
    } else {
        keyword.to_string()
    }
}

/// Up to three phrases per base keyword, drawn from its highest-volume
/// filtered records. Bases with no filtered records produce no group.
#[must_use]
pub fn recommend(filtered: &[KeywordRecord], bases: &[&str]) -> Vec<RecommendedGroup> {
    bases
        .iter()
        .filter_map(|base| {
            let subset: Vec<KeywordRecord> = filtered
                .iter()
                .filter(|r| r.source_keyword == *base)
                .cloned()
                .collect();
            let phrases: Vec<String> = sort_records(subset, SortBy::Total)
                .iter()
                .take(RECOMMEND_PHRASES)
                .map(|r| recommended_phrase(base, &r.keyword))
                .collect();
            (!phrases.is_empty()).then(|| RecommendedGroup {
                base_keyword: (*base).to_string(),
                phrases,
            })
        })
        .collect()
}

/// Fills a title pattern and collapses runs of whitespace.
#[must_use]
pub fn render_title(pattern: &str, region: &str, keyword: &str) -> String {
    pattern
        .replace(PLACEHOLDER_REGION, region)
        .replace(PLACEHOLDER_KEYWORD, keyword)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title suggestions keyed on each group's leading phrase.
#[must_use]
pub fn titles(groups: &[RecommendedGroup], patterns: &[String], region: &str) -> Vec<TitleGroup> {
    groups
        .iter()
        .filter_map(|group| {
            let lead = group.phrases.first()?;
            Some(TitleGroup {
                base_keyword: group.base_keyword.clone(),
                titles: patterns
                    .iter()
                    .take(TITLE_PATTERN_LIMIT)
                    .map(|p| render_title(p, region, lead))
                    .collect(),
            })
        })
        .collect()
}

#[must_use]
pub fn estimate_budget(filtered: &[KeywordRecord]) -> BudgetEstimate {
    let search_volume: i64 = filtered.iter().map(|r| r.total_count).sum();
    let clicks_low = scale(search_volume, CLICK_RATE_LOW);
    let clicks_high = scale(search_volume, CLICK_RATE_HIGH);
    BudgetEstimate {
        search_volume,
        clicks_low,
        clicks_high,
        budget_low: clicks_low.saturating_mul(CPC_LOW),
        budget_high: clicks_high.saturating_mul(CPC_HIGH),
        note: BUDGET_NOTE,
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn scale(volume: i64, rate: f64) -> i64 {
    (volume as f64 * rate).trunc() as i64
}

/// Truncated mean of total volume; `0` for an empty set.
fn mean_total<'a>(records: impl IntoIterator<Item = &'a KeywordRecord>) -> i64 {
    let (sum, count) = records
        .into_iter()
        .fold((0_i64, 0_i64), |(s, n), r| (s.saturating_add(r.total_count), n + 1));
    if count == 0 {
        0
    } else {
        sum / count
    }
}

/// Mean of the present competition scores, rounded to two decimals.
fn mean_competition<'a>(records: impl IntoIterator<Item = &'a KeywordRecord>) -> Option<f64> {
    let scores: Vec<f64> = records
        .into_iter()
        .filter_map(|r| r.competition_score)
        .collect();
    if scores.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
