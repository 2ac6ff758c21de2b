//! Report request parameters and result shapes.

use kwr_core::KeywordRecord;
use serde::{Deserialize, Serialize};

/// Ordering applied to the filtered record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Descending by total search volume.
    #[default]
    Total,
    /// Ascending by competition score, unscored records last.
    #[serde(alias = "comp")]
    Competition,
}

impl SortBy {
    /// Parses a user-supplied sort key. Anything unrecognised sorts by total.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "comp" | "competition" => Self::Competition,
            _ => Self::Total,
        }
    }
}

/// Inputs for one report generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportParams {
    /// Base keywords in input order. Duplicates are queried again.
    pub base_keywords: Vec<String>,
    pub min_total: i64,
    /// Competition ceiling. Records without a score never pass it.
    pub max_competition: Option<f64>,
    pub sort_by: SortBy,
    /// Substituted for the region placeholder in title patterns; may be empty.
    pub region: String,
}

impl ReportParams {
    /// The filter predicate shared by the filtered set and per-base pass counts.
    #[must_use]
    pub fn passes(&self, record: &KeywordRecord) -> bool {
        if record.total_count < self.min_total {
            return false;
        }
        match self.max_competition {
            Some(ceiling) => record.competition_score.is_some_and(|s| s <= ceiling),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub source_keyword: String,
    pub collected_count: usize,
    pub avg_total: i64,
    pub avg_competition: Option<f64>,
    pub passed_count: usize,
}

/// Parallel series for the top records by total volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub pc: Vec<i64>,
    pub mobile: Vec<i64>,
    /// Missing scores are charted as `0.0`.
    pub competition: Vec<f64>,
}

impl ChartSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedGroup {
    pub base_keyword: String,
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleGroup {
    pub base_keyword: String,
    pub titles: Vec<String>,
}

/// Rough monthly click and spend range derived from filtered search volume.
///
/// An approximation for planning only; it is not a forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetEstimate {
    pub search_volume: i64,
    pub clicks_low: i64,
    pub clicks_high: i64,
    pub budget_low: i64,
    pub budget_high: i64,
    pub note: &'static str,
}

/// Everything a report request returns to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportResult {
    pub report_title: String,
    pub industry: String,
    pub good_keyword_rule: String,
    pub all_records: Vec<KeywordRecord>,
    pub filtered_records: Vec<KeywordRecord>,
    pub summary_rows: Vec<SummaryRow>,
    pub chart: ChartSeries,
    pub recommended_groups: Vec<RecommendedGroup>,
    pub title_groups: Vec<TitleGroup>,
    pub message: String,
    pub budget: Option<BudgetEstimate>,
    pub spreadsheet_ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_parses_aliases() {
        assert_eq!(SortBy::parse("comp"), SortBy::Competition);
        assert_eq!(SortBy::parse(" Competition "), SortBy::Competition);
        assert_eq!(SortBy::parse("total"), SortBy::Total);
        assert_eq!(SortBy::parse(""), SortBy::Total);
        assert_eq!(SortBy::parse("volume"), SortBy::Total);
    }

    #[test]
    fn passes_applies_min_total_and_ceiling() {
        let params = ReportParams {
            min_total: 50,
            max_competition: Some(0.6),
            ..ReportParams::default()
        };
        let low = KeywordRecord::new("a", 80, 40, "b").with_competition(Some(0.3), None);
        let small = KeywordRecord::new("a", 10, 5, "b").with_competition(Some(0.3), None);
        let high = KeywordRecord::new("a", 80, 40, "b").with_competition(Some(0.9), None);
        let unscored = KeywordRecord::new("a", 80, 40, "b");

        assert!(params.passes(&low));
        assert!(!params.passes(&small));
        assert!(!params.passes(&high));
        assert!(!params.passes(&unscored));
    }

    #[test]
    fn passes_without_ceiling_ignores_competition() {
        let params = ReportParams::default();
        let unscored = KeywordRecord::new("a", 0, 0, "b");
        assert!(params.passes(&unscored));
    }
}
