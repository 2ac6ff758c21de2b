use serde::{Deserialize, Serialize};

/// One related keyword collected for a base keyword.
///
/// Build it through [`KeywordRecord::new`] so `total_count` always equals
/// `pc_count + mobile_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub pc_count: i64,
    pub mobile_count: i64,
    pub total_count: i64,
    pub avg_ad_depth: Option<f64>,
    pub competition_score: Option<f64>,
    pub competition_label: Option<String>,
    pub source_keyword: String,
}

impl KeywordRecord {
    /// Negative counts are clamped to zero.
    #[must_use]
    pub fn new(
        keyword: impl Into<String>,
        pc_count: i64,
        mobile_count: i64,
        source_keyword: impl Into<String>,
    ) -> Self {
        let pc_count = pc_count.max(0);
        let mobile_count = mobile_count.max(0);
        Self {
            keyword: keyword.into(),
            pc_count,
            mobile_count,
            total_count: pc_count.saturating_add(mobile_count),
            avg_ad_depth: None,
            competition_score: None,
            competition_label: None,
            source_keyword: source_keyword.into(),
        }
    }

    #[must_use]
    pub fn with_competition(mut self, score: Option<f64>, label: Option<String>) -> Self {
        self.competition_score = score;
        self.competition_label = label;
        self
    }

    #[must_use]
    pub fn with_avg_ad_depth(mut self, depth: Option<f64>) -> Self {
        self.avg_ad_depth = depth;
        self
    }
}
