//! Per-industry report wording.
//!
//! Each industry may ship a `{code}.json` file in the templates directory.
//! Keys present in the file replace the built-in defaults; absent keys keep
//! them. A missing or malformed file yields the defaults unchanged.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_REGION: &str = "{지역}";
pub const PLACEHOLDER_KEYWORD: &str = "{키워드}";

const DEFAULT_REPORT_TITLE: &str = "J&T Solution 키워드 리포트";
const DEFAULT_GOOD_KEYWORD_RULE: &str = "검색량 100 이상 & 경쟁도 0.8 이하 = 좋은 키워드";
const DEFAULT_SUMMARY_FORMAT: &str = "총 {total_keywords}개 키워드 중 {passed_keywords}개가 조건을 통과했습니다. \
     평균 검색량 {avg_search}회, 평균 경쟁도 {avg_comp}입니다.";
const DEFAULT_TITLE_PATTERNS: [&str; 3] = [
    "{지역} {키워드} 완벽 정리 가이드",
    "{지역}에서 {키워드} 준비하려면?",
    "{키워드} 할 때 꼭 알아야 할 3가지",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryTemplate {
    /// Human-readable industry label.
    pub industry: String,
    pub report_title: String,
    pub good_keyword_rule: String,
    /// Supports `{total_keywords}`, `{passed_keywords}`, `{avg_search}`, `{avg_comp}`.
    ///
    /// Placeholders are plain literal substitutions. Brace escapes (`{{`,
    /// `}}`) and format specs such as `{avg_search:,}` are not interpreted
    /// and pass through unchanged.
    pub summary_format: String,
    pub recommended_title_patterns: Vec<String>,
}

impl Default for IndustryTemplate {
    fn default() -> Self {
        Self {
            industry: String::new(),
            report_title: DEFAULT_REPORT_TITLE.to_string(),
            good_keyword_rule: DEFAULT_GOOD_KEYWORD_RULE.to_string(),
            summary_format: DEFAULT_SUMMARY_FORMAT.to_string(),
            recommended_title_patterns: DEFAULT_TITLE_PATTERNS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
        }
    }
}

/// Optional fields read from an industry file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateOverrides {
    pub industry: Option<String>,
    pub report_title: Option<String>,
    pub good_keyword_rule: Option<String>,
    pub summary_format: Option<String>,
    pub recommended_title_patterns: Option<Vec<String>>,
}

impl IndustryTemplate {
    #[must_use]
    pub fn merged(self, overrides: TemplateOverrides) -> Self {
        Self {
            industry: overrides.industry.unwrap_or(self.industry),
            report_title: overrides.report_title.unwrap_or(self.report_title),
            good_keyword_rule: overrides.good_keyword_rule.unwrap_or(self.good_keyword_rule),
            summary_format: overrides.summary_format.unwrap_or(self.summary_format),
            recommended_title_patterns: overrides
                .recommended_title_patterns
                .unwrap_or(self.recommended_title_patterns),
        }
    }

    /// Renders the summary sentence. A missing competition average renders as `-`.
    #[must_use]
    pub fn render_summary(
        &self,
        total_keywords: usize,
        passed_keywords: usize,
        avg_search: i64,
        avg_comp: Option<f64>,
    ) -> String {
        let avg_comp = avg_comp.map_or_else(|| "-".to_string(), |v| format!("{v:?}"));
        self.summary_format
            .replace("{total_keywords}", &total_keywords.to_string())
            .replace("{passed_keywords}", &passed_keywords.to_string())
            .replace("{avg_search}", &avg_search.to_string())
            .replace("{avg_comp}", &avg_comp)
    }
}

/// Loads industry templates from a directory of JSON files.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the template for `industry_code`, falling back to the default
    /// on an empty code or any read/parse failure.
    #[must_use]
    pub fn load(&self, industry_code: &str) -> IndustryTemplate {
        let code = industry_code.trim();
        if code.is_empty() {
            return IndustryTemplate::default();
        }
        if code.contains(['/', '\\']) || code.contains("..") {
            tracing::warn!(industry = code, "rejecting industry code with path characters");
            return IndustryTemplate::default();
        }

        let path = self.dir.join(format!("{code}.json"));
        match read_overrides(&path) {
            Ok(overrides) => IndustryTemplate::default().merged(overrides),
            Err(reason) => {
                tracing::debug!(
                    industry = code,
                    path = %path.display(),
                    reason = %reason,
                    "industry template unavailable; using default"
                );
                IndustryTemplate::default()
            }
        }
    }
}

fn read_overrides(path: &Path) -> Result<TemplateOverrides, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}
