//! Exact-phrase web search check for draft copy.
//!
//! Sentences are sampled from the submitted text and searched one by one as
//! quoted phrases. A results page whose visible text carries the no-results
//! marker means the sentence is unique; any other page counts as a likely
//! duplicate. A failed request or a non-2xx page marks the sentence as
//! unchecked rather than duplicated.

use std::sync::LazyLock;
use std::time::Duration;

use rand::seq::IndexedRandom;
use regex::Regex;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::SearchAdError;

pub const DEFAULT_SEARCH_URL: &str = "https://search.naver.com/search.naver";
/// Sentences must be strictly longer than this many characters.
pub const MIN_SENTENCE_CHARS: usize = 15;
pub const MAX_SAMPLED_SENTENCES: usize = 5;
pub const NO_RESULTS_MARKER: &str = "검색결과가 없습니다";

const DEFAULT_DELAY: Duration = Duration::from_millis(500);
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicationStatus {
    Unique,
    Duplicate,
    Failed,
}

impl DuplicationStatus {
    /// Display label shown next to each checked sentence.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Unique => "안전 (Unique)",
            Self::Duplicate => "중복 발견 (Dangerous)",
            Self::Failed => "검사 실패 (Error)",
        }
    }

    #[must_use]
    pub fn is_safe(self) -> bool {
        matches!(self, Self::Unique)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicationCheck {
    pub sentence: String,
    pub status: DuplicationStatus,
    pub label: &'static str,
    pub is_safe: bool,
}

impl DuplicationCheck {
    fn new(sentence: String, status: DuplicationStatus) -> Self {
        Self {
            sentence,
            status,
            label: status.label(),
            is_safe: status.is_safe(),
        }
    }
}

static TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script>|<style\b.*?</style>|<[^>]+>")
        .expect("valid tags regex")
});

/// Visible text of an HTML page: tags removed, whitespace runs collapsed.
///
/// Tags are dropped without a separator so a phrase split by inline markup
/// (`<b>검색결과가</b> 없습니다`) reads back whole.
#[must_use]
pub fn visible_text(html: &str) -> String {
    TAGS.replace_all(html, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits text on newlines and periods, keeping trimmed sentences longer
/// than [`MIN_SENTENCE_CHARS`] characters.
#[must_use]
pub fn extract_sentences(text: &str) -> Vec<String> {
    text.split(['\n', '.'])
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .map(str::to_owned)
        .collect()
}

#[derive(Debug)]
pub struct DuplicationChecker {
    client: Client,
    search_url: Url,
    delay: Duration,
}

impl DuplicationChecker {
    /// # Errors
    ///
    /// Returns [`SearchAdError::Http`] if the HTTP client cannot be built, or
    /// [`SearchAdError::InvalidBaseUrl`] if `search_url` does not parse.
    pub fn new(search_url: &str, timeout_secs: u64) -> Result<Self, SearchAdError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        let search_url = Url::parse(search_url).map_err(|e| SearchAdError::InvalidBaseUrl {
            url: search_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            search_url,
            delay: DEFAULT_DELAY,
        })
    }

    /// Overrides the pause between consecutive searches.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Samples up to [`MAX_SAMPLED_SENTENCES`] sentences from `text` and
    /// searches each one.
    ///
    /// A failed search marks its sentence [`DuplicationStatus::Failed`]
    /// instead of aborting the whole check.
    ///
    /// # Errors
    ///
    /// Returns [`SearchAdError::NoCheckableSentences`] when no sentence is
    /// long enough.
    pub async fn check(&self, text: &str) -> Result<Vec<DuplicationCheck>, SearchAdError> {
        let sentences = extract_sentences(text);
        if sentences.is_empty() {
            return Err(SearchAdError::NoCheckableSentences {
                min_chars: MIN_SENTENCE_CHARS,
            });
        }

        let targets: Vec<String> = {
            let mut rng = rand::rng();
            sentences
                .choose_multiple(&mut rng, MAX_SAMPLED_SENTENCES)
                .cloned()
                .collect()
        };

        let mut results = Vec::with_capacity(targets.len());
        for (i, sentence) in targets.into_iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let status = match self.search(&sentence).await {
                Ok(body) if visible_text(&body).contains(NO_RESULTS_MARKER) => {
                    DuplicationStatus::Unique
                }
                Ok(_) => DuplicationStatus::Duplicate,
                Err(e) => {
                    tracing::warn!(error = %e, "duplication search failed");
                    DuplicationStatus::Failed
                }
            };
            results.push(DuplicationCheck::new(sentence, status));
        }

        Ok(results)
    }

    async fn search(&self, sentence: &str) -> Result<String, SearchAdError> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("query", &format!("\"{sentence}\""))
            .append_pair("where", "view");

        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_sentences_splits_on_newlines_and_periods() {
        let text = "짧은 문장.\n이 문장은 충분히 길어서 검사 대상이 됩니다\n또 다른 아주 긴 문장이 여기에 있습니다. 끝";
        let sentences = extract_sentences(text);
        assert_eq!(
            sentences,
            vec![
                "이 문장은 충분히 길어서 검사 대상이 됩니다".to_string(),
                "또 다른 아주 긴 문장이 여기에 있습니다".to_string(),
            ]
        );
    }

    #[test]
    fn extract_sentences_counts_characters_not_bytes() {
        // 15 Hangul syllables is 45 bytes but only 15 characters.
        let fifteen = "가나다라마바사아자차카타파하가";
        assert_eq!(fifteen.chars().count(), 15);
        assert!(extract_sentences(fifteen).is_empty());
        assert_eq!(extract_sentences(&format!("{fifteen}나")).len(), 1);
    }

    #[test]
    fn visible_text_joins_markup_split_phrases() {
        let html = "<p>'x'에 대한 <b>검색결과가</b>\n   없습니다.</p>";
        assert_eq!(visible_text(html), "'x'에 대한 검색결과가 없습니다.");
        assert!(visible_text("<span>검색</span>결과가 없습니다").contains(NO_RESULTS_MARKER));
    }

    #[test]
    fn visible_text_skips_script_bodies() {
        let html = "<script>var m = '검색결과가 없습니다';</script><div>결과 10건</div>";
        assert_eq!(visible_text(html), "결과 10건");
    }

    #[test]
    fn status_labels_and_safety() {
        assert!(DuplicationStatus::Unique.is_safe());
        assert!(!DuplicationStatus::Duplicate.is_safe());
        assert!(!DuplicationStatus::Failed.is_safe());
        assert_eq!(DuplicationStatus::Failed.label(), "검사 실패 (Error)");
    }

    #[tokio::test]
    async fn check_without_long_sentences_is_an_error() {
        let checker = DuplicationChecker::new(DEFAULT_SEARCH_URL, 5).expect("checker");
        let result = checker.check("짧다. 너무 짧다.").await;
        assert!(matches!(
            result,
            Err(SearchAdError::NoCheckableSentences { min_chars: 15 })
        ));
    }

    #[test]
    fn invalid_search_url_is_rejected() {
        let result = DuplicationChecker::new("::nope::", 5);
        assert!(matches!(result, Err(SearchAdError::InvalidBaseUrl { .. })));
    }
}
