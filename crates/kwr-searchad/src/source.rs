use std::future::Future;

use crate::error::SearchAdError;
use crate::types::RawKeyword;

/// Anything that can return related-keyword rows for a base keyword.
///
/// [`crate::SearchAdClient`] is the production implementation; report tests
/// substitute canned data.
pub trait KeywordSource {
    fn fetch_keyword_stats(
        &self,
        base_keyword: &str,
    ) -> impl Future<Output = Result<Vec<RawKeyword>, SearchAdError>> + Send;
}
