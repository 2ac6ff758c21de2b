//! Keyword tool response types.
//!
//! Count fields arrive either as JSON numbers or as strings such as `"< 10"`,
//! so they are kept as raw [`serde_json::Value`]s and interpreted by
//! [`crate::normalize`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level body of the `/keywordstool` endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordToolResponse {
    #[serde(default)]
    pub keyword_list: Vec<RawKeyword>,
}

/// One related-keyword row as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKeyword {
    #[serde(default)]
    pub rel_keyword: Option<String>,
    #[serde(default)]
    pub monthly_pc_qc_cnt: Option<Value>,
    #[serde(default)]
    pub monthly_mobile_qc_cnt: Option<Value>,
    /// Competition level label, e.g. `"낮음"` / `"high"`, or a number.
    #[serde(default)]
    pub comp_idx: Option<Value>,
    /// Average exposed ad depth.
    #[serde(default)]
    pub pl_avg_depth: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_count_types() {
        let body = serde_json::json!({
            "keywordList": [
                {
                    "relKeyword": "강릉맛집",
                    "monthlyPcQcCnt": 1200,
                    "monthlyMobileQcCnt": "< 10",
                    "compIdx": "높음",
                    "plAvgDepth": 15
                },
                { "relKeyword": null }
            ]
        });
        let parsed: KeywordToolResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.keyword_list.len(), 2);
        assert_eq!(parsed.keyword_list[0].rel_keyword.as_deref(), Some("강릉맛집"));
        assert_eq!(
            parsed.keyword_list[0].monthly_mobile_qc_cnt,
            Some(Value::String("< 10".to_string()))
        );
        assert!(parsed.keyword_list[1].rel_keyword.is_none());
        assert!(parsed.keyword_list[1].comp_idx.is_none());
    }

    #[test]
    fn missing_keyword_list_is_empty() {
        let parsed: KeywordToolResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(parsed.keyword_list.is_empty());
    }
}
