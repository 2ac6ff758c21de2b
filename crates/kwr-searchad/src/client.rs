//! HTTP client for the keyword statistics endpoint.
//!
//! Every request carries the API key, customer id, a millisecond timestamp and
//! an HMAC signature over `"{timestamp}.{method}.{uri}"`. Non-2xx responses
//! surface as [`SearchAdError::Status`] with the response body attached.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SearchAdError;
use crate::signature::sign;
use crate::source::KeywordSource;
use crate::types::{KeywordToolResponse, RawKeyword};

const DEFAULT_BASE_URL: &str = "https://api.naver.com";
const KEYWORD_TOOL_URI: &str = "/keywordstool";

pub const HEADER_TIMESTAMP: &str = "X-Timestamp";
pub const HEADER_API_KEY: &str = "X-API-KEY";
pub const HEADER_CUSTOMER: &str = "X-Customer";
pub const HEADER_SIGNATURE: &str = "X-Signature";

/// Shared-secret credentials for the advertising account.
#[derive(Clone)]
pub struct SearchAdCredentials {
    pub api_key: String,
    pub secret_key: String,
    pub customer_id: String,
}

impl std::fmt::Debug for SearchAdCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAdCredentials")
            .field("api_key", &"[redacted]")
            .field("secret_key", &"[redacted]")
            .field("customer_id", &self.customer_id)
            .finish()
    }
}

/// Client for the keyword statistics API.
///
/// Use [`SearchAdClient::new`] for production or
/// [`SearchAdClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug)]
pub struct SearchAdClient {
    client: Client,
    credentials: SearchAdCredentials,
    endpoint: Url,
}

impl SearchAdClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchAdError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(credentials: SearchAdCredentials, timeout_secs: u64) -> Result<Self, SearchAdError> {
        Self::with_base_url(credentials, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom API origin.
    ///
    /// # Errors
    ///
    /// Returns [`SearchAdError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`SearchAdError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        credentials: SearchAdCredentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SearchAdError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let raw = format!("{}{KEYWORD_TOOL_URI}", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&raw).map_err(|e| SearchAdError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            credentials,
            endpoint,
        })
    }

    /// Fetches related-keyword statistics for one base keyword.
    ///
    /// Returns the decoded `keywordList`, or an empty list when the body
    /// carries none.
    ///
    /// # Errors
    ///
    /// - [`SearchAdError::Status`] on a non-2xx response.
    /// - [`SearchAdError::Http`] on network failure or timeout.
    /// - [`SearchAdError::Deserialize`] if the body is not the expected JSON.
    pub async fn keyword_stats(&self, base_keyword: &str) -> Result<Vec<RawKeyword>, SearchAdError> {
        let url = self.build_url(base_keyword);
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let signature = sign(
            &timestamp,
            "GET",
            KEYWORD_TOOL_URI,
            &self.credentials.secret_key,
        )?;

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/json; charset=UTF-8",
            )
            .header(HEADER_TIMESTAMP, &timestamp)
            .header(HEADER_API_KEY, &self.credentials.api_key)
            .header(HEADER_CUSTOMER, &self.credentials.customer_id)
            .header(HEADER_SIGNATURE, signature)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(
                base_keyword,
                status = status.as_u16(),
                "keyword API returned non-success status"
            );
            return Err(SearchAdError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: KeywordToolResponse =
            serde_json::from_str(&body).map_err(|e| SearchAdError::Deserialize {
                context: format!("keywordstool(hintKeywords={base_keyword})"),
                source: e,
            })?;

        tracing::debug!(
            base_keyword,
            count = parsed.keyword_list.len(),
            "fetched keyword stats"
        );
        Ok(parsed.keyword_list)
    }

    /// Builds the endpoint URL with percent-encoded query parameters.
    fn build_url(&self, base_keyword: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("hintKeywords", base_keyword)
            .append_pair("showDetail", "1");
        url
    }
}

impl KeywordSource for SearchAdClient {
    async fn fetch_keyword_stats(
        &self,
        base_keyword: &str,
    ) -> Result<Vec<RawKeyword>, SearchAdError> {
        self.keyword_stats(base_keyword).await
    }
}
