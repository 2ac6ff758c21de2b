mod accounts;
mod duplication;
mod presets;
mod reports;
mod session;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use kwr_core::{AppConfig, CompanyInfo, TemplateStore};
use kwr_searchad::{DuplicationChecker, SearchAdClient, SearchAdCredentials};
use kwr_store::{AccountStore, ExportStore, MemoryExportStore, PresetStore, StoreError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, RequestId};
use crate::session::SessionStore;

const DUPCHECK_TIMEOUT_SECS: u64 = 5;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub searchad: Arc<SearchAdClient>,
    pub dupcheck: Arc<DuplicationChecker>,
    pub accounts: Arc<AccountStore>,
    pub presets: Arc<PresetStore>,
    pub templates: Arc<TemplateStore>,
    pub company: Arc<CompanyInfo>,
    pub exports: Arc<dyn ExportStore>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Wires every collaborator from configuration.
    ///
    /// # Errors
    ///
    /// Fails if an HTTP client cannot be built, a configured URL does not
    /// parse, or the company info file cannot be loaded.
    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let credentials = SearchAdCredentials {
            api_key: config.searchad_api_key.clone(),
            secret_key: config.searchad_secret_key.clone(),
            customer_id: config.searchad_customer_id.clone(),
        };
        let searchad = SearchAdClient::with_base_url(
            credentials,
            config.searchad_timeout_secs,
            &config.searchad_base_url,
        )?;
        let dupcheck = DuplicationChecker::new(&config.dupcheck_search_url, DUPCHECK_TIMEOUT_SECS)?;
        let company = kwr_core::load_company_info(config.company_info_path.as_deref())?;

        Ok(Self {
            searchad: Arc::new(searchad),
            dupcheck: Arc::new(dupcheck),
            accounts: Arc::new(AccountStore::open(
                config.accounts_path.clone(),
                config.admin_account.clone(),
            )),
            presets: Arc::new(PresetStore::new(config.presets_dir.clone())),
            templates: Arc::new(TemplateStore::new(config.templates_dir.clone())),
            company: Arc::new(company),
            exports: Arc::new(MemoryExportStore::new()),
            sessions: Arc::new(SessionStore::default()),
            config,
        })
    }

    pub(crate) fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.config.inter_request_delay_ms)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "forbidden" => StatusCode::FORBIDDEN,
            "bad_request" | "validation_error" | "report_not_ready" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_store_error(request_id: &str, error: &StoreError) -> ApiError {
    match error {
        StoreError::Validation(msg) => ApiError::new(request_id, "validation_error", msg.as_str()),
        StoreError::NotFound(msg) => ApiError::new(request_id, "not_found", msg.as_str()),
        StoreError::Conflict(msg) => ApiError::new(request_id, "conflict", msg.as_str()),
        StoreError::Protected(msg) => ApiError::new(request_id, "forbidden", msg.as_str()),
        StoreError::Io { .. } | StoreError::Encode { .. } => {
            tracing::error!(error = %error, "store write failed");
            ApiError::new(request_id, "internal_error", "failed to save changes")
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/session",
            get(session::current_session)
                .post(session::login)
                .delete(session::logout),
        )
        .route(
            "/api/v1/presets",
            get(presets::list_presets).post(presets::save_preset),
        )
        .route(
            "/api/v1/presets/{name}",
            get(presets::get_preset).delete(presets::delete_preset),
        )
        .route("/api/v1/reports", post(reports::create_report))
        .route("/api/v1/reports/latest", get(reports::download_latest))
        .route(
            "/api/v1/accounts",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route("/api/v1/accounts/{id}", delete(accounts::delete_account))
        .route(
            "/api/v1/duplication-check",
            post(duplication::check_duplication),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    ApiResponse::new(req_id.0, HealthData { status: "ok" })
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests {
    use super::test_support::{body_json, TestApp};
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[test]
    fn api_error_codes_map_to_statuses() {
        let cases = [
            ("validation_error", StatusCode::BAD_REQUEST),
            ("report_not_ready", StatusCode::BAD_REQUEST),
            ("unauthorized", StatusCode::UNAUTHORIZED),
            ("forbidden", StatusCode::FORBIDDEN),
            ("not_found", StatusCode::NOT_FOUND),
            ("conflict", StatusCode::CONFLICT),
            ("upstream_error", StatusCode::BAD_GATEWAY),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            let response = ApiError::new("req-1", code, "msg").into_response();
            assert_eq!(response.status(), status, "code {code}");
        }
    }

    #[test]
    fn store_errors_map_to_api_codes() {
        let err = map_store_error("r", &StoreError::Protected("no".to_string()));
        assert_eq!(err.error.code, "forbidden");
        let err = map_store_error("r", &StoreError::Conflict("dup".to_string()));
        assert_eq!(err.error.code, "conflict");
        assert_eq!(err.error.message, "dup");
    }

    #[tokio::test]
    async fn health_returns_ok_and_echoes_request_id() {
        let app = TestApp::new().await;
        let response = app
            .router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("req-health")
        );
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-health");
    }
}
