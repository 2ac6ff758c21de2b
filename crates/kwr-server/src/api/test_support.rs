//! Shared fixtures for route tests: temp-dir backed stores and a mock
//! upstream server standing in for both the keyword API and web search.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use kwr_core::{AppConfig, Environment};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::MockServer;

use super::{build_app, AppState};

pub(crate) struct TestApp {
    _dir: TempDir,
    pub server: MockServer,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        let accounts_path = dir.path().join("accounts.json");
        std::fs::write(
            &accounts_path,
            r#"{
                "admin": {"password": "root", "name": "관리자", "region": "", "industry": "driving"},
                "gn01": {"password": "pw1", "name": "강릉점", "region": "강릉", "industry": "food"}
            }"#,
        )
        .expect("seed accounts");

        let templates_dir = dir.path().join("templates");
        std::fs::create_dir(&templates_dir).expect("templates dir");
        std::fs::write(
            templates_dir.join("food.json"),
            r#"{"industry": "맛집", "report_title": "맛집 키워드 리포트"}"#,
        )
        .expect("seed template");

        let config = AppConfig {
            env: Environment::Test,
            bind_addr: "127.0.0.1:0".parse().expect("bind addr"),
            log_level: "debug".to_string(),
            searchad_base_url: server.uri(),
            searchad_api_key: "test-key".to_string(),
            searchad_secret_key: "test-secret".to_string(),
            searchad_customer_id: "1234".to_string(),
            searchad_timeout_secs: 5,
            inter_request_delay_ms: 0,
            accounts_path,
            presets_dir: dir.path().to_path_buf(),
            templates_dir,
            company_info_path: None,
            admin_account: "admin".to_string(),
            export_filename_prefix: "Keyword_Report".to_string(),
            dupcheck_search_url: format!("{}/search.naver", server.uri()),
        };

        let state = AppState::from_config(Arc::new(config)).expect("app state");
        Self {
            _dir: dir,
            server,
            state,
        }
    }

    pub fn router(&self) -> Router {
        build_app(self.state.clone())
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response")
    }

    /// Logs in and returns the `name=value` cookie pair.
    pub async fn login(&self, id: &str, password: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/api/v1/session",
                None,
                Some(serde_json::json!({ "id": id, "password": password })),
            )
            .await;
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .expect("set-cookie header");
        set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string()
    }
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}
