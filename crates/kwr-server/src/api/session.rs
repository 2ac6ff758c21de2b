//! Login, logout and the current-session view.

use axum::{extract::State, Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::session::{expired_session_cookie, session_cookie, CurrentAccount, SESSION_COOKIE};

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct LoginRequest {
    #[serde(default)]
    id: String,
    #[serde(default)]
    password: String,
}

/// Account details plus the wording of its industry template.
#[derive(Debug, Serialize)]
pub(super) struct SessionView {
    id: String,
    name: String,
    region: String,
    industry: String,
    industry_label: String,
    report_title: String,
    good_keyword_rule: String,
    is_admin: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct LogoutResponse {
    logged_out: bool,
}

fn session_view(state: &AppState, request_id: &str, id: &str) -> Result<SessionView, ApiError> {
    let account = state
        .accounts
        .get(id)
        .ok_or_else(|| ApiError::new(request_id, "unauthorized", "로그인이 필요합니다."))?;
    let template = state.templates.load(&account.industry);
    Ok(SessionView {
        is_admin: state.accounts.is_admin(&account.id),
        id: account.id,
        name: account.name,
        region: account.region,
        industry: account.industry,
        industry_label: template.industry,
        report_title: template.report_title,
        good_keyword_rule: template.good_keyword_rule,
    })
}

/// POST /api/v1/session: log in with id and password.
pub(super) async fn login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionView>>), ApiError> {
    let rid = &req_id.0;
    let Some(account) = state.accounts.verify(&body.id, &body.password) else {
        tracing::info!(account = %body.id.trim(), "login rejected");
        return Err(ApiError::new(
            rid,
            "unauthorized",
            "아이디 또는 비밀번호가 올바르지 않습니다.",
        ));
    };

    let token = state.sessions.create(&account.id);
    let view = session_view(&state, rid, &account.id)?;
    tracing::info!(account = %account.id, "login succeeded");

    Ok((
        jar.add(session_cookie(token)),
        ApiResponse::new(req_id.0, view),
    ))
}

/// DELETE /api/v1/session: log out. Always succeeds.
pub(super) async fn logout(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<LogoutResponse>>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value());
    }
    (
        jar.remove(expired_session_cookie()),
        ApiResponse::new(req_id.0, LogoutResponse { logged_out: true }),
    )
}

/// GET /api/v1/session: the logged-in account.
pub(super) async fn current_session(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    account: CurrentAccount,
) -> Result<Json<ApiResponse<SessionView>>, ApiError> {
    let view = session_view(&state, &req_id.0, &account.id)?;
    Ok(ApiResponse::new(req_id.0, view))
}
