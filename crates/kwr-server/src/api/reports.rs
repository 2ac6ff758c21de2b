use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Local;
use kwr_report::{
    export_filename, generate_report, ReportError, ReportParams, ReportResult, SortBy,
    XLSX_CONTENT_TYPE,
};
use kwr_store::ExportFile;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::Value;

use crate::middleware::RequestId;
use crate::session::CurrentAccount;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ReportRequest {
    #[serde(default)]
    keywords: String,
    #[serde(default)]
    min_total: Option<Value>,
    #[serde(default)]
    max_comp: Option<Value>,
    #[serde(default)]
    sort_by: Option<String>,
}

/// Splits a comma-separated keyword list, dropping blank entries.
fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect()
}

fn map_report_error(request_id: &str, error: &ReportError) -> ApiError {
    match error {
        ReportError::NoBaseKeywords => ApiError::new(
            request_id,
            "validation_error",
            "기준 키워드를 하나 이상 입력해 주세요.",
        ),
        ReportError::Remote { .. } => ApiError::new(
            request_id,
            "upstream_error",
            "키워드 API 호출에 실패했습니다. 잠시 후 다시 시도해 주세요.",
        ),
        ReportError::Export(_) => {
            tracing::error!(error = %error, "workbook export failed");
            ApiError::new(request_id, "internal_error", "failed to build spreadsheet")
        }
    }
}

/// POST /api/v1/reports: generate a report for the logged-in account.
pub(super) async fn create_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    account: CurrentAccount,
    Json(body): Json<ReportRequest>,
) -> Result<Json<ApiResponse<ReportResult>>, ApiError> {
    let rid = &req_id.0;
    let base_keywords = split_keywords(&body.keywords);
    if base_keywords.is_empty() {
        return Err(map_report_error(rid, &ReportError::NoBaseKeywords));
    }

    let profile = state
        .accounts
        .get(&account.id)
        .ok_or_else(|| ApiError::new(rid, "unauthorized", "로그인이 필요합니다."))?;
    let template = state.templates.load(&profile.industry);

    let params = ReportParams {
        base_keywords,
        min_total: kwr_searchad::to_int(body.min_total.as_ref()),
        max_competition: kwr_searchad::to_float(body.max_comp.as_ref()),
        sort_by: body.sort_by.as_deref().map(SortBy::parse).unwrap_or_default(),
        region: profile.region,
    };

    let generated = generate_report(
        state.searchad.as_ref(),
        &params,
        &template,
        &state.company,
        state.inter_request_delay(),
    )
    .await
    .map_err(|e| map_report_error(rid, &e))?;

    if let Some(bytes) = generated.workbook {
        let filename = export_filename(
            &state.config.export_filename_prefix,
            &account.id,
            Local::now().naive_local(),
        );
        tracing::info!(account = %account.id, filename = %filename, "workbook cached for download");
        state.exports.put(&account.id, ExportFile { filename, bytes });
    }

    Ok(ApiResponse::new(req_id.0, generated.result))
}

fn attachment_disposition(filename: &str) -> Option<HeaderValue> {
    let encoded = utf8_percent_encode(filename, NON_ALPHANUMERIC);
    HeaderValue::from_str(&format!("attachment; filename*=UTF-8''{encoded}")).ok()
}

/// GET /api/v1/reports/latest: download the account's last workbook.
pub(super) async fn download_latest(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    account: CurrentAccount,
) -> Result<Response, ApiError> {
    let rid = &req_id.0;
    let file = state
        .exports
        .get(&account.id)
        .ok_or_else(|| ApiError::new(rid, "report_not_ready", "generate a report first"))?;
    let disposition = attachment_disposition(&file.filename)
        .ok_or_else(|| ApiError::new(rid, "internal_error", "invalid export filename"))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes.clone(),
    )
        .into_response())
}
