use axum::{extract::State, Extension, Json};
use kwr_searchad::{DuplicationCheck, SearchAdError};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::session::CurrentAccount;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct DuplicationRequest {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DuplicationReport {
    results: Vec<DuplicationCheck>,
    message: &'static str,
}

/// POST /api/v1/duplication-check: search sampled sentences of a draft.
pub(super) async fn check_duplication(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    account: CurrentAccount,
    Json(body): Json<DuplicationRequest>,
) -> Result<Json<ApiResponse<DuplicationReport>>, ApiError> {
    let rid = &req_id.0;
    if body.content.trim().is_empty() {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "검사할 원고 내용을 입력해주세요.",
        ));
    }

    let results = match state.dupcheck.check(&body.content).await {
        Ok(results) => results,
        Err(SearchAdError::NoCheckableSentences { min_chars }) => {
            return Err(ApiError::new(
                rid,
                "validation_error",
                format!("검사할 수 있는 긴 문장이 없습니다. ({min_chars}자 이상)"),
            ));
        }
        Err(e) => {
            tracing::error!(account = %account.id, error = %e, "duplication check failed");
            return Err(ApiError::new(
                rid,
                "upstream_error",
                "중복 검사 중 오류가 발생했습니다.",
            ));
        }
    };

    tracing::info!(account = %account.id, sentences = results.len(), "duplication check finished");
    Ok(ApiResponse::new(
        req_id.0,
        DuplicationReport {
            results,
            message: "중복 검사가 완료되었습니다.",
        },
    ))
}
