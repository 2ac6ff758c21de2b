use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::session::CurrentAccount;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SavePresetRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    keywords: String,
}

#[derive(Debug, Serialize)]
pub(super) struct PresetView {
    name: String,
    keywords: String,
}

#[derive(Debug, Serialize)]
pub(super) struct PresetList {
    presets: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(super) struct PresetMessage {
    name: String,
    message: String,
}

pub(super) async fn list_presets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    account: CurrentAccount,
) -> Json<ApiResponse<PresetList>> {
    let presets = state.presets.list(&account.id);
    ApiResponse::new(req_id.0, PresetList { presets })
}

pub(super) async fn get_preset(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    account: CurrentAccount,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<PresetView>>, ApiError> {
    let keywords = state
        .presets
        .get(&account.id, &name)
        .map_err(|e| map_store_error(&req_id.0, &e))?;
    Ok(ApiResponse::new(
        req_id.0,
        PresetView {
            name: name.trim().to_string(),
            keywords,
        },
    ))
}

pub(super) async fn save_preset(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    account: CurrentAccount,
    Json(body): Json<SavePresetRequest>,
) -> Result<Json<ApiResponse<PresetMessage>>, ApiError> {
    state
        .presets
        .save(&account.id, &body.name, &body.keywords)
        .map_err(|e| map_store_error(&req_id.0, &e))?;
    let name = body.name.trim().to_string();
    let message = format!("'{name}' 프리셋을 저장했습니다.");
    Ok(ApiResponse::new(req_id.0, PresetMessage { name, message }))
}

pub(super) async fn delete_preset(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    account: CurrentAccount,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<PresetMessage>>, ApiError> {
    state
        .presets
        .delete(&account.id, &name)
        .map_err(|e| map_store_error(&req_id.0, &e))?;
    let name = name.trim().to_string();
    let message = format!("'{name}' 프리셋을 삭제했습니다.");
    Ok(ApiResponse::new(req_id.0, PresetMessage { name, message }))
}
