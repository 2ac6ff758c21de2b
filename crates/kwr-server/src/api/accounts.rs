//! Administrator-only account management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use kwr_store::{AccountView, NewAccount};
use serde::Serialize;

use crate::middleware::RequestId;
use crate::session::AdminAccount;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct AccountList {
    accounts: Vec<AccountView>,
}

#[derive(Debug, Serialize)]
pub(super) struct DeletedAccount {
    id: String,
    deleted: bool,
}

pub(super) async fn list_accounts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    _admin: AdminAccount,
) -> Json<ApiResponse<AccountList>> {
    ApiResponse::new(
        req_id.0,
        AccountList {
            accounts: state.accounts.list(),
        },
    )
}

pub(super) async fn create_account(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    AdminAccount(admin): AdminAccount,
    Json(body): Json<NewAccount>,
) -> Result<(StatusCode, Json<ApiResponse<AccountView>>), ApiError> {
    let view = state
        .accounts
        .create(body)
        .map_err(|e| map_store_error(&req_id.0, &e))?;
    tracing::info!(admin = %admin.id, account = %view.id, "account created");
    Ok((StatusCode::CREATED, ApiResponse::new(req_id.0, view)))
}

pub(super) async fn delete_account(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    AdminAccount(admin): AdminAccount,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedAccount>>, ApiError> {
    state
        .accounts
        .delete(&id)
        .map_err(|e| map_store_error(&req_id.0, &e))?;
    state.sessions.remove_account(id.trim());
    tracing::info!(admin = %admin.id, account = %id, "account deleted");
    Ok(ApiResponse::new(
        req_id.0,
        DeletedAccount {
            id: id.trim().to_string(),
            deleted: true,
        },
    ))
}
