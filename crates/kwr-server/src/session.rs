//! Cookie-backed login sessions.
//!
//! A login mints a random token, maps it to the account id in memory and
//! hands it to the browser as an HTTP-only cookie. Sessions do not survive a
//! restart.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

use crate::api::{ApiError, AppState};
use crate::middleware::RequestId;

pub const SESSION_COOKIE: &str = "kwr_session";
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Default)]
pub struct SessionStore {
    tokens: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    /// Starts a session for `account` and returns its token.
    pub fn create(&self, account: &str) -> String {
        let mut bytes = [0_u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.insert(token.clone(), account.to_string());
        token
    }

    pub fn resolve(&self, token: &str) -> Option<String> {
        let tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.get(token).cloned()
    }

    pub fn remove(&self, token: &str) {
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.remove(token);
    }

    /// Ends every session held by `account`.
    pub fn remove_account(&self, account: &str) {
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.retain(|_, owner| owner != account);
    }
}

#[must_use]
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[must_use]
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// The logged-in account behind the request's session cookie.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub id: String,
}

/// A [`CurrentAccount`] that is also the administrator.
#[derive(Debug, Clone)]
pub struct AdminAccount(pub CurrentAccount);

fn request_id(parts: &Parts) -> String {
    parts
        .extensions
        .get::<RequestId>()
        .map_or_else(|| "unknown".to_string(), |r| r.0.clone())
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| state.sessions.resolve(cookie.value()));

        match session {
            // The account may have been deleted since login.
            Some(id) if state.accounts.get(&id).is_some() => Ok(Self { id }),
            _ => Err(ApiError::new(
                request_id(parts),
                "unauthorized",
                "로그인이 필요합니다.",
            )),
        }
    }
}

impl FromRequestParts<AppState> for AdminAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let account = CurrentAccount::from_request_parts(parts, state).await?;
        if state.accounts.is_admin(&account.id) {
            Ok(Self(account))
        } else {
            Err(ApiError::new(
                request_id(parts),
                "forbidden",
                "관리자만 사용할 수 있습니다.",
            ))
        }
    }
}
