//! Login accounts persisted in a single JSON object keyed by account id.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::StoreError;
use crate::file::{read_json_or_default, write_json_pretty};

pub const DEFAULT_INDUSTRY: &str = "driving";

fn default_industry() -> String {
    DEFAULT_INDUSTRY.to_string()
}

/// Stored account. Passwords are kept as entered.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default = "default_industry")]
    pub industry: String,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("password", &"[redacted]")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("industry", &self.industry)
            .finish()
    }
}

/// Account fields safe to expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub id: String,
    pub name: String,
    pub region: String,
    pub industry: String,
}

impl AccountView {
    fn new(id: &str, account: &Account) -> Self {
        Self {
            id: id.to_string(),
            name: account.name.clone(),
            region: account.region.trim().to_string(),
            industry: account.industry.clone(),
        }
    }
}

/// Input for [`AccountStore::create`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
    admin_id: String,
    accounts: RwLock<BTreeMap<String, Account>>,
}

impl AccountStore {
    /// Loads accounts from `path`. A missing or malformed file yields an
    /// empty store.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, admin_id: impl Into<String>) -> Self {
        let path = path.into();
        let accounts: BTreeMap<String, Account> = read_json_or_default(&path);
        tracing::info!(path = %path.display(), count = accounts.len(), "accounts loaded");
        Self {
            path,
            admin_id: admin_id.into(),
            accounts: RwLock::new(accounts),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_admin(&self, id: &str) -> bool {
        id == self.admin_id
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<AccountView> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts.get(id).map(|a| AccountView::new(id, a))
    }

    /// All accounts ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<AccountView> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts
            .iter()
            .map(|(id, a)| AccountView::new(id, a))
            .collect()
    }

    /// Checks a login. Both inputs are trimmed; the password comparison runs
    /// in constant time.
    #[must_use]
    pub fn verify(&self, id: &str, password: &str) -> Option<AccountView> {
        let id = id.trim();
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        let account = accounts.get(id)?;
        let matches: bool = account
            .password
            .as_bytes()
            .ct_eq(password.trim().as_bytes())
            .into();
        matches.then(|| AccountView::new(id, account))
    }

    /// Adds an account and rewrites the file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] if id, password or name is blank, or the
    ///   id contains path characters.
    /// - [`StoreError::Conflict`] if the id is taken.
    /// - [`StoreError::Io`] / [`StoreError::Encode`] if the file cannot be
    ///   written; the account is not kept in that case.
    pub fn create(&self, input: NewAccount) -> Result<AccountView, StoreError> {
        let id = input.id.trim().to_string();
        let password = input.password.trim().to_string();
        let name = input.name.trim().to_string();
        if id.is_empty() || password.is_empty() || name.is_empty() {
            return Err(StoreError::Validation(
                "아이디, 비밀번호, 이름을 모두 입력해 주세요.".to_string(),
            ));
        }
        if id.contains(['/', '\\']) || id.contains("..") {
            return Err(StoreError::Validation(
                "아이디에 경로 문자를 사용할 수 없습니다.".to_string(),
            ));
        }

        let account = Account {
            password,
            name,
            region: input.region.unwrap_or_default().trim().to_string(),
            industry: input
                .industry
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .unwrap_or_else(default_industry),
        };

        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(&id) {
            return Err(StoreError::Conflict("이미 존재하는 아이디입니다.".to_string()));
        }
        let view = AccountView::new(&id, &account);
        accounts.insert(id.clone(), account);
        if let Err(e) = write_json_pretty(&self.path, &*accounts) {
            accounts.remove(&id);
            return Err(e);
        }

        tracing::info!(account = %id, "account created");
        Ok(view)
    }

    /// Removes an account and rewrites the file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Protected`] for the administrator id or an
    /// unknown id, and [`StoreError::Io`] / [`StoreError::Encode`] if the
    /// file cannot be written.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = id.trim();
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        if id.is_empty() || self.is_admin(id) || !accounts.contains_key(id) {
            return Err(StoreError::Protected(
                "삭제할 수 없는 계정입니다.".to_string(),
            ));
        }

        let removed = accounts.remove(id);
        if let Err(e) = write_json_pretty(&self.path, &*accounts) {
            if let Some(account) = removed {
                accounts.insert(id.to_string(), account);
            }
            return Err(e);
        }

        tracing::info!(account = %id, "account deleted");
        Ok(())
    }
}
