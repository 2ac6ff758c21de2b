//! Named keyword-list presets, one JSON file per account.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::file::{read_json_or_default, write_json_pretty};

/// Stores `{presets_dir}/presets_{account}.json`, a name → raw keyword string
/// object. Keyword strings are stored verbatim.
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
}

impl PresetStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, account: &str) -> PathBuf {
        self.dir.join(format!("presets_{account}.json"))
    }

    /// All presets for `account`. An unreadable file reads as empty.
    #[must_use]
    pub fn list(&self, account: &str) -> BTreeMap<String, String> {
        read_json_or_default(&self.path_for(account))
    }

    /// # Errors
    ///
    /// [`StoreError::Validation`] for a blank name, [`StoreError::NotFound`]
    /// for an unknown one.
    pub fn get(&self, account: &str, name: &str) -> Result<String, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "불러올 프리셋을 선택해 주세요.".to_string(),
            ));
        }
        self.list(account)
            .remove(name)
            .ok_or_else(|| StoreError::NotFound("해당 프리셋을 찾을 수 없습니다.".to_string()))
    }

    /// Inserts or replaces a preset.
    ///
    /// # Errors
    ///
    /// [`StoreError::Validation`] if the name or keywords are blank;
    /// [`StoreError::Io`] / [`StoreError::Encode`] if the file cannot be
    /// written.
    pub fn save(&self, account: &str, name: &str, keywords: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "프리셋 이름을 입력해 주세요.".to_string(),
            ));
        }
        if keywords.trim().is_empty() {
            return Err(StoreError::Validation(
                "현재 키워드가 비어 있어 저장할 수 없습니다.".to_string(),
            ));
        }

        let mut presets = self.list(account);
        presets.insert(name.to_string(), keywords.to_string());
        write_json_pretty(&self.path_for(account), &presets)?;
        tracing::info!(account, preset = name, "preset saved");
        Ok(())
    }

    /// # Errors
    ///
    /// [`StoreError::Validation`] for a blank name, [`StoreError::NotFound`]
    /// if it does not exist, and write errors as for [`PresetStore::save`].
    pub fn delete(&self, account: &str, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "삭제할 프리셋을 먼저 선택해 주세요.".to_string(),
            ));
        }

        let mut presets = self.list(account);
        if presets.remove(name).is_none() {
            return Err(StoreError::NotFound(
                "해당 프리셋을 찾을 수 없습니다.".to_string(),
            ));
        }
        write_json_pretty(&self.path_for(account), &presets)?;
        tracing::info!(account, preset = name, "preset deleted");
        Ok(())
    }
}
