//! Last generated workbook per account.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Holds at most one export per account; a new export replaces the old one.
pub trait ExportStore: Send + Sync {
    fn put(&self, account: &str, file: ExportFile);
    fn get(&self, account: &str) -> Option<Arc<ExportFile>>;
}

/// In-process export cache. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryExportStore {
    files: Mutex<HashMap<String, Arc<ExportFile>>>,
}

impl MemoryExportStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExportStore for MemoryExportStore {
    fn put(&self, account: &str, file: ExportFile) {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.insert(account.to_string(), Arc::new(file));
    }

    fn get(&self, account: &str) -> Option<Arc<ExportFile>> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.get(account).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> ExportFile {
        ExportFile {
            filename: name.to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn get_before_put_is_none() {
        let store = MemoryExportStore::new();
        assert!(store.get("gn01").is_none());
    }

    #[test]
    fn put_replaces_previous_export() {
        let store = MemoryExportStore::new();
        store.put("gn01", file("first.xlsx"));
        store.put("gn01", file("second.xlsx"));
        assert_eq!(store.get("gn01").expect("export").filename, "second.xlsx");
    }

    #[test]
    fn exports_are_not_shared_between_accounts() {
        let store = MemoryExportStore::new();
        store.put("gn01", file("gn.xlsx"));
        assert!(store.get("jj01").is_none());
    }
}
