//! File-backed account and preset stores, plus the per-account cache of the
//! last exported workbook.
//!
//! Each store reads its JSON file fully and rewrites it fully on every
//! mutation. Concurrent writers to the same file can lose updates.

pub mod accounts;
pub mod error;
pub mod exports;
mod file;
pub mod presets;

pub use accounts::{Account, AccountStore, AccountView, NewAccount, DEFAULT_INDUSTRY};
pub use error::StoreError;
pub use exports::{ExportFile, ExportStore, MemoryExportStore};
pub use presets::PresetStore;
