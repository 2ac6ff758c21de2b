use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Reads a JSON document, yielding `T::default()` when the file is missing
/// or unreadable.
pub(crate) fn read_json_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "store file unreadable; starting empty");
            return T::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "store file malformed; starting empty");
        T::default()
    })
}

/// Rewrites `path` with the pretty-printed JSON form of `value`.
pub(crate) fn write_json_pretty<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Encode {
        path: path.display().to_string(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
