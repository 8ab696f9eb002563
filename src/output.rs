use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Overwrites `path` with `records` as a pretty-printed JSON array.
pub fn write_json<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}
