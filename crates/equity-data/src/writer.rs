//! Ownership artifact persistence.

use std::path::Path;

use equity_core::models::OwnershipRow;
use equity_core::{EquityError, Result};
use tracing::info;

/// Atomically write `rows` as a pretty-printed JSON array to `path`,
/// creating parent directories if needed.
pub fn write_ownership_json(path: &Path, rows: &[OwnershipRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows)?;

    let io_err = |source: std::io::Error| EquityError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    // Write to a temp file then rename for atomicity.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;

    info!("Wrote {} ownership rows to {}", rows.len(), path.display());
    Ok(())
}
