//! Grant log loading.
//!
//! Reads the JSON grant log that the ownership page's maintainers edit by
//! hand. A missing or unparseable log is fatal; everything inside a readable
//! log is validated later, record by record.

use std::path::Path;

use equity_core::models::GrantLog;
use equity_core::{EquityError, Result};
use tracing::debug;

/// Load the grant log at `path`.
pub fn load_grant_log(path: &Path) -> Result<GrantLog> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            EquityError::InputNotFound(path.to_path_buf())
        } else {
            EquityError::InputRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let log = parse_grant_log(&content, path)?;

    debug!(
        "Loaded {} grants and {} transfers from {}",
        log.grants.len(),
        log.transfers.len(),
        path.display()
    );

    Ok(log)
}

/// Parse a grant log document. `path` is only used for error context.
pub fn parse_grant_log(content: &str, path: &Path) -> Result<GrantLog> {
    serde_json::from_str(content).map_err(|source| EquityError::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
