//! Main calculation pipeline.
//!
//! Runs the grant log through distribution, transfers and aggregation,
//! returning a [`CalculationResult`] ready for the console report and the
//! ownership artifact.

use std::path::Path;

use chrono::Utc;
use equity_core::models::{GrantLog, GrantSummary, RunWarning, Transfer};
use equity_core::Result;
use tracing::debug;

use crate::aggregator::{OwnershipAggregator, OwnershipReport};
use crate::allocation::ALLOCATION_GRAMMAR_VERSION;
use crate::distributor::{record_warning, GrantDistributor};
use crate::ledger::ContributorLedger;
use crate::reader::load_grant_log;
use crate::transfers::TransferApplier;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the calculation result.
#[derive(Debug, Clone)]
pub struct RunMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Version of the allocation grammar the grants were read with.
    pub grammar_version: u32,
    /// Grant records present in the log.
    pub grants_read: usize,
    /// Grant records that reached the distributor.
    pub grants_distributed: usize,
    /// Transfer records present in the log.
    pub transfers_read: usize,
    /// Transfer records applied to the ledger.
    pub transfers_applied: usize,
    /// Distinct contributors in the final ledger.
    pub contributors: usize,
    /// Wall-clock seconds spent on the calculation.
    pub calculation_time_seconds: f64,
}

/// The complete output of [`calculate_ownership`].
#[derive(Debug, Clone)]
pub struct CalculationResult {
    /// Final per-contributor totals, unrounded.
    pub ledger: ContributorLedger,
    /// Sorted, rounded ownership table.
    pub report: OwnershipReport,
    /// One summary per distributed grant, in input order.
    pub grants: Vec<GrantSummary>,
    /// Transfers that were applied, in input order.
    pub transfers: Vec<Transfer>,
    /// Every non-fatal problem, in the order it was found.
    pub warnings: Vec<RunWarning>,
    pub metadata: RunMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full calculation over an already-loaded grant log.
///
/// 1. Distribute every grant into a fresh ledger.
/// 2. Apply every transfer.
/// 3. Aggregate the ledger into an [`OwnershipReport`].
pub fn calculate_ownership(log: &GrantLog) -> CalculationResult {
    let start = std::time::Instant::now();
    let mut ledger = ContributorLedger::new();
    let mut warnings = Vec::new();

    // ── Step 1: Grants ────────────────────────────────────────────────────────
    if log.grants.is_empty() {
        record_warning(&mut warnings, RunWarning::EmptyGrantLog);
    }
    let grants = GrantDistributor::distribute_all(&log.grants, &mut ledger, &mut warnings);

    // ── Step 2: Transfers ─────────────────────────────────────────────────────
    let transfers = TransferApplier::apply_all(&log.transfers, &mut ledger, &mut warnings);

    // ── Step 3: Aggregate ─────────────────────────────────────────────────────
    let report = OwnershipAggregator::build_report(&ledger);

    let metadata = RunMetadata {
        generated_at: Utc::now().to_rfc3339(),
        grammar_version: ALLOCATION_GRAMMAR_VERSION,
        grants_read: log.grants.len(),
        grants_distributed: grants.len(),
        transfers_read: log.transfers.len(),
        transfers_applied: transfers.len(),
        contributors: ledger.len(),
        calculation_time_seconds: start.elapsed().as_secs_f64(),
    };

    debug!(?metadata, "calculation finished");

    CalculationResult {
        ledger,
        report,
        grants,
        transfers,
        warnings,
        metadata,
    }
}

/// Load the grant log at `path` and run [`calculate_ownership`] on it.
pub fn calculate_from_path(path: &Path) -> Result<CalculationResult> {
    let log = load_grant_log(path)?;
    Ok(calculate_ownership(&log))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
