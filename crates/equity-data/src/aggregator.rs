//! Ledger to ownership table.
//!
//! Percentages are rounded only here, when rows are emitted; the ledger keeps
//! full precision.

use std::cmp::Ordering;

use equity_core::formatting::{percentage, round_to, DISPLAY_PRECISION};
use equity_core::models::OwnershipRow;

use crate::ledger::ContributorLedger;

/// The final ownership table plus the figure it is normalized against.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipReport {
    /// Sum of every ledger entry, unrounded. Percent of the company granted.
    pub total_granted: f64,
    /// Rows sorted by share, largest first.
    pub rows: Vec<OwnershipRow>,
}

impl OwnershipReport {
    pub fn row(&self, username: &str) -> Option<&OwnershipRow> {
        self.rows.iter().find(|r| r.username == username)
    }
}

/// Stateless helper that turns a ledger into an [`OwnershipReport`].
pub struct OwnershipAggregator;

impl OwnershipAggregator {
    /// Build one row per ledger entry, including entries that net to zero.
    ///
    /// Rows are ordered by the displayed `percentage_of_total`, descending,
    /// with ties broken by username ascending.
    pub fn build_report(ledger: &ContributorLedger) -> OwnershipReport {
        let total_granted = ledger.total();

        let mut rows: Vec<OwnershipRow> = ledger
            .iter()
            .map(|(username, share)| OwnershipRow {
                username: username.to_string(),
                percentage_of_granted_pool: percentage(share, total_granted, DISPLAY_PRECISION),
                percentage_of_total: round_to(share, DISPLAY_PRECISION),
            })
            .collect();

        rows.sort_by(compare_rows);

        OwnershipReport {
            total_granted,
            rows,
        }
    }
}

fn compare_rows(a: &OwnershipRow, b: &OwnershipRow) -> Ordering {
    b.percentage_of_total
        .total_cmp(&a.percentage_of_total)
        .then_with(|| a.username.cmp(&b.username))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
