//! Post-grant ownership transfers.
//!
//! Every transfer debits its source and credits its target by the same
//! amount, so the ledger total never changes. Transfers that cannot be read
//! are skipped on both sides and reported as warnings.

use equity_core::models::{RunWarning, Transfer, TransferAmount, TransferRecord};
use equity_core::names::normalize_contributor;
use tracing::{debug, info};

use crate::distributor::record_warning;
use crate::ledger::ContributorLedger;

/// Parse a wire amount such as `"0.575%"`, `" 0.25 "` or `0.25`.
///
/// Returns `None` for empty, non-numeric or non-finite values.
pub fn parse_amount(amount: &TransferAmount) -> Option<f64> {
    let value = match amount {
        TransferAmount::Number(n) => *n,
        TransferAmount::Text(text) => text.replace('%', "").trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Move `transfer.amount` from one contributor to another.
pub fn apply_transfer(ledger: &mut ContributorLedger, transfer: &Transfer) {
    ledger.debit(&transfer.from_contributor, transfer.amount);
    ledger.credit(&transfer.to_contributor, transfer.amount);
}

/// Stateless helper that applies the transfer log to a ledger.
pub struct TransferApplier;

impl TransferApplier {
    /// Apply every readable transfer in input order.
    ///
    /// Returns the transfers that were applied.
    pub fn apply_all(
        records: &[TransferRecord],
        ledger: &mut ContributorLedger,
        warnings: &mut Vec<RunWarning>,
    ) -> Vec<Transfer> {
        if !records.is_empty() {
            info!("Processing additional transfers...");
        }

        let mut applied = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let Some(transfer) = Self::resolve(index, record, warnings) else {
                continue;
            };
            apply_transfer(ledger, &transfer);
            debug!(
                from = %transfer.from_contributor,
                to = %transfer.to_contributor,
                amount = transfer.amount,
                "transfer applied"
            );
            applied.push(transfer);
        }

        applied
    }

    /// Normalize a wire record into a [`Transfer`], or record why it was skipped.
    fn resolve(
        index: usize,
        record: &TransferRecord,
        warnings: &mut Vec<RunWarning>,
    ) -> Option<Transfer> {
        let from = normalize_contributor(&record.from);
        let to = normalize_contributor(&record.to);
        let amount_missing =
            matches!(&record.amount, TransferAmount::Text(text) if text.trim().is_empty());

        let (Some(from), Some(to)) = (from, to) else {
            record_warning(warnings, RunWarning::IncompleteTransfer { index });
            return None;
        };
        if amount_missing {
            record_warning(warnings, RunWarning::IncompleteTransfer { index });
            return None;
        }

        match parse_amount(&record.amount) {
            Some(amount) => Some(Transfer {
                from_contributor: from,
                to_contributor: to,
                amount,
            }),
            None => {
                record_warning(
                    warnings,
                    RunWarning::UnparseableAmount {
                        from,
                        to,
                        amount: record.amount.to_string(),
                    },
                );
                None
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn text_transfer(from: &str, to: &str, amount: &str) -> TransferRecord {
        TransferRecord {
            from: from.to_string(),
            to: to.to_string(),
            amount: TransferAmount::Text(amount.to_string()),
            date: None,
        }
    }

    fn seeded_ledger() -> ContributorLedger {
        let mut ledger = ContributorLedger::new();
        ledger.credit("alice", 0.5);
        ledger.credit("bob", 0.5);
        ledger
    }

    // ── parse_amount ──────────────────────────────────────────────────────────

    #[test]
    fn test_parse_amount_strips_percent() {
        let amount = parse_amount(&TransferAmount::Text("0.575%".to_string())).unwrap();
        assert!((amount - 0.575).abs() < EPS);
    }

    #[test]
    fn test_parse_amount_trims_whitespace() {
        let amount = parse_amount(&TransferAmount::Text(" 0.25 % ".to_string())).unwrap();
        assert!((amount - 0.25).abs() < EPS);
    }

    #[test]
    fn test_parse_amount_number() {
        assert_eq!(parse_amount(&TransferAmount::Number(0.2)), Some(0.2));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount(&TransferAmount::Text("abc%".to_string())).is_none());
        assert!(parse_amount(&TransferAmount::Text("".to_string())).is_none());
    }

    #[test]
    fn test_parse_amount_rejects_non_finite() {
        assert!(parse_amount(&TransferAmount::Text("NaN".to_string())).is_none());
        assert!(parse_amount(&TransferAmount::Text("inf%".to_string())).is_none());
    }

    // ── apply_all ─────────────────────────────────────────────────────────────

    #[test]
    fn test_transfer_moves_share_and_conserves_total() {
        let mut ledger = seeded_ledger();
        let before = ledger.total();
        let mut warnings = Vec::new();

        let applied = TransferApplier::apply_all(
            &[text_transfer("Alice", "Bob", "0.2%")],
            &mut ledger,
            &mut warnings,
        );

        assert_eq!(applied.len(), 1);
        assert!((ledger.share_of("alice") - 0.3).abs() < EPS);
        assert!((ledger.share_of("bob") - 0.7).abs() < EPS);
        assert!((ledger.total() - before).abs() < EPS);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_opposite_transfers_cancel() {
        let mut ledger = seeded_ledger();
        TransferApplier::apply_all(
            &[
                text_transfer("alice", "bob", "0.1"),
                text_transfer("bob", "alice", "0.1"),
            ],
            &mut ledger,
            &mut Vec::new(),
        );
        assert!((ledger.share_of("alice") - 0.5).abs() < EPS);
        assert!((ledger.share_of("bob") - 0.5).abs() < EPS);
    }

    #[test]
    fn test_transfer_creates_missing_entries() {
        let mut ledger = ContributorLedger::new();
        TransferApplier::apply_all(
            &[text_transfer("POM", "ComfyAnonymous", "0.575%")],
            &mut ledger,
            &mut Vec::new(),
        );
        assert!((ledger.share_of("pom") + 0.575).abs() < EPS);
        assert!((ledger.share_of("comfyanonymous") - 0.575).abs() < EPS);
        assert!(ledger.total().abs() < EPS);
    }

    #[test]
    fn test_unparseable_amount_is_skipped_and_others_apply() {
        let mut ledger = seeded_ledger();
        let mut warnings = Vec::new();

        let applied = TransferApplier::apply_all(
            &[
                text_transfer("alice", "bob", "abc%"),
                text_transfer("bob", "alice", "0.1%"),
            ],
            &mut ledger,
            &mut warnings,
        );

        assert_eq!(applied.len(), 1);
        assert!((ledger.share_of("alice") - 0.6).abs() < EPS);
        assert!((ledger.share_of("bob") - 0.4).abs() < EPS);
        assert_eq!(
            warnings,
            vec![RunWarning::UnparseableAmount {
                from: "alice".to_string(),
                to: "bob".to_string(),
                amount: "abc%".to_string(),
            }]
        );
    }

    #[test]
    fn test_incomplete_transfers_are_skipped() {
        let mut ledger = seeded_ledger();
        let mut warnings = Vec::new();

        TransferApplier::apply_all(
            &[
                text_transfer("", "bob", "0.1"),
                text_transfer("alice", "  ", "0.1"),
                text_transfer("alice", "bob", " "),
            ],
            &mut ledger,
            &mut warnings,
        );

        assert_eq!(ledger, seeded_ledger());
        assert_eq!(
            warnings,
            vec![
                RunWarning::IncompleteTransfer { index: 0 },
                RunWarning::IncompleteTransfer { index: 1 },
                RunWarning::IncompleteTransfer { index: 2 },
            ]
        );
    }

    #[test]
    fn test_negative_amount_reverses_direction() {
        let mut ledger = seeded_ledger();
        TransferApplier::apply_all(
            &[text_transfer("alice", "bob", "-0.1")],
            &mut ledger,
            &mut Vec::new(),
        );
        assert!((ledger.share_of("alice") - 0.6).abs() < EPS);
        assert!((ledger.share_of("bob") - 0.4).abs() < EPS);
    }
}
