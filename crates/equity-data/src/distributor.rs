//! Monthly grant distribution.
//!
//! A flat grant splits [`FLAT_POOL`] evenly across its member occurrences. A
//! categorized grant gives every non-empty segment [`CATEGORY_POOL`], split
//! evenly across that segment's occurrences. Empty segments forfeit their
//! pool; it is not handed to the other categories.

use equity_core::models::{GrantRecord, GrantSummary, RunWarning};
use tracing::{debug, warn};

use crate::allocation::{parse_allocation, Allocation, CATEGORY_POOL, FLAT_POOL};
use crate::ledger::ContributorLedger;

/// Stateless helper that credits grant records into a ledger.
pub struct GrantDistributor;

impl GrantDistributor {
    /// Distribute every record in input order.
    ///
    /// Records with an empty month or allocation are skipped with a warning.
    pub fn distribute_all(
        records: &[GrantRecord],
        ledger: &mut ContributorLedger,
        warnings: &mut Vec<RunWarning>,
    ) -> Vec<GrantSummary> {
        let mut summaries = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if record.period.trim().is_empty() || record.raw_allocation.trim().is_empty() {
                record_warning(warnings, RunWarning::SkippedGrant { index });
                continue;
            }
            summaries.push(Self::distribute(record, ledger, warnings));
        }

        debug!(
            "Distributed {} of {} grant records",
            summaries.len(),
            records.len()
        );

        summaries
    }

    /// Credit a single record into `ledger`.
    pub fn distribute(
        record: &GrantRecord,
        ledger: &mut ContributorLedger,
        warnings: &mut Vec<RunWarning>,
    ) -> GrantSummary {
        let period = record.period.trim().to_string();
        let allocation = parse_allocation(record.raw_allocation.trim());
        let mut forfeited_segments = 0;

        match &allocation {
            Allocation::Flat { members } => {
                if members.is_empty() {
                    record_warning(
                        warnings,
                        RunWarning::EmptyGrant {
                            period: period.clone(),
                        },
                    );
                } else {
                    credit_evenly(members, FLAT_POOL, ledger);
                }
            }
            Allocation::Categorized { segments } => {
                for (i, segment) in segments.iter().enumerate() {
                    if segment.is_forfeited() {
                        forfeited_segments += 1;
                        record_warning(
                            warnings,
                            RunWarning::ForfeitedSegment {
                                period: period.clone(),
                                segment: i + 1,
                                label: segment.label.clone(),
                            },
                        );
                        continue;
                    }
                    credit_evenly(&segment.members, CATEGORY_POOL, ledger);
                }
            }
        }

        let summary = GrantSummary {
            period,
            layout: allocation.layout(),
            occurrences: allocation.occurrences(),
            pool_distributed: allocation.pool(),
            forfeited_segments,
        };

        debug!(
            period = %summary.period,
            occurrences = summary.occurrences,
            pool = summary.pool_distributed,
            "grant distributed"
        );

        summary
    }
}

/// Log a warning as it happens and keep it for the final report.
pub(crate) fn record_warning(warnings: &mut Vec<RunWarning>, warning: RunWarning) {
    warn!("{}", warning);
    warnings.push(warning);
}

fn credit_evenly(members: &[String], pool: f64, ledger: &mut ContributorLedger) {
    if members.is_empty() {
        return;
    }
    let share = pool / members.len() as f64;
    for member in members {
        ledger.credit(member, share);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use equity_core::models::AllocationLayout;

    const EPS: f64 = 1e-12;

    fn distribute_one(raw: &str) -> (ContributorLedger, GrantSummary, Vec<RunWarning>) {
        let mut ledger = ContributorLedger::new();
        let mut warnings = Vec::new();
        let summary =
            GrantDistributor::distribute(&GrantRecord::new("May, 2024", raw), &mut ledger, &mut warnings);
        (ledger, summary, warnings)
    }

    #[test]
    fn test_flat_grant_splits_evenly() {
        let (ledger, summary, warnings) = distribute_one("Alice; Bob");

        assert!((ledger.share_of("alice") - 0.5).abs() < EPS);
        assert!((ledger.share_of("bob") - 0.5).abs() < EPS);
        assert!((ledger.total() - 1.0).abs() < EPS);
        assert_eq!(summary.layout, AllocationLayout::Flat);
        assert_eq!(summary.occurrences, 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_flat_grant_conserves_one_unit() {
        let (ledger, _, _) = distribute_one("a; b; c; d; e; f; g");
        assert!((ledger.total() - 1.0).abs() < EPS);
        assert!((ledger.share_of("d") - 1.0 / 7.0).abs() < EPS);
    }

    #[test]
    fn test_categorized_grant_weights_by_category() {
        let (ledger, summary, warnings) = distribute_one("CORE: Alice | ART: Bob; Carol");

        assert!((ledger.share_of("alice") - 0.25).abs() < EPS);
        assert!((ledger.share_of("bob") - 0.125).abs() < EPS);
        assert!((ledger.share_of("carol") - 0.125).abs() < EPS);
        assert!((ledger.total() - 0.5).abs() < EPS);
        assert_eq!(summary.layout, AllocationLayout::Categorized(2));
        assert!((summary.pool_distributed - 0.5).abs() < EPS);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_categorized_grant_conserves_quarter_per_category() {
        let (ledger, _, _) =
            distribute_one("CORE: a;b;c | INFRASTRUCTURE: d:e | KNOWLEDGE: f | ART: g;h;i;j;k");
        assert!((ledger.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_contributor_in_several_categories_accumulates() {
        let (ledger, _, _) = distribute_one("CORE: Alice | ART: alice; Bob");
        assert!((ledger.share_of("alice") - 0.375).abs() < EPS);
    }

    #[test]
    fn test_duplicate_occurrence_earns_two_shares() {
        let (ledger, _, _) = distribute_one("Alice; Bob; alice");
        assert!((ledger.share_of("alice") - 2.0 / 3.0).abs() < EPS);
        assert!((ledger.share_of("bob") - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_forfeited_segment_is_not_redistributed() {
        let (ledger, summary, warnings) = distribute_one("CORE: Alice | ART: ;");

        assert!((ledger.share_of("alice") - 0.25).abs() < EPS);
        assert!((ledger.total() - 0.25).abs() < EPS);
        assert_eq!(summary.forfeited_segments, 1);
        assert_eq!(
            warnings,
            vec![RunWarning::ForfeitedSegment {
                period: "May, 2024".to_string(),
                segment: 2,
                label: Some("ART".to_string()),
            }]
        );
    }

    #[test]
    fn test_delimiter_only_grant_contributes_nothing() {
        let (ledger, summary, warnings) = distribute_one(" ; ; : ");

        assert!(ledger.is_empty());
        assert_eq!(summary.pool_distributed, 0.0);
        assert_eq!(
            warnings,
            vec![RunWarning::EmptyGrant {
                period: "May, 2024".to_string()
            }]
        );
    }

    #[test]
    fn test_distribute_all_skips_blank_records() {
        let records = vec![
            GrantRecord::new("", "Alice"),
            GrantRecord::new("June, 2024", "   "),
            GrantRecord::new("July, 2024", "Bob"),
        ];
        let mut ledger = ContributorLedger::new();
        let mut warnings = Vec::new();

        let summaries = GrantDistributor::distribute_all(&records, &mut ledger, &mut warnings);

        assert_eq!(summaries.len(), 1);
        assert!(!ledger.contains("alice"));
        assert!((ledger.share_of("bob") - 1.0).abs() < EPS);
        assert_eq!(
            warnings,
            vec![
                RunWarning::SkippedGrant { index: 0 },
                RunWarning::SkippedGrant { index: 1 },
            ]
        );
    }

    #[test]
    fn test_distribution_is_order_independent() {
        let records = vec![
            GrantRecord::new("Nov, 2022", "POM"),
            GrantRecord::new("May, 2023", "POM; Lone_Samurai"),
            GrantRecord::new("Mar, 2024", "CORE: lone_samurai;POM | ART: Adam; jeru | INFRA: Kijai"),
            GrantRecord::new("Jun, 2024", "kijai; adam; toyxyz"),
        ];
        let mut reversed = records.clone();
        reversed.reverse();
        let mut rotated = records.clone();
        rotated.rotate_left(2);

        let run = |records: &[GrantRecord]| {
            let mut ledger = ContributorLedger::new();
            GrantDistributor::distribute_all(records, &mut ledger, &mut Vec::new());
            ledger
        };
        let baseline = run(&records);

        for permuted in [run(&reversed), run(&rotated)] {
            assert_eq!(permuted.len(), baseline.len());
            for (name, share) in baseline.iter() {
                assert!(
                    (permuted.share_of(name) - share).abs() < EPS,
                    "{name} differs after permutation"
                );
            }
        }
    }
}
