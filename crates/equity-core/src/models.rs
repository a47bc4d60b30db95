use serde::{Deserialize, Serialize};
use std::fmt;

/// One month's equity allocation event as written in the grant log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrantRecord {
    /// Month label, e.g. `"May, 2024"`. Record-keeping only.
    #[serde(rename = "month", alias = "period", default)]
    pub period: String,
    /// Free-text member list, optionally split into `|`-separated categories.
    #[serde(rename = "ownership_grants", alias = "raw_allocation", default)]
    pub raw_allocation: String,
}

impl GrantRecord {
    pub fn new(period: impl Into<String>, raw_allocation: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            raw_allocation: raw_allocation.into(),
        }
    }
}

/// Transfer amount as it appears on the wire: `"0.25%"` or `0.25`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransferAmount {
    Number(f64),
    Text(String),
}

impl Default for TransferAmount {
    fn default() -> Self {
        TransferAmount::Text(String::new())
    }
}

impl fmt::Display for TransferAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferAmount::Number(n) => write!(f, "{}", n),
            TransferAmount::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A peer-to-peer reassignment of granted share, as written in the grant log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub amount: TransferAmount,
    /// Optional date label, e.g. `"June, 2024"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A transfer whose contributors are normalized and whose amount parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub from_contributor: String,
    pub to_contributor: String,
    /// Share units moved (1.0 == one percent of the company).
    pub amount: f64,
}

/// The complete input document: ordered grants followed by transfers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrantLog {
    #[serde(default)]
    pub grants: Vec<GrantRecord>,
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
}

/// One row of the published ownership table.
///
/// Field names on the wire match the columns the ownership page reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipRow {
    #[serde(rename = "Username")]
    pub username: String,
    /// Share of the amount actually granted so far, in percent.
    #[serde(rename = "Percentage of Granted")]
    pub percentage_of_granted_pool: f64,
    /// Share of the whole company, in percent.
    #[serde(rename = "Percentage of Total")]
    pub percentage_of_total: f64,
}

/// Shape of a grant's allocation string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationLayout {
    /// One pool split across every listed member.
    Flat,
    /// `|`-separated category pools; carries the number of segments.
    Categorized(usize),
}

/// What distributing a single grant record produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GrantSummary {
    pub period: String,
    pub layout: AllocationLayout,
    /// Member occurrences credited (duplicates counted individually).
    pub occurrences: usize,
    /// Share units credited to the ledger by this record.
    pub pool_distributed: f64,
    /// Category segments that had no valid members.
    pub forfeited_segments: usize,
}

/// A non-fatal problem found while processing the grant log.
#[derive(Debug, Clone, PartialEq)]
pub enum RunWarning {
    /// The log contained no grant records at all.
    EmptyGrantLog,
    /// Grant at `index` (0-based) had an empty month or allocation.
    SkippedGrant { index: usize },
    /// A flat grant had no valid members.
    EmptyGrant { period: String },
    /// A category segment had no valid members; its share is not redistributed.
    ForfeitedSegment {
        period: String,
        /// 1-based position of the segment within the allocation.
        segment: usize,
        label: Option<String>,
    },
    /// Transfer at `index` (0-based) was missing its source, target or amount.
    IncompleteTransfer { index: usize },
    /// Transfer amount was not a finite number.
    UnparseableAmount {
        from: String,
        to: String,
        amount: String,
    },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::EmptyGrantLog => write!(f, "Grant log contains no grants"),
            RunWarning::SkippedGrant { index } => write!(
                f,
                "Grant #{} is missing its month or ownership grants. Skipping.",
                index + 1
            ),
            RunWarning::EmptyGrant { period } => {
                write!(f, "Grant for {} names no contributors. Skipping.", period)
            }
            RunWarning::ForfeitedSegment {
                period,
                segment,
                label,
            } => match label {
                Some(label) => write!(
                    f,
                    "Category {} ({}) in grant for {} names no contributors; its share is forfeited.",
                    segment, label, period
                ),
                None => write!(
                    f,
                    "Category {} in grant for {} names no contributors; its share is forfeited.",
                    segment, period
                ),
            },
            RunWarning::IncompleteTransfer { index } => write!(
                f,
                "Transfer #{} is missing its from, to or amount. Skipping.",
                index + 1
            ),
            RunWarning::UnparseableAmount { from, to, amount } => write!(
                f,
                "Could not parse amount '{}' for transfer: {} -> {}. Skipping.",
                amount, from, to
            ),
        }
    }
}
