//! Tokenizer for the free-text `ownership_grants` field.
//!
//! Grammar (version [`ALLOCATION_GRAMMAR_VERSION`]):
//!
//! ```text
//! allocation  := member_list | segment ( "|" segment )+
//! segment     := [ label ":" ] member_list
//! member_list := member ( ( ";" | ":" ) member )*
//! ```
//!
//! * An allocation is categorized as soon as it contains a `|`.
//! * Inside a segment, everything up to the first `:` is the label. A segment
//!   with no label but colon-delimited members therefore loses its first
//!   member to the label; existing logs rely on this reading.
//! * `;` and `:` are interchangeable member delimiters.
//! * Members are normalized with
//!   [`normalize_contributor`](equity_core::names::normalize_contributor); empties are
//!   dropped, duplicates are kept.

use std::sync::OnceLock;

use equity_core::models::AllocationLayout;
use equity_core::names::normalize_all;
use regex::Regex;

/// Version of the grammar documented above.
pub const ALLOCATION_GRAMMAR_VERSION: u32 = 1;

/// Share units granted by a flat (uncategorized) record.
pub const FLAT_POOL: f64 = 1.0;

/// Share units granted to each non-empty category segment.
pub const CATEGORY_POOL: f64 = 0.25;

const CATEGORY_SEPARATOR: char = '|';
const LABEL_SEPARATOR: char = ':';

fn member_delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"[;:]").expect("regex is valid"))
}

/// One `|`-separated category of a categorized allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySegment {
    /// Category name with the trailing `:` removed, if one was given.
    pub label: Option<String>,
    /// Normalized member keys, one per occurrence.
    pub members: Vec<String>,
}

impl CategorySegment {
    /// A segment without members forfeits its pool.
    pub fn is_forfeited(&self) -> bool {
        self.members.is_empty()
    }
}

/// A parsed `ownership_grants` value.
#[derive(Debug, Clone, PartialEq)]
pub enum Allocation {
    Flat { members: Vec<String> },
    Categorized { segments: Vec<CategorySegment> },
}

impl Allocation {
    pub fn layout(&self) -> AllocationLayout {
        match self {
            Allocation::Flat { .. } => AllocationLayout::Flat,
            Allocation::Categorized { segments } => AllocationLayout::Categorized(segments.len()),
        }
    }

    /// Share units this allocation actually puts into the ledger.
    pub fn pool(&self) -> f64 {
        match self {
            Allocation::Flat { members } if members.is_empty() => 0.0,
            Allocation::Flat { .. } => FLAT_POOL,
            Allocation::Categorized { segments } => {
                let funded = segments.iter().filter(|s| !s.is_forfeited()).count();
                CATEGORY_POOL * funded as f64
            }
        }
    }

    /// Total member occurrences across the whole allocation.
    pub fn occurrences(&self) -> usize {
        match self {
            Allocation::Flat { members } => members.len(),
            Allocation::Categorized { segments } => segments.iter().map(|s| s.members.len()).sum(),
        }
    }
}

/// Parse an `ownership_grants` string.
pub fn parse_allocation(raw: &str) -> Allocation {
    if !raw.contains(CATEGORY_SEPARATOR) {
        return Allocation::Flat {
            members: split_members(raw),
        };
    }

    let segments = raw
        .split(CATEGORY_SEPARATOR)
        .map(|segment| parse_segment(segment.trim()))
        .collect();

    Allocation::Categorized { segments }
}

/// Split a member list on `;` and `:` and normalize each token.
pub fn split_members(list: &str) -> Vec<String> {
    normalize_all(member_delimiter().split(list))
}

fn parse_segment(segment: &str) -> CategorySegment {
    match segment.split_once(LABEL_SEPARATOR) {
        Some((label, members)) => CategorySegment {
            label: normalize_label(label),
            members: split_members(members),
        },
        None => CategorySegment {
            label: None,
            members: split_members(segment),
        },
    }
}

fn normalize_label(label: &str) -> Option<String> {
    // Labels keep their case.
    let label = label.trim();
    (!label.is_empty()).then(|| label.to_string())
}
