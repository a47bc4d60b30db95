//! Running per-contributor share totals.

use std::collections::BTreeMap;

/// Accumulates share units per normalized contributor key.
///
/// Backed by a `BTreeMap` so iteration, and therefore float summation, is
/// in key order and reproducible between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributorLedger {
    entries: BTreeMap<String, f64>,
}

impl ContributorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `contributor`, creating the entry at zero if absent.
    pub fn credit(&mut self, contributor: &str, amount: f64) {
        *self.entry(contributor) += amount;
    }

    /// Subtract `amount` from `contributor`, creating the entry at zero if absent.
    pub fn debit(&mut self, contributor: &str, amount: f64) {
        *self.entry(contributor) -= amount;
    }

    /// Current share of `contributor`, or `0.0` if they have no entry.
    pub fn share_of(&self, contributor: &str) -> f64 {
        self.entries.get(contributor).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, contributor: &str) -> bool {
        self.entries.contains_key(contributor)
    }

    /// Sum of every entry.
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn entry(&mut self, contributor: &str) -> &mut f64 {
        self.entries.entry(contributor.to_string()).or_insert(0.0)
    }
}

impl FromIterator<(String, f64)> for ContributorLedger {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut ledger = ContributorLedger::new();
        for (contributor, amount) in iter {
            ledger.credit(&contributor, amount);
        }
        ledger
    }
}
