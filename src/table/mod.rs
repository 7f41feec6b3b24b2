// Frequency table — per-term counts stratified by category membership.
//
// The table is an immutable snapshot once built. Terms are kept in a BTreeMap
// so iteration order is stable across runs and platforms.

pub mod builder;

pub use builder::FrequencyTableBuilder;

use std::collections::BTreeMap;

use serde::Serialize;

/// Raw per-term counts gathered while scanning the corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TermCounts {
    /// In-category documents containing the term.
    pub in_docs: u64,
    /// Background documents containing the term.
    pub out_docs: u64,
    /// Total occurrences across in-category documents.
    pub in_occurrences: u64,
    /// Total occurrences across background documents.
    pub out_occurrences: u64,
}

/// The 2x2 contingency table for one term against one category.
///
/// `n11` term present & in-category, `n10` present & background,
/// `n01` absent & in-category, `n00` absent & background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContingencyCounts {
    pub n11: u64,
    pub n10: u64,
    pub n01: u64,
    pub n00: u64,
}

impl ContingencyCounts {
    pub fn new(n11: u64, n10: u64, n01: u64, n00: u64) -> Self {
        Self { n11, n10, n01, n00 }
    }

    pub fn total(&self) -> u64 {
        self.n11 + self.n10 + self.n01 + self.n00
    }

    /// Documents containing the term.
    pub fn present(&self) -> u64 {
        self.n11 + self.n10
    }

    /// Documents not containing the term.
    pub fn absent(&self) -> u64 {
        self.n01 + self.n00
    }

    /// In-category documents.
    pub fn in_category(&self) -> u64 {
        self.n11 + self.n01
    }

    /// Background documents.
    pub fn background(&self) -> u64 {
        self.n10 + self.n00
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    terms: BTreeMap<String, TermCounts>,
    in_category_docs: u64,
    background_docs: u64,
}

impl FrequencyTable {
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn in_category_docs(&self) -> u64 {
        self.in_category_docs
    }

    pub fn background_docs(&self) -> u64 {
        self.background_docs
    }

    pub fn total_docs(&self) -> u64 {
        self.in_category_docs + self.background_docs
    }

    pub fn get(&self, term: &str) -> Option<&TermCounts> {
        self.terms.get(term)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Iterate terms in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermCounts)> {
        self.terms.iter().map(|(t, c)| (t.as_str(), c))
    }

    /// Contingency table for `term`. Unknown terms get an all-absent table,
    /// which scores zero on every metric.
    pub fn contingency(&self, term: &str) -> ContingencyCounts {
        let counts = self.terms.get(term).copied().unwrap_or_default();
        self.contingency_for(&counts)
    }

    pub fn contingency_for(&self, counts: &TermCounts) -> ContingencyCounts {
        ContingencyCounts {
            n11: counts.in_docs,
            n10: counts.out_docs,
            n01: self.in_category_docs - counts.in_docs,
            n00: self.background_docs - counts.out_docs,
        }
    }
}
