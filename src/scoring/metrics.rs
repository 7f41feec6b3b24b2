// Mutual information and chi-squared over a 2x2 contingency table.
//
// Both metrics measure how far a term's presence departs from independence
// with the category label. Both are exactly 0.0 for an independent term and
// for degenerate tables (no documents, or a marginal of zero).

use serde::Serialize;

use crate::table::{ContingencyCounts, FrequencyTable, TermCounts};

/// Scores for one term against one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TermStatistics {
    /// Mutual information between term presence and category label, in bits.
    pub mutual_information: f64,
    /// 2x2 chi-squared statistic.
    pub chi_squared: f64,
    /// Occurrences of the term across in-category documents.
    pub frequency: u64,
    /// In-category documents containing the term.
    #[serde(skip)]
    pub document_frequency: u64,
}

impl TermStatistics {
    pub fn from_counts(counts: &TermCounts, table: &ContingencyCounts) -> Self {
        Self {
            mutual_information: mutual_information(table),
            chi_squared: chi_squared(table),
            frequency: counts.in_occurrences,
            document_frequency: counts.in_docs,
        }
    }

    /// Score `term` against `table`. Terms outside the vocabulary score zero
    /// across the board.
    pub fn for_term(table: &FrequencyTable, term: &str) -> Self {
        match table.get(term) {
            Some(counts) => Self::from_counts(counts, &table.contingency_for(counts)),
            None => Self::default(),
        }
    }
}

/// Mutual information in bits.
///
/// Sums `P(t,c) * log2(P(t,c) / (P(t) * P(c)))` over the four cells. A cell
/// with zero count contributes nothing (x log x -> 0).
pub fn mutual_information(c: &ContingencyCounts) -> f64 {
    let n = c.total();
    if n == 0 {
        return 0.0;
    }

    let cells = [
        (c.n11, c.present(), c.in_category()),
        (c.n10, c.present(), c.background()),
        (c.n01, c.absent(), c.in_category()),
        (c.n00, c.absent(), c.background()),
    ];

    let n = n as f64;
    let mi: f64 = cells
        .iter()
        .filter(|(joint, _, _)| *joint > 0)
        .map(|&(joint, row, col)| {
            let joint = joint as f64;
            // row and col are both >= joint > 0 here
            let ratio = (n * joint) / (row as f64 * col as f64);
            (joint / n) * ratio.log2()
        })
        .sum();

    // Rounding can leave a hair below zero for near-independent terms. Also
    // folds -0.0 into 0.0 so ties compare equal when ranking.
    if mi > 0.0 {
        mi
    } else {
        0.0
    }
}

/// Score every term in the table, in ascending term order.
pub fn score_vocabulary(table: &FrequencyTable) -> Vec<(&str, TermStatistics)> {
    table
        .iter()
        .map(|(term, counts)| {
            (
                term,
                TermStatistics::from_counts(counts, &table.contingency_for(counts)),
            )
        })
        .collect()
}

/// Pearson chi-squared for the 2x2 table.
///
/// `N * (n11*n00 - n10*n01)^2 / (present * absent * in_category * background)`.
/// If any marginal is zero some expected count is zero, and the statistic is
/// defined as 0.
pub fn chi_squared(c: &ContingencyCounts) -> f64 {
    let marginals = [c.present(), c.absent(), c.in_category(), c.background()];
    if marginals.contains(&0) {
        return 0.0;
    }

    let diff = (c.n11 as i128 * c.n00 as i128) - (c.n10 as i128 * c.n01 as i128);
    let diff = diff as f64;
    let denominator: f64 = marginals.iter().map(|&m| m as f64).product();

    c.total() as f64 * diff * diff / denominator
}
