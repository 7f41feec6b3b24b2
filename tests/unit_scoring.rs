// Unit tests for the association metrics and the frequency table.
//
// Tests pure functions: mutual_information and chi_squared on hand-built
// contingency tables (independence, perfect association, degenerate
// marginals), and the counts a FrequencyTable derives from a small corpus.

use word_utility::corpus::tokenize::Tokenizer;
use word_utility::corpus::LabeledCorpus;
use word_utility::scoring::{chi_squared, mutual_information, score_vocabulary, TermStatistics};
use word_utility::table::{ContingencyCounts, FrequencyTable, FrequencyTableBuilder};

fn hockey_table() -> FrequencyTable {
    let corpus = LabeledCorpus::new(
        vec!["puck goal ice".into(), "goal save ice".into()],
        vec!["puck car engine".into()],
    );
    FrequencyTableBuilder::build(&Tokenizer::plain(), corpus)
}

// ============================================================
// mutual_information / chi_squared — closed-form cases
// ============================================================

#[test]
fn independent_term_scores_zero() {
    // P(term | in) == P(term | background) == 1/2
    let c = ContingencyCounts::new(10, 10, 10, 10);
    assert_eq!(mutual_information(&c), 0.0);
    assert_eq!(chi_squared(&c), 0.0);
}

#[test]
fn independent_term_with_unequal_classes_scores_zero() {
    // Term in 1/4 of each class, classes of 8 and 4 documents.
    let c = ContingencyCounts::new(2, 1, 6, 3);
    assert!(mutual_information(&c).abs() < 1e-12);
    assert_eq!(chi_squared(&c), 0.0);
}

#[test]
fn perfect_association_equals_label_entropy() {
    // Term in every in-category document and no background document.
    let c = ContingencyCounts::new(2, 0, 0, 1);
    let entropy = -(2.0f64 / 3.0) * (2.0f64 / 3.0).log2() - (1.0f64 / 3.0) * (1.0f64 / 3.0).log2();
    assert!((mutual_information(&c) - entropy).abs() < 1e-12);
    assert!((chi_squared(&c) - 3.0).abs() < 1e-12);
}

#[test]
fn negative_association_is_still_positive() {
    // Term appears only in background documents.
    let c = ContingencyCounts::new(0, 4, 4, 0);
    assert!((mutual_information(&c) - 1.0).abs() < 1e-12);
    assert!((chi_squared(&c) - 8.0).abs() < 1e-12);
}

#[test]
fn empty_table_scores_zero() {
    let c = ContingencyCounts::default();
    assert_eq!(mutual_information(&c), 0.0);
    assert_eq!(chi_squared(&c), 0.0);
}

#[test]
fn term_in_every_document_scores_zero() {
    // absent marginal is zero
    let c = ContingencyCounts::new(3, 2, 0, 0);
    assert_eq!(mutual_information(&c), 0.0);
    assert_eq!(chi_squared(&c), 0.0);
}

#[test]
fn no_background_documents_scores_zero() {
    let c = ContingencyCounts::new(3, 0, 2, 0);
    assert_eq!(mutual_information(&c), 0.0);
    assert_eq!(chi_squared(&c), 0.0);
}

#[test]
fn large_counts_do_not_overflow() {
    let big = 4_000_000_000u64;
    let c = ContingencyCounts::new(big, 1, 1, big);
    let chi2 = chi_squared(&c);
    assert!(chi2.is_finite());
    assert!(chi2 > 0.0);
}

#[test]
fn scores_are_never_negative() {
    for n11 in 0..5u64 {
        for n10 in 0..5u64 {
            for n01 in 0..5u64 {
                for n00 in 0..5u64 {
                    let c = ContingencyCounts::new(n11, n10, n01, n00);
                    let mi = mutual_information(&c);
                    let chi2 = chi_squared(&c);
                    assert!(mi >= 0.0 && mi.is_sign_positive(), "MI {mi} for {c:?}");
                    assert!(chi2 >= 0.0, "chi2 {chi2} for {c:?}");
                }
            }
        }
    }
}

// ============================================================
// FrequencyTable — counts derived from a corpus
// ============================================================

#[test]
fn table_counts_documents_and_occurrences() {
    let table = hockey_table();
    assert_eq!(table.in_category_docs(), 2);
    assert_eq!(table.background_docs(), 1);
    assert_eq!(table.term_count(), 6);

    let goal = table.get("goal").unwrap();
    assert_eq!(goal.in_docs, 2);
    assert_eq!(goal.out_docs, 0);
    assert_eq!(goal.in_occurrences, 2);
}

#[test]
fn repeated_term_counts_once_per_document() {
    let corpus = LabeledCorpus::new(vec!["goal goal goal".into()], vec!["car".into()]);
    let table = FrequencyTableBuilder::build(&Tokenizer::plain(), corpus);
    let goal = table.get("goal").unwrap();
    assert_eq!(goal.in_docs, 1);
    assert_eq!(goal.in_occurrences, 3);
}

#[test]
fn contingency_cells_sum_to_document_count() {
    let table = hockey_table();
    for (term, _) in table.iter() {
        let c = table.contingency(term);
        assert_eq!(c.total(), table.total_docs(), "cells for '{term}'");
    }
    assert_eq!(table.contingency("zamboni").total(), table.total_docs());
}

#[test]
fn vocabulary_scores_match_single_term_scores() {
    let table = hockey_table();
    for (term, stats) in score_vocabulary(&table) {
        assert_eq!(stats, TermStatistics::for_term(&table, term));
    }
}

#[test]
fn hockey_goal_is_associated() {
    let stats = TermStatistics::for_term(&hockey_table(), "goal");
    assert_eq!(stats.frequency, 2);
    assert!(stats.mutual_information > 0.0);
    assert!((stats.chi_squared - 3.0).abs() < 1e-12);
}

#[test]
fn unknown_term_scores_zero() {
    let stats = TermStatistics::for_term(&hockey_table(), "zamboni");
    assert_eq!(stats, TermStatistics::default());
}
