// Frequency table builder.
//
// Each document is tokenized once, its term counts folded into the running
// totals, and the text dropped. Counting happens in a HashMap for speed; the
// finished table is re-keyed into a BTreeMap so nothing about hash order
// reaches callers.

use std::collections::{BTreeMap, HashMap};

use tracing::info;

use super::{FrequencyTable, TermCounts};
use crate::corpus::tokenize::Tokenizer;
use crate::corpus::LabeledCorpus;

/// Which side of the contingency table a document falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    InCategory,
    Background,
}

pub struct FrequencyTableBuilder<'t> {
    tokenizer: &'t Tokenizer,
    terms: HashMap<String, TermCounts>,
    in_category_docs: u64,
    background_docs: u64,
}

impl<'t> FrequencyTableBuilder<'t> {
    pub fn new(tokenizer: &'t Tokenizer) -> Self {
        Self {
            tokenizer,
            terms: HashMap::new(),
            in_category_docs: 0,
            background_docs: 0,
        }
    }

    pub fn add_document(&mut self, text: &str, label: Label) {
        let mut doc_counts: HashMap<String, u64> = HashMap::new();
        for token in self.tokenizer.tokenize(text) {
            *doc_counts.entry(token).or_insert(0) += 1;
        }

        match label {
            Label::InCategory => self.in_category_docs += 1,
            Label::Background => self.background_docs += 1,
        }

        for (term, occurrences) in doc_counts {
            let counts = self.terms.entry(term).or_default();
            match label {
                Label::InCategory => {
                    counts.in_docs += 1;
                    counts.in_occurrences += occurrences;
                }
                Label::Background => {
                    counts.out_docs += 1;
                    counts.out_occurrences += occurrences;
                }
            }
        }
    }

    pub fn add_in_category(&mut self, text: &str) {
        self.add_document(text, Label::InCategory);
    }

    pub fn add_background(&mut self, text: &str) {
        self.add_document(text, Label::Background);
    }

    /// Count every document in `corpus`, consuming it.
    pub fn add_corpus(&mut self, corpus: LabeledCorpus) {
        for doc in corpus.in_category {
            self.add_in_category(&doc);
        }
        for doc in corpus.background {
            self.add_background(&doc);
        }
    }

    pub fn finish(self) -> FrequencyTable {
        let terms: BTreeMap<String, TermCounts> = self.terms.into_iter().collect();
        info!(
            terms = terms.len(),
            in_category = self.in_category_docs,
            background = self.background_docs,
            "Built frequency table"
        );
        FrequencyTable {
            terms,
            in_category_docs: self.in_category_docs,
            background_docs: self.background_docs,
        }
    }

    /// Convenience: build a table from a whole corpus in one call.
    pub fn build(tokenizer: &Tokenizer, corpus: LabeledCorpus) -> FrequencyTable {
        let mut builder = FrequencyTableBuilder::new(tokenizer);
        builder.add_corpus(corpus);
        builder.finish()
    }
}
