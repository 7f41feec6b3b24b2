// Corpus loading — categories, document sources, cleaning and tokenization.

pub mod category;
pub mod directory;
pub mod memory;
pub mod newsgroup;
pub mod tokenize;

pub use category::Category;
pub use directory::DirectoryCorpus;
pub use memory::InMemoryCorpus;

use crate::error::AnalysisError;

/// Raw documents for one category, split by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledCorpus {
    pub in_category: Vec<String>,
    pub background: Vec<String>,
}

impl LabeledCorpus {
    pub fn new(in_category: Vec<String>, background: Vec<String>) -> Self {
        Self {
            in_category,
            background,
        }
    }

    pub fn document_count(&self) -> usize {
        self.in_category.len() + self.background.len()
    }
}

/// A source of labeled documents.
///
/// Implementations must be deterministic: loading the same category twice
/// against unchanged storage yields the same documents in the same order.
pub trait CorpusSource: Send + Sync {
    fn load(&self, category: Category) -> Result<LabeledCorpus, AnalysisError>;
}
