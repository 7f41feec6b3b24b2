// In-memory corpus — fixed documents per category, no I/O.

use std::collections::HashMap;

use super::{Category, CorpusSource, LabeledCorpus};
use crate::error::AnalysisError;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    categories: HashMap<Category, LabeledCorpus>,
}

impl InMemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the documents backing `category`, replacing any earlier set.
    pub fn with_category<I, B>(mut self, category: Category, in_category: I, background: B) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        let corpus = LabeledCorpus::new(
            in_category.into_iter().map(Into::into).collect(),
            background.into_iter().map(Into::into).collect(),
        );
        self.categories.insert(category, corpus);
        self
    }
}

impl CorpusSource for InMemoryCorpus {
    fn load(&self, category: Category) -> Result<LabeledCorpus, AnalysisError> {
        self.categories
            .get(&category)
            .cloned()
            .ok_or_else(|| AnalysisError::CategoryNotFound(category.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_category_has_no_dataset() {
        let corpus = InMemoryCorpus::new().with_category(Category::Hockey, ["puck"], ["car"]);
        assert!(corpus.load(Category::Hockey).is_ok());
        assert!(matches!(
            corpus.load(Category::Space),
            Err(AnalysisError::CategoryNotFound(_))
        ));
    }
}
