// Filesystem corpus in the 20 Newsgroups "bydate" layout.
//
//   <root>/<newsgroup>/<document>
//
// In-category documents come from the category's newsgroups; background
// documents come from every other newsgroup directory under the root.
// Directory entries are visited in name order so loading is deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::newsgroup::clean_post;
use super::{Category, CorpusSource, LabeledCorpus};
use crate::error::AnalysisError;

#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    root: PathBuf,
    /// Strip headers, quoted replies and signatures from each post.
    clean: bool,
    /// Keep at most this many background documents (first N in name order).
    background_limit: Option<usize>,
}

impl DirectoryCorpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clean: true,
            background_limit: None,
        }
    }

    pub fn with_cleaning(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn with_background_limit(mut self, limit: Option<usize>) -> Self {
        self.background_limit = limit;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Newsgroup directory names present under the root, sorted.
    pub fn newsgroups(&self) -> Result<Vec<String>, AnalysisError> {
        Ok(sorted_entries(&self.root)?
            .into_iter()
            .filter(|p| p.is_dir())
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect())
    }

    /// Count the document files in one newsgroup directory.
    pub fn document_count(&self, newsgroup: &str) -> Result<usize, AnalysisError> {
        let dir = self.root.join(newsgroup);
        Ok(sorted_entries(&dir)?.into_iter().filter(|p| p.is_file()).count())
    }

    fn read_newsgroup(
        &self,
        newsgroup: &str,
        out: &mut Vec<String>,
        limit: Option<usize>,
    ) -> Result<(), AnalysisError> {
        let dir = self.root.join(newsgroup);
        for path in sorted_entries(&dir)? {
            if limit.is_some_and(|max| out.len() >= max) {
                break;
            }
            if !path.is_file() {
                continue;
            }
            let bytes = fs::read(&path).map_err(|e| AnalysisError::corpus_unavailable(&path, e))?;
            let raw = decode_latin1(&bytes);
            out.push(if self.clean { clean_post(&raw) } else { raw });
        }
        debug!(newsgroup, documents = out.len(), "Read newsgroup");
        Ok(())
    }
}

impl CorpusSource for DirectoryCorpus {
    fn load(&self, category: Category) -> Result<LabeledCorpus, AnalysisError> {
        let newsgroups = self.newsgroups()?;

        let (own, others): (Vec<&String>, Vec<&String>) = newsgroups
            .iter()
            .partition(|g| category.contains_newsgroup(g));

        if own.is_empty() {
            return Err(AnalysisError::CategoryNotFound(category.to_string()));
        }

        let mut corpus = LabeledCorpus::default();
        for group in own {
            self.read_newsgroup(group, &mut corpus.in_category, None)?;
        }
        for group in others {
            self.read_newsgroup(group, &mut corpus.background, self.background_limit)?;
        }

        info!(
            category = %category,
            in_category = corpus.in_category.len(),
            background = corpus.background.len(),
            "Loaded corpus from {}",
            self.root.display()
        );
        Ok(corpus)
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, AnalysisError> {
    let entries = fs::read_dir(dir).map_err(|e| AnalysisError::corpus_unavailable(dir, e))?;
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AnalysisError::corpus_unavailable(dir, e))?;
    paths.sort();
    Ok(paths)
}

/// The corpus is Latin-1 encoded; every byte maps to the code point of the
/// same value, so decoding never fails.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
