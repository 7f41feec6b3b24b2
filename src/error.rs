// Error kinds for the analysis engine.
//
// Only hard failures live here. A word that never appears in the corpus is
// not an error: it produces zero scores plus a note on the result.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The category is not in the known set, or has no backing dataset.
    #[error("Unknown category '{0}'")]
    CategoryNotFound(String),

    /// The corpus could not be read. Fatal for the request, never retried.
    #[error("Corpus unavailable at {}: {source}", path.display())]
    CorpusUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    pub fn corpus_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::CorpusUnavailable {
            path: path.into(),
            source,
        }
    }

    /// The message shown to the requester.
    ///
    /// Unknown categories are user input errors and are surfaced verbatim.
    /// Storage failures carry filesystem details that belong in the logs,
    /// so the requester only gets a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::CategoryNotFound(_) => self.to_string(),
            AnalysisError::CorpusUnavailable { .. } => {
                "Corpus unavailable. The analysis could not be completed.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_not_found_is_surfaced_verbatim() {
        let err = AnalysisError::CategoryNotFound("cooking".to_string());
        assert_eq!(err.user_message(), "Unknown category 'cooking'");
    }

    #[test]
    fn corpus_unavailable_hides_paths_from_users() {
        let err = AnalysisError::corpus_unavailable(
            "/srv/corpus/secret",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/srv/corpus/secret"));
        assert!(!err.user_message().contains("/srv/corpus/secret"));
        assert_eq!(
            err.user_message(),
            "Corpus unavailable. The analysis could not be completed."
        );
    }
}
