// The terminal record of an analysis.
//
// One canonical shape. Failures use the same shape with `error` set, zeroed
// scores and empty leaderboards, so a consumer always gets exactly one record.

use serde::Serialize;

use crate::error::AnalysisError;
use crate::ranking::Leaderboards;
use crate::scoring::TermStatistics;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub word: String,
    pub mutual_information: f64,
    pub chi_squared: f64,
    pub frequency: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational, e.g. the word never appears in the corpus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub top_words: Leaderboards,
}

impl AnalysisResult {
    pub fn new(word: &str, stats: TermStatistics, top_words: Leaderboards) -> Self {
        Self {
            word: word.to_string(),
            mutual_information: stats.mutual_information,
            chi_squared: stats.chi_squared,
            frequency: stats.frequency,
            error: None,
            note: None,
            top_words,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Error record for a failed analysis.
    pub fn failure(word: &str, err: &AnalysisError) -> Self {
        Self::error_message(word, err.user_message())
    }

    pub fn error_message(word: &str, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(word, TermStatistics::default(), Leaderboards::default())
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Compact single-line JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
