// Analysis orchestrator — drives one (category, word) request end to end.
//
//   Idle -> Loading -> Building -> Scoring -> Ranking -> Done
//                                              (or Failed from any of them)
//
// Every transition emits a progress message and a tracing event. The run is
// synchronous with no suspension points; callers on an async runtime should
// move it to a blocking thread.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::cache::SnapshotCache;
use super::progress::{AnalysisState, ProgressSink};
use super::result::AnalysisResult;
use crate::config::Config;
use crate::corpus::tokenize::{QueryTerm, Tokenizer};
use crate::corpus::{Category, CorpusSource, DirectoryCorpus};
use crate::error::AnalysisError;
use crate::ranking::{rank_all, DEFAULT_TOP_K};
use crate::scoring::{score_vocabulary, TermStatistics};
use crate::table::{FrequencyTable, FrequencyTableBuilder};

/// A single analysis request as received from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub category: String,
    pub word: String,
}

impl AnalysisRequest {
    pub fn new(category: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            word: word.into(),
        }
    }
}

pub struct Analyzer {
    source: Arc<dyn CorpusSource>,
    tokenizer: Tokenizer,
    top_k: usize,
    cache: Option<SnapshotCache>,
}

impl Analyzer {
    pub fn new(source: Arc<dyn CorpusSource>, tokenizer: Tokenizer) -> Self {
        Self {
            source,
            tokenizer,
            top_k: DEFAULT_TOP_K,
            cache: None,
        }
    }

    /// Analyzer over the on-disk corpus described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let source = DirectoryCorpus::new(&config.corpus_dir)
            .with_cleaning(config.clean_newsgroups)
            .with_background_limit(config.background_limit);
        Self::new(Arc::new(source), Tokenizer::with_stop_words(config.stop_words))
            .with_top_k(config.top_k)
            .with_cache(config.cache)
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Keep built tables in memory across analyses of the same category.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(SnapshotCache::new);
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Run an analysis, returning the typed error on failure.
    ///
    /// No partial result is produced when this fails.
    pub fn analyze(
        &self,
        request: &AnalysisRequest,
        sink: &mut dyn ProgressSink,
    ) -> Result<AnalysisResult, AnalysisError> {
        let mut run = Run::new(sink);
        match self.try_analyze(request, &mut run) {
            Ok(result) => Ok(result),
            Err(e) => {
                run.fail(&e);
                Err(e)
            }
        }
    }

    /// Run an analysis and always produce a terminal record.
    ///
    /// This is the boundary used by hosts: errors become a record with
    /// `error` set instead of propagating.
    pub fn run(&self, request: &AnalysisRequest, sink: &mut dyn ProgressSink) -> AnalysisResult {
        match self.analyze(request, sink) {
            Ok(result) => result,
            Err(e) => AnalysisResult::failure(&request.word, &e),
        }
    }

    /// Load and build (or fetch from cache) the frequency table for a category.
    pub fn snapshot(
        &self,
        category: Category,
        sink: &mut dyn ProgressSink,
    ) -> Result<Arc<FrequencyTable>, AnalysisError> {
        let mut run = Run::new(sink);
        let table = self.load_table(category, &mut run);
        if let Err(e) = &table {
            run.fail(e);
        }
        table
    }

    /// Score `word` against an already-built snapshot and rank its vocabulary.
    pub fn analyze_snapshot(
        &self,
        category: Category,
        table: &FrequencyTable,
        word: &str,
        sink: &mut dyn ProgressSink,
    ) -> AnalysisResult {
        let mut run = Run::new(sink);
        run.state = AnalysisState::Building;
        self.score_and_rank(category, table, word, &mut run)
    }

    fn try_analyze(
        &self,
        request: &AnalysisRequest,
        run: &mut Run<'_>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let category: Category = request.category.parse()?;
        let table = self.load_table(category, run)?;
        Ok(self.score_and_rank(category, &table, &request.word, run))
    }

    fn load_table(
        &self,
        category: Category,
        run: &mut Run<'_>,
    ) -> Result<Arc<FrequencyTable>, AnalysisError> {
        if let Some(table) = self.cache.as_ref().and_then(|c| c.get(category)) {
            run.enter(
                AnalysisState::Loading,
                format!("Using cached '{category}' data..."),
            );
            run.enter(
                AnalysisState::Building,
                format!("Frequency table ready with {} terms.", table.term_count()),
            );
            return Ok(table);
        }

        run.enter(AnalysisState::Loading, format!("Fetching '{category}' data..."));
        let corpus = self.source.load(category)?;
        run.message(format!(
            "Fetched {} documents ({} in-category, {} background).",
            corpus.document_count(),
            corpus.in_category.len(),
            corpus.background.len()
        ));

        run.enter(AnalysisState::Building, "Building frequency table...".to_string());
        let table = Arc::new(FrequencyTableBuilder::build(&self.tokenizer, corpus));
        run.message(format!(
            "Frequency table built with {} terms.",
            table.term_count()
        ));

        Ok(match &self.cache {
            Some(cache) => cache.insert(category, table),
            None => table,
        })
    }

    fn score_and_rank(
        &self,
        category: Category,
        table: &FrequencyTable,
        word: &str,
        run: &mut Run<'_>,
    ) -> AnalysisResult {
        run.enter(AnalysisState::Scoring, format!("Scoring '{word}'..."));

        let query = self.tokenizer.parse_query(word);
        let stats = match &query {
            QueryTerm::Term(term) => TermStatistics::for_term(table, term),
            QueryTerm::Empty | QueryTerm::Compound => TermStatistics::default(),
        };
        let note = self.not_found_note(category, table, word, &query);

        match &note {
            Some(note) => {
                warn!(word, category = %category, "Word not in vocabulary");
                run.message(note.clone());
            }
            None => run.message(format!(
                "Utility scores for '{word}' in the '{category}' class: \
                 MI={:.6}, chi2={:.4}, frequency={}",
                stats.mutual_information, stats.chi_squared, stats.frequency
            )),
        }

        run.enter(
            AnalysisState::Ranking,
            format!(
                "Ranking top {} words by mutual information, chi-squared and frequency...",
                self.top_k
            ),
        );
        let scored = score_vocabulary(table);
        let top_words = rank_all(&scored, self.top_k);

        run.enter(AnalysisState::Done, "Analysis complete.".to_string());

        let result = AnalysisResult::new(word, stats, top_words);
        match note {
            Some(note) => result.with_note(note),
            None => result,
        }
    }

    fn not_found_note(
        &self,
        category: Category,
        table: &FrequencyTable,
        word: &str,
        query: &QueryTerm,
    ) -> Option<String> {
        match query {
            QueryTerm::Empty => Some(format!(
                "'{word}' has no scorable characters; all scores are 0"
            )),
            QueryTerm::Compound => Some(format!(
                "'{}' is not a single vocabulary term; all scores are 0",
                word.trim()
            )),
            QueryTerm::Term(term) if table.contains(term) => None,
            QueryTerm::Term(term) if self.tokenizer.is_stop_word(term) => Some(format!(
                "'{term}' is a stop word and is excluded from the vocabulary; all scores are 0"
            )),
            QueryTerm::Term(term) => Some(format!(
                "'{term}' does not appear in the '{category}' corpus; all scores are 0"
            )),
        }
    }
}

/// Tracks the current state of one run and forwards progress.
struct Run<'s> {
    state: AnalysisState,
    sink: &'s mut dyn ProgressSink,
}

impl<'s> Run<'s> {
    fn new(sink: &'s mut dyn ProgressSink) -> Self {
        Self {
            state: AnalysisState::Idle,
            sink,
        }
    }

    fn enter(&mut self, next: AnalysisState, message: String) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        self.state = next;
        self.message(message);
    }

    /// Extra message within the current state.
    fn message(&mut self, message: String) {
        info!(state = %self.state, "{message}");
        self.sink.progress(self.state, &message);
    }

    fn fail(&mut self, err: &AnalysisError) {
        match err {
            AnalysisError::CategoryNotFound(_) => warn!(state = %self.state, error = %err, "Analysis rejected"),
            AnalysisError::CorpusUnavailable { .. } => {
                error!(state = %self.state, error = %err, "Analysis failed")
            }
        }
        self.state = AnalysisState::Failed;
        self.sink
            .progress(AnalysisState::Failed, &format!("Error: {}", err.user_message()));
    }
}
