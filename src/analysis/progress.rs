// Analysis states and the advisory progress channel.
//
// Progress messages are for display and logs only. Nothing downstream may
// depend on their text for correctness.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisState {
    Idle,
    Loading,
    Building,
    Scoring,
    Ranking,
    Done,
    Failed,
}

impl AnalysisState {
    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// States advance in order (re-entering the current state is allowed
    /// for extra messages); `Failed` is reachable from anywhere except the
    /// terminal states.
    pub fn can_advance_to(self, next: AnalysisState) -> bool {
        use AnalysisState::*;
        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (Idle, Loading)
            | (Loading, Building)
            | (Building, Scoring)
            | (Scoring, Ranking)
            | (Ranking, Done) => true,
            (a, b) => a == b,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::Idle => "idle",
            AnalysisState::Loading => "loading",
            AnalysisState::Building => "building",
            AnalysisState::Scoring => "scoring",
            AnalysisState::Ranking => "ranking",
            AnalysisState::Done => "done",
            AnalysisState::Failed => "failed",
        }
    }
}

impl fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receives progress notifications as an analysis runs.
pub trait ProgressSink {
    fn progress(&mut self, state: AnalysisState, message: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(AnalysisState, &str),
{
    fn progress(&mut self, state: AnalysisState, message: &str) {
        self(state, message)
    }
}

/// Discards all progress.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn progress(&mut self, _state: AnalysisState, _message: &str) {}
}

/// Collects messages in order; handy for tests and batch callers.
#[derive(Debug, Default)]
pub struct ProgressLog {
    pub entries: Vec<(AnalysisState, String)>,
}

impl ProgressLog {
    pub fn states(&self) -> Vec<AnalysisState> {
        let mut states: Vec<AnalysisState> = self.entries.iter().map(|(s, _)| *s).collect();
        states.dedup();
        states
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, m)| m.as_str())
    }
}

impl ProgressSink for ProgressLog {
    fn progress(&mut self, state: AnalysisState, message: &str) {
        self.entries.push((state, message.to_string()));
    }
}
