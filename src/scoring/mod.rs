// Term scoring — association metrics computed from contingency counts.

pub mod metrics;

pub use metrics::{chi_squared, mutual_information, score_vocabulary, TermStatistics};

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three metrics a term can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "mi")]
    MutualInformation,
    #[serde(rename = "chi2")]
    ChiSquared,
    #[serde(rename = "frequency")]
    Frequency,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::MutualInformation,
        Metric::ChiSquared,
        Metric::Frequency,
    ];

    /// Short key used for leaderboard grouping in results.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::MutualInformation => "mi",
            Metric::ChiSquared => "chi2",
            Metric::Frequency => "frequency",
        }
    }

    /// Field name the score is reported under.
    pub fn field(&self) -> &'static str {
        match self {
            Metric::MutualInformation => "mutual_information",
            Metric::ChiSquared => "chi_squared",
            Metric::Frequency => "frequency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::MutualInformation => "mutual information",
            Metric::ChiSquared => "chi-squared",
            Metric::Frequency => "frequency",
        }
    }

    /// Pick this metric's score out of a statistics record.
    pub fn score(&self, stats: &TermStatistics) -> f64 {
        match self {
            Metric::MutualInformation => stats.mutual_information,
            Metric::ChiSquared => stats.chi_squared,
            Metric::Frequency => stats.frequency as f64,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
