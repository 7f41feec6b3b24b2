// Top-K leaderboard selection.
//
// Order is score descending, then term ascending. Selection keeps a bounded
// max-heap whose top is the worst entry kept so far, so a vocabulary of V
// terms costs O(V log K) instead of a full sort. The output is exactly what a
// full sort followed by truncation would give.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::scoring::{Metric, TermStatistics};

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub word: String,
    pub stats: TermStatistics,
}

/// Ranked terms for one metric, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub metric: Metric,
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn empty(metric: Metric) -> Self {
        Self {
            metric,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(word, score)` pairs in rank order.
    pub fn scores(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries
            .iter()
            .map(|e| (e.word.as_str(), self.metric.score(&e.stats)))
    }
}

/// One leaderboard per metric, all drawn from the same scored vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboards {
    pub mi: Leaderboard,
    pub chi2: Leaderboard,
    pub frequency: Leaderboard,
}

impl Default for Leaderboards {
    fn default() -> Self {
        Self {
            mi: Leaderboard::empty(Metric::MutualInformation),
            chi2: Leaderboard::empty(Metric::ChiSquared),
            frequency: Leaderboard::empty(Metric::Frequency),
        }
    }
}

impl Leaderboards {
    pub fn get(&self, metric: Metric) -> &Leaderboard {
        match metric {
            Metric::MutualInformation => &self.mi,
            Metric::ChiSquared => &self.chi2,
            Metric::Frequency => &self.frequency,
        }
    }
}

struct Candidate<'a> {
    score: f64,
    word: &'a str,
    stats: &'a TermStatistics,
}

/// `Less` means `a` ranks ahead of `b`.
fn rank_order(a_score: f64, a_word: &str, b_score: f64, b_word: &str) -> Ordering {
    b_score
        .total_cmp(&a_score)
        .then_with(|| a_word.cmp(b_word))
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_order(self.score, self.word, other.score, other.word)
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

/// Select the `k` best terms by `metric`.
pub fn top_k<'a, 'b: 'a, I>(scored: I, metric: Metric, k: usize) -> Leaderboard
where
    I: IntoIterator<Item = &'a (&'b str, TermStatistics)>,
{
    if k == 0 {
        return Leaderboard::empty(metric);
    }

    let mut heap: BinaryHeap<Candidate<'a>> = BinaryHeap::with_capacity(k + 1);
    for (word, stats) in scored {
        let candidate = Candidate {
            score: metric.score(stats),
            word: *word,
            stats,
        };
        if heap.len() < k {
            heap.push(candidate);
        } else if let Some(worst) = heap.peek() {
            if candidate < *worst {
                heap.pop();
                heap.push(candidate);
            }
        }
    }

    let entries = heap
        .into_sorted_vec()
        .into_iter()
        .map(|c| LeaderboardEntry {
            word: c.word.to_string(),
            stats: *c.stats,
        })
        .collect();

    Leaderboard { metric, entries }
}

/// Build all three leaderboards from one scored vocabulary.
pub fn rank_all(scored: &[(&str, TermStatistics)], k: usize) -> Leaderboards {
    Leaderboards {
        mi: top_k(scored, Metric::MutualInformation, k),
        chi2: top_k(scored, Metric::ChiSquared, k),
        frequency: top_k(scored, Metric::Frequency, k),
    }
}

// Leaderboards serialize as `[{"word": .., "<metric field>": ..}, ...]`, with
// frequency reported as an integer.
impl Serialize for Leaderboard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(&EntryView {
                metric: self.metric,
                entry,
            })?;
        }
        seq.end()
    }
}

struct EntryView<'a> {
    metric: Metric,
    entry: &'a LeaderboardEntry,
}

impl Serialize for EntryView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("word", &self.entry.word)?;
        match self.metric {
            Metric::MutualInformation => {
                map.serialize_entry("mutual_information", &self.entry.stats.mutual_information)?
            }
            Metric::ChiSquared => {
                map.serialize_entry("chi_squared", &self.entry.stats.chi_squared)?
            }
            Metric::Frequency => map.serialize_entry("frequency", &self.entry.stats.frequency)?,
        }
        map.end()
    }
}
