// Colored terminal output for analysis results.
//
// Used by `word-utility analyze --format pretty`. The line protocol in
// `protocol.rs` is the machine-readable alternative.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::progress::{AnalysisState, ProgressSink};
use crate::analysis::AnalysisResult;
use crate::ranking::Leaderboard;
use crate::scoring::Metric;
use crate::status::CategoryRow;

/// Display the word's scores followed by the three leaderboards.
pub fn display_result(category: &str, result: &AnalysisResult) {
    if let Some(error) = &result.error {
        println!("{} {}", "Error:".red().bold(), error);
        return;
    }

    println!(
        "\n{}",
        format!("=== '{}' in the '{}' category ===", result.word, category).bold()
    );
    println!(
        "  Mutual information: {:>12.6} bits",
        result.mutual_information
    );
    println!("  Chi-squared:        {:>12.4}", result.chi_squared);
    println!("  Frequency:          {:>12}", result.frequency);

    if let Some(note) = &result.note {
        println!("  {}", note.yellow());
    }

    for metric in Metric::ALL {
        display_leaderboard(result.top_words.get(metric), &result.word);
    }
}

/// Display one leaderboard, highlighting the queried word if it made the cut.
pub fn display_leaderboard(board: &Leaderboard, highlight: &str) {
    println!(
        "\n{}",
        format!("--- Top {} by {} ---", board.len(), board.metric).bold()
    );

    if board.is_empty() {
        println!("  {}", "(no terms)".dimmed());
        return;
    }

    let highlight = highlight.trim().to_lowercase();
    for (i, (word, score)) in board.scores().enumerate() {
        let score = match board.metric {
            Metric::Frequency => format!("{score:>12.0}"),
            Metric::ChiSquared => format!("{score:>12.4}"),
            Metric::MutualInformation => format!("{score:>12.6}"),
        };
        let word = if word == highlight {
            word.bright_green().bold()
        } else {
            word.normal()
        };
        println!("  {:>3}. {:<24} {}", i + 1, word, score.dimmed());
    }
}

/// Display the category table with corpus availability.
pub fn display_categories(rows: &[CategoryRow]) {
    println!("\n{}", "=== Categories ===".bold());
    for (category, groups) in rows {
        println!("  {}", category.as_str().bold());
        for (group, docs) in groups {
            let docs = match docs {
                Some(n) => format!("{n} documents").green(),
                None => "missing".red(),
            };
            println!("      {:<24} {}", group, docs);
        }
    }
}

/// Spinner that shows the latest progress message in place.
pub struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for SpinnerProgress {
    fn progress(&mut self, state: AnalysisState, message: &str) {
        match state {
            AnalysisState::Failed => self.pb.println(format!("  {}", message.red())),
            _ => self.pb.set_message(message.to_string()),
        }
    }
}
