use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::ranking::{DEFAULT_TOP_K, MAX_TOP_K};

/// Central configuration loaded from environment variables.
///
/// Nothing is required: every setting has a default. The .env file is
/// loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the 20 Newsgroups "bydate" training set
    /// (one directory per newsgroup).
    pub corpus_dir: PathBuf,
    /// Leaderboard size per metric.
    pub top_k: usize,
    /// Drop English stop words during tokenization.
    pub stop_words: bool,
    /// Strip headers, quoted replies and signatures from posts.
    pub clean_newsgroups: bool,
    /// Cap on background documents (first N in name order). Unset = all.
    pub background_limit: Option<usize>,
    /// Keep built frequency tables in memory between requests (web host).
    pub cache: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let corpus_dir = env::var("WORD_UTILITY_CORPUS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_corpus_dir());

        let top_k = match env::var("WORD_UTILITY_TOP_K") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("WORD_UTILITY_TOP_K must be a number, got '{raw}'"))?,
            Err(_) => DEFAULT_TOP_K,
        };

        let background_limit = match env::var("WORD_UTILITY_BACKGROUND_LIMIT") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse().with_context(|| {
                format!("WORD_UTILITY_BACKGROUND_LIMIT must be a number, got '{raw}'")
            })?),
            _ => None,
        };

        let config = Self {
            corpus_dir,
            top_k,
            stop_words: env_flag("WORD_UTILITY_STOP_WORDS", true)?,
            clean_newsgroups: env_flag("WORD_UTILITY_CLEAN_NEWSGROUPS", true)?,
            background_limit,
            cache: env_flag("WORD_UTILITY_CACHE", true)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that settings are within range.
    /// Call again after applying command-line overrides.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 || self.top_k > MAX_TOP_K {
            anyhow::bail!(
                "Leaderboard size must be between 1 and {MAX_TOP_K}, got {}",
                self.top_k
            );
        }
        Ok(())
    }

    /// Check that the corpus directory exists.
    /// Call this before any operation that reads documents.
    pub fn require_corpus(&self) -> Result<()> {
        if !self.corpus_dir.is_dir() {
            anyhow::bail!(
                "Corpus directory not found: {}\n\
                 Download the 20 Newsgroups \"bydate\" set and point \
                 WORD_UTILITY_CORPUS_DIR at its training directory.",
                self.corpus_dir.display()
            );
        }
        Ok(())
    }
}

/// Returns the default corpus location.
/// Uses the platform data directory: ~/.local/share/word-utility/ on Linux.
pub fn default_corpus_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("word-utility")
        .join("20news-bydate-train")
}

fn env_flag(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(raw) => parse_flag(&raw).with_context(|| format!("{name} must be true or false")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}
