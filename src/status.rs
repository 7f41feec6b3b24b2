// Corpus status display — shows where the corpus lives and which newsgroups
// each category can draw on.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::corpus::{Category, DirectoryCorpus};

/// Newsgroups for one category with their document counts.
/// `None` means the newsgroup directory is missing.
pub type CategoryRow = (Category, Vec<(&'static str, Option<usize>)>);

/// Document counts per category newsgroup. Fails only if the root itself
/// can't be listed.
pub fn category_rows(corpus: &DirectoryCorpus) -> Result<Vec<CategoryRow>> {
    let present = corpus.newsgroups()?;
    let mut rows = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let mut groups = Vec::new();
        for &group in category.newsgroups() {
            let docs = if present.iter().any(|p| p == group) {
                Some(corpus.document_count(group)?)
            } else {
                None
            };
            groups.push((group, docs));
        }
        rows.push((category, groups));
    }
    Ok(rows)
}

/// Category rows with every newsgroup marked missing.
pub fn unavailable_rows() -> Vec<CategoryRow> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let groups: Vec<_> = category.newsgroups().iter().map(|&g| (g, None)).collect();
            (category, groups)
        })
        .collect()
}

/// Display corpus status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    let root = &config.corpus_dir;
    if !root.is_dir() {
        println!("Corpus: {} ({})", root.display(), "not found".red());
        println!("\nSet WORD_UTILITY_CORPUS_DIR to the 20 Newsgroups \"bydate\" training directory.");
        return Ok(());
    }

    let corpus = DirectoryCorpus::new(root);
    let newsgroups = corpus.newsgroups()?;
    let total_docs = newsgroups
        .iter()
        .map(|g| corpus.document_count(g))
        .sum::<Result<usize, _>>()?;
    println!(
        "Corpus: {} ({} newsgroups, {} documents)",
        root.display(),
        newsgroups.len(),
        total_docs
    );

    println!(
        "Settings: top_k={}, stop_words={}, clean={}, background_limit={}, cache={}",
        config.top_k,
        config.stop_words,
        config.clean_newsgroups,
        config
            .background_limit
            .map_or_else(|| "none".to_string(), |n| n.to_string()),
        config.cache
    );

    let rows = category_rows(&corpus)?;
    let ready = rows
        .iter()
        .filter(|(_, groups)| groups.iter().any(|(_, docs)| docs.is_some()))
        .count();
    println!("Categories ready: {} of {}", ready, rows.len());
    for (category, groups) in &rows {
        let missing: Vec<&str> = groups
            .iter()
            .filter(|(_, docs)| docs.is_none())
            .map(|(g, _)| *g)
            .collect();
        if !missing.is_empty() {
            println!(
                "  {} missing {}",
                category.as_str().yellow(),
                missing.join(", ")
            );
        }
    }

    if let Some(size) = dir_size(root) {
        println!("Disk usage: {}", format_bytes(size));
    }

    Ok(())
}

/// Total size of files one level below each newsgroup directory.
fn dir_size(root: &Path) -> Option<u64> {
    let mut total = 0;
    for group in std::fs::read_dir(root).ok()?.flatten() {
        let Ok(entries) = std::fs::read_dir(group.path()) else {
            continue;
        };
        total += entries
            .flatten()
            .filter_map(|e| e.metadata().ok())
            .filter(|m| m.is_file())
            .map(|m| m.len())
            .sum::<u64>();
    }
    Some(total)
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
