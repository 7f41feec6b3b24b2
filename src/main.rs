use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;

use word_utility::analysis::{AnalysisRequest, AnalysisResult, Analyzer, NoProgress};
use word_utility::config::Config;
use word_utility::corpus::DirectoryCorpus;
use word_utility::output::protocol::{write_error, write_result, LineWriter};
use word_utility::output::terminal::{self, SpinnerProgress};
use word_utility::status;

/// word-utility: measure how strongly a word is associated with a category.
///
/// Scores a word by mutual information, chi-squared and in-category
/// frequency against the 20 Newsgroups corpus, and lists the top words
/// for each metric.
#[derive(Parser)]
#[command(name = "word-utility", version, about)]
struct Cli {
    /// Corpus root (overrides WORD_UTILITY_CORPUS_DIR)
    #[arg(long, global = true)]
    corpus_dir: Option<PathBuf>,

    /// Leaderboard size per metric (overrides WORD_UTILITY_TOP_K)
    #[arg(long, global = true)]
    top_k: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a word against a category
    Analyze {
        /// Category to analyze against (space, sports, hockey, baseball, animals)
        category: String,

        /// The word to score
        word: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Lines)]
        format: Format,
    },

    /// List the categories and the newsgroups behind them
    Categories,

    /// Show corpus status (location, document counts, settings)
    Status,

    /// Serve the analysis API over HTTP with streamed progress
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Progress lines, then `RESULT:{json}`
    Lines,
    /// Colored tables with a spinner
    Pretty,
    /// The result record only, pretty-printed JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the line protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("word_utility=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            // Hosts reading the analyze output still get a terminal record.
            if let Commands::Analyze { word, format, .. } = &cli.command {
                report_config_error(word, *format, &e)?;
            }
            return Err(e);
        }
    };

    match cli.command {
        Commands::Analyze {
            category,
            word,
            format,
        } => {
            let analyzer = Analyzer::from_config(&config);
            let request = AnalysisRequest::new(category, word);

            let result = tokio::task::spawn_blocking(move || match format {
                Format::Lines => {
                    let mut writer = LineWriter::new(io::stdout().lock());
                    let result = analyzer.run(&request, &mut writer);
                    write_result(&mut writer.into_inner(), &result)?;
                    Ok::<_, io::Error>(result)
                }
                Format::Pretty => {
                    let mut spinner = SpinnerProgress::new();
                    let result = analyzer.run(&request, &mut spinner);
                    spinner.finish();
                    terminal::display_result(&request.category, &result);
                    Ok(result)
                }
                Format::Json => {
                    let result = analyzer.run(&request, &mut NoProgress);
                    let json = serde_json::to_string_pretty(&result).map_err(io::Error::other)?;
                    println!("{json}");
                    Ok(result)
                }
            })
            .await
            .context("Analysis task panicked")?
            .context("Failed to write analysis output")?;

            if result.is_error() {
                std::process::exit(1);
            }
        }

        Commands::Categories => {
            let corpus = DirectoryCorpus::new(&config.corpus_dir);
            let rows = if config.corpus_dir.is_dir() {
                status::category_rows(&corpus)?
            } else {
                println!(
                    "{}",
                    format!("Corpus not found at {}", config.corpus_dir.display()).yellow()
                );
                status::unavailable_rows()
            };
            terminal::display_categories(&rows);
        }

        Commands::Status => {
            status::show(&config)?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            config.require_corpus()?;
            info!(corpus = %config.corpus_dir.display(), "Starting web host");
            word_utility::web::run_server(config, port, &bind).await?;
        }
    }

    Ok(())
}

/// Emit the error record an analyze host expects on stdout.
fn report_config_error(word: &str, format: Format, err: &anyhow::Error) -> Result<()> {
    let message = format!("Invalid configuration: {err}");
    match format {
        Format::Lines => write_error(&mut io::stdout().lock(), word, &message)?,
        Format::Json => {
            let record = AnalysisResult::error_message(word, message);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Format::Pretty => {}
    }
    Ok(())
}

/// Environment config with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(dir) = &cli.corpus_dir {
        config.corpus_dir = dir.clone();
    }
    if let Some(top_k) = cli.top_k {
        config.top_k = top_k;
    }
    config.validate()?;
    info!(
        corpus = %config.corpus_dir.display(),
        top_k = config.top_k,
        "Configuration loaded"
    );
    Ok(config)
}
