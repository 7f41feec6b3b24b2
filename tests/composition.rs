// Composition tests — full analyses through the orchestrator.
//
// Drives Analyzer end to end over in-memory and on-disk corpora and checks
// the result record, the progress stream, caching and the line protocol.

use std::fs;
use std::sync::Arc;

use word_utility::analysis::events::collect_events;
use word_utility::analysis::{
    AnalysisEvent, AnalysisRequest, AnalysisState, Analyzer, NoProgress, ProgressLog,
};
use word_utility::corpus::tokenize::Tokenizer;
use word_utility::corpus::{Category, DirectoryCorpus, InMemoryCorpus};
use word_utility::error::AnalysisError;
use word_utility::output::protocol::{parse_line, write_result, LineWriter, ProtocolLine};
use word_utility::scoring::Metric;

fn hockey_corpus() -> InMemoryCorpus {
    InMemoryCorpus::new().with_category(
        Category::Hockey,
        ["puck goal ice", "goal save ice"],
        ["puck car engine"],
    )
}

fn analyzer() -> Analyzer {
    Analyzer::new(Arc::new(hockey_corpus()), Tokenizer::plain())
}

fn analyze(analyzer: &Analyzer, category: &str, word: &str) -> word_utility::analysis::AnalysisResult {
    analyzer
        .analyze(&AnalysisRequest::new(category, word), &mut NoProgress)
        .unwrap()
}

fn board_words(result: &word_utility::analysis::AnalysisResult, metric: Metric) -> Vec<String> {
    result
        .top_words
        .get(metric)
        .entries
        .iter()
        .map(|e| e.word.clone())
        .collect()
}

// ============================================================
// Hockey example
// ============================================================

#[test]
fn goal_is_associated_with_hockey() {
    let result = analyze(&analyzer(), "hockey", "goal");
    assert_eq!(result.word, "goal");
    assert_eq!(result.frequency, 2);
    assert!(result.mutual_information > 0.0);
    assert!(result.chi_squared > 0.0);
    assert!(result.error.is_none());
    assert!(result.note.is_none());
}

#[test]
fn leaderboards_are_led_by_top_terms() {
    let result = analyze(&analyzer().with_top_k(3), "hockey", "goal");

    // car and engine are perfectly (negatively) associated, as are goal and ice
    assert_eq!(board_words(&result, Metric::MutualInformation), vec!["car", "engine", "goal"]);
    assert_eq!(board_words(&result, Metric::ChiSquared), vec!["car", "engine", "goal"]);
    assert_eq!(board_words(&result, Metric::Frequency), vec!["goal", "ice", "puck"]);
}

#[test]
fn leaderboards_never_exceed_vocabulary() {
    let result = analyze(&analyzer().with_top_k(100), "hockey", "goal");
    for metric in Metric::ALL {
        assert_eq!(result.top_words.get(metric).len(), 6, "{metric}");
    }
}

// ============================================================
// Not-found and error paths
// ============================================================

#[test]
fn absent_word_scores_zero_with_note() {
    let result = analyze(&analyzer(), "hockey", "zamboni");
    assert_eq!(result.frequency, 0);
    assert_eq!(result.mutual_information, 0.0);
    assert_eq!(result.chi_squared, 0.0);
    assert!(result.error.is_none());
    assert!(result.note.as_deref().unwrap().contains("zamboni"));
    // leaderboards are still populated
    assert!(!result.top_words.mi.is_empty());
}

#[test]
fn stop_word_gets_its_own_note() {
    let analyzer = Analyzer::new(Arc::new(hockey_corpus()), Tokenizer::english());
    let result = analyze(&analyzer, "hockey", "the");
    assert_eq!(result.frequency, 0);
    assert!(result.note.as_deref().unwrap().contains("stop word"));
}

#[test]
fn multi_token_words_score_zero_with_note() {
    let analyzer = analyzer();
    for word in ["goal puck", "goal-keeper"] {
        let result = analyze(&analyzer, "hockey", word);
        assert_eq!(result.word, word);
        assert_eq!(result.frequency, 0, "{word}");
        assert_eq!(result.mutual_information, 0.0, "{word}");
        assert_eq!(result.chi_squared, 0.0, "{word}");
        assert!(result.error.is_none());
        let note = result.note.as_deref().unwrap();
        assert!(note.contains(word), "{note}");
        assert!(note.contains("not a single vocabulary term"), "{note}");
    }
}

#[test]
fn surrounding_punctuation_is_ignored() {
    let result = analyze(&analyzer(), "hockey", "goal!!!");
    assert_eq!(result.frequency, 2);
    assert!(result.mutual_information > 0.0);
    assert!(result.note.is_none());
}

#[test]
fn unknown_category_is_an_error() {
    let mut log = ProgressLog::default();
    let err = analyzer()
        .analyze(&AnalysisRequest::new("cooking", "goal"), &mut log)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::CategoryNotFound(_)));
    assert_eq!(log.states(), vec![AnalysisState::Failed]);
    assert!(log
        .messages()
        .any(|m| m == "Error: Unknown category 'cooking'"));
}

#[test]
fn failure_record_has_zeros_and_empty_boards() {
    let result = analyzer().run(&AnalysisRequest::new("cooking", "goal"), &mut NoProgress);
    assert!(result.is_error());
    assert_eq!(result.frequency, 0);
    assert_eq!(result.mutual_information, 0.0);
    for metric in Metric::ALL {
        assert!(result.top_words.get(metric).is_empty());
    }
}

#[test]
fn unavailable_corpus_becomes_error_record() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("missing");
    let analyzer = Analyzer::new(Arc::new(DirectoryCorpus::new(&root)), Tokenizer::plain());

    let mut log = ProgressLog::default();
    let result = analyzer.run(&AnalysisRequest::new("hockey", "goal"), &mut log);

    let error = result.error.as_deref().unwrap();
    assert!(error.starts_with("Corpus unavailable"), "{error}");
    assert!(!error.contains("missing"), "{error}");
    assert!(!error.contains(&*root.to_string_lossy()), "{error}");
    assert_eq!(result.frequency, 0);
    assert_eq!(result.mutual_information, 0.0);
    assert_eq!(result.chi_squared, 0.0);
    for metric in Metric::ALL {
        assert!(result.top_words.get(metric).is_empty());
    }

    assert_eq!(log.states().last(), Some(&AnalysisState::Failed));
    assert!(log.messages().any(|m| m.starts_with("Error: Corpus unavailable")));
}

// ============================================================
// Determinism and caching
// ============================================================

#[test]
fn repeated_analysis_is_byte_identical() {
    let analyzer = analyzer();
    let first = analyze(&analyzer, "hockey", "goal").to_json().unwrap();
    let second = analyze(&analyzer, "hockey", "goal").to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn cached_and_uncached_results_match() {
    let uncached = analyzer();
    let cached = analyzer().with_cache(true);

    // first call fills the cache, second call reads from it
    let _ = analyze(&cached, "hockey", "ice");
    let from_cache = analyze(&cached, "hockey", "goal").to_json().unwrap();
    let fresh = analyze(&uncached, "hockey", "goal").to_json().unwrap();
    assert_eq!(from_cache, fresh);
}

#[test]
fn snapshot_can_be_reused_across_words() {
    let analyzer = analyzer();
    let table = analyzer.snapshot(Category::Hockey, &mut NoProgress).unwrap();
    let goal = analyzer.analyze_snapshot(Category::Hockey, &table, "goal", &mut NoProgress);
    let direct = analyze(&analyzer, "hockey", "goal");
    assert_eq!(goal, direct);
}

// ============================================================
// Hosts — event stream and line protocol
// ============================================================

#[test]
fn event_stream_reports_progress_then_result() {
    let events = collect_events(&analyzer(), &AnalysisRequest::new("hockey", "goal"));
    let (last, progress) = events.split_last().unwrap();
    assert!(matches!(last, AnalysisEvent::Result(r) if r.frequency == 2));
    assert!(progress
        .iter()
        .all(|e| matches!(e, AnalysisEvent::Progress(_))));
    assert!(matches!(&progress[0], AnalysisEvent::Progress(m) if m == "Fetching 'hockey' data..."));
}

#[test]
fn line_protocol_ends_with_one_result_line() {
    let analyzer = analyzer();
    let mut writer = LineWriter::new(Vec::new());
    let result = analyzer.run(&AnalysisRequest::new("hockey", "goal"), &mut writer);
    let mut out = writer.into_inner();
    write_result(&mut out, &result).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<ProtocolLine> = text
        .lines()
        .filter_map(|l| parse_line(l).unwrap())
        .collect();

    let results = lines
        .iter()
        .filter(|l| matches!(l, ProtocolLine::Result(_)))
        .count();
    assert_eq!(results, 1);
    match lines.last() {
        Some(ProtocolLine::Result(json)) => {
            assert_eq!(json["word"], "goal");
            assert_eq!(json["frequency"], 2);
            assert!(json.get("error").is_none());
            assert_eq!(json["top_words"]["frequency"][0]["word"], "goal");
        }
        other => panic!("expected result line last, got {other:?}"),
    }
}

#[test]
fn line_protocol_reports_errors_in_the_record() {
    let analyzer = analyzer();
    let mut writer = LineWriter::new(Vec::new());
    let result = analyzer.run(&AnalysisRequest::new("cooking", "goal"), &mut writer);
    let mut out = writer.into_inner();
    write_result(&mut out, &result).unwrap();

    let text = String::from_utf8(out).unwrap();
    let last = text.lines().last().unwrap();
    match parse_line(last).unwrap() {
        Some(ProtocolLine::Result(json)) => {
            assert_eq!(json["error"], "Unknown category 'cooking'");
            assert_eq!(json["top_words"]["mi"], serde_json::json!([]));
        }
        other => panic!("expected result line, got {other:?}"),
    }
}

// ============================================================
// On-disk corpus
// ============================================================

#[test]
fn directory_corpus_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    for (group, bodies) in [
        ("rec.sport.hockey", ["puck goal ice", "goal save ice"].as_slice()),
        ("rec.autos", ["puck car engine"].as_slice()),
    ] {
        let path = dir.path().join(group);
        fs::create_dir(&path).unwrap();
        for (i, body) in bodies.iter().enumerate() {
            fs::write(path.join(i.to_string()), format!("Subject: x\n\n{body}")).unwrap();
        }
    }

    let on_disk = Analyzer::new(Arc::new(DirectoryCorpus::new(dir.path())), Tokenizer::plain());
    let from_disk = analyze(&on_disk, "hockey", "goal");
    let in_memory = analyze(&analyzer(), "hockey", "goal");
    assert_eq!(from_disk, in_memory);

    // no space newsgroup on disk
    let missing = on_disk.run(&AnalysisRequest::new("space", "orbit"), &mut NoProgress);
    assert_eq!(missing.error.as_deref(), Some("Unknown category 'space'"));
}
