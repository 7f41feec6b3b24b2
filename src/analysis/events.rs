// Event channel — progress and the terminal result as one message stream.
//
// Hosts that relay output to their own consumers (the SSE endpoint, a worker
// pool) subscribe to this instead of scraping text. The stream always ends
// with exactly one `Result` event.

use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::error;

use super::orchestrator::{AnalysisRequest, Analyzer};
use super::progress::{AnalysisState, ProgressSink};
use super::result::AnalysisResult;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    Progress(String),
    Result(AnalysisResult),
}

/// Forwards progress messages into a channel. A dropped receiver is ignored:
/// progress is advisory and the analysis runs to completion regardless.
pub struct ChannelSink {
    tx: UnboundedSender<AnalysisEvent>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<AnalysisEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn progress(&mut self, _state: AnalysisState, message: &str) {
        let _ = self.tx.send(AnalysisEvent::Progress(message.to_string()));
    }
}

/// Run `request` and publish every event to `tx`, ending with the result.
pub fn run_to_channel(
    analyzer: &Analyzer,
    request: &AnalysisRequest,
    tx: UnboundedSender<AnalysisEvent>,
) {
    let mut sink = ChannelSink::new(tx.clone());
    let result = analyzer.run(request, &mut sink);
    let _ = tx.send(AnalysisEvent::Result(result));
}

/// Run `request` on a blocking thread and return its event stream.
///
/// Must be called from within a tokio runtime.
pub fn spawn_analysis(
    analyzer: Arc<Analyzer>,
    request: AnalysisRequest,
) -> UnboundedReceiver<AnalysisEvent> {
    let word = request.word.clone();
    spawn_relay(word, move |tx| run_to_channel(&analyzer, &request, tx))
}

/// Run `job` on a blocking thread and relay its events.
///
/// If the job panics or returns without publishing a result, the stream
/// still ends with an error record for `word`. Events after the first
/// result are dropped.
pub fn spawn_relay<F>(word: String, job: F) -> UnboundedReceiver<AnalysisEvent>
where
    F: FnOnce(UnboundedSender<AnalysisEvent>) + Send + 'static,
{
    let (job_tx, mut job_rx) = unbounded_channel();
    let (tx, rx) = unbounded_channel();
    let handle = tokio::task::spawn_blocking(move || job(job_tx));

    tokio::spawn(async move {
        let mut finished = false;
        while let Some(event) = job_rx.recv().await {
            finished = matches!(event, AnalysisEvent::Result(_));
            let _ = tx.send(event);
            if finished {
                break;
            }
        }
        drop(job_rx);

        if let Err(e) = handle.await {
            error!(error = %e, word = %word, "Analysis task failed");
        }
        if !finished {
            let result = AnalysisResult::error_message(&word, "Analysis failed unexpectedly");
            let _ = tx.send(AnalysisEvent::Result(result));
        }
    });

    rx
}

/// Run `request` and collect the whole event stream.
pub fn collect_events(analyzer: &Analyzer, request: &AnalysisRequest) -> Vec<AnalysisEvent> {
    let (tx, mut rx): (_, UnboundedReceiver<AnalysisEvent>) = unbounded_channel();
    run_to_channel(analyzer, request, tx);
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
