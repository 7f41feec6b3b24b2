// POST /api/analyze — run one analysis and stream it back as server-sent events.
//
// Body: {"category": "...", "word": "..."}. Returns 400 if either is missing.
// Each progress message becomes `{"type":"console","message":...}`; the
// stream ends with `{"type":"result", ...record}`.
//
// The analysis itself is synchronous, so it runs on a blocking thread and
// publishes into an event channel that the response stream drains. A panic
// on that thread still ends the stream with an error record.

use std::convert::Infallible;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::stream;
use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::events::spawn_analysis;
use crate::analysis::{AnalysisEvent, AnalysisRequest, AnalysisResult};
use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub word: Option<String>,
}

impl AnalyzeBody {
    /// Both fields present and non-blank.
    fn into_request(self) -> Option<AnalysisRequest> {
        let category = self.category.filter(|c| !c.trim().is_empty())?;
        let word = self.word.filter(|w| !w.trim().is_empty())?;
        Some(AnalysisRequest::new(category, word))
    }
}

pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(body)) => body.into_request(),
        Err(e) => {
            warn!(error = %e, "Rejected analyze body");
            None
        }
    };
    let Some(request) = request else {
        return api_error(StatusCode::BAD_REQUEST, "Category and word are required");
    };

    info!(category = %request.category, word = %request.word, "Analysis requested");

    // The channel closes right after the result event.
    let rx = spawn_analysis(state.analyzer.clone(), request);
    let events = stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((Ok::<_, Infallible>(to_sse(&event)), rx))
    });

    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn to_sse(event: &AnalysisEvent) -> Event {
    Event::default().data(event_payload(event).to_string())
}

/// JSON payload for one streamed event.
pub fn event_payload(event: &AnalysisEvent) -> serde_json::Value {
    match event {
        AnalysisEvent::Progress(message) => {
            serde_json::json!({ "type": "console", "message": message })
        }
        AnalysisEvent::Result(result) => result_payload(result),
    }
}

fn result_payload(result: &AnalysisResult) -> serde_json::Value {
    let mut payload = serde_json::json!({ "type": "result" });
    if let (Some(out), Ok(serde_json::Value::Object(record))) =
        (payload.as_object_mut(), serde_json::to_value(result))
    {
        out.extend(record);
    }
    payload
}
