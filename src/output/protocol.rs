// Line protocol for process-based hosts.
//
// Progress messages are written one per line, verbatim. The final line is the
// result record, prefixed with `RESULT:` and encoded as compact JSON. A host
// reads lines until it sees the marker.

use std::io::{self, Write};

use crate::analysis::progress::{AnalysisState, ProgressSink};
use crate::analysis::AnalysisResult;

pub const RESULT_MARKER: &str = "RESULT:";

/// A line read back from the protocol stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolLine {
    Progress(String),
    Result(serde_json::Value),
}

/// Classify one line of output. Blank lines yield `None`; a `RESULT:` line
/// whose payload isn't valid JSON is an error.
pub fn parse_line(line: &str) -> serde_json::Result<Option<ProtocolLine>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    match line.strip_prefix(RESULT_MARKER) {
        Some(payload) => Ok(Some(ProtocolLine::Result(serde_json::from_str(payload)?))),
        None => Ok(Some(ProtocolLine::Progress(line.to_string()))),
    }
}

/// Write the terminal result line.
pub fn write_result<W: Write>(out: &mut W, result: &AnalysisResult) -> io::Result<()> {
    let json = result.to_json().map_err(io::Error::other)?;
    writeln!(out, "{RESULT_MARKER}{json}")?;
    out.flush()
}

/// Write a terminal error record for `word` when no analysis could run.
pub fn write_error<W: Write>(out: &mut W, word: &str, message: &str) -> io::Result<()> {
    write_result(out, &AnalysisResult::error_message(word, message))
}

/// Progress sink that writes each message as its own line and flushes, so a
/// host reading a pipe sees messages as they happen.
pub struct LineWriter<W: Write> {
    out: W,
}

impl<W: Write> LineWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for LineWriter<W> {
    fn progress(&mut self, _state: AnalysisState, message: &str) {
        // Message text must not break framing.
        let line = message.replace(['\r', '\n'], " ");
        let _ = writeln!(self.out, "{line}").and_then(|_| self.out.flush());
    }
}
