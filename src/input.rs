//! Message input: normalization and the sequential submit loop.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::ChatClient;
use crate::driver::{StreamOutcome, StreamReport};
use crate::error::ClientResult;
use crate::traits::{HttpClient, ReplyView};

/// Trim a raw input line. Blank input yields `None` and sends nothing.
pub fn normalize_message(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Counts of how the submitted messages ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplSummary {
    pub sent: usize,
    pub completed: usize,
    pub errored: usize,
    pub truncated: usize,
}

impl ReplSummary {
    fn record(&mut self, report: &StreamReport) {
        self.sent += 1;
        match report.outcome {
            StreamOutcome::Completed => self.completed += 1,
            StreamOutcome::Errored => self.errored += 1,
            StreamOutcome::Truncated => self.truncated += 1,
        }
    }
}

/// Read lines from `input` until EOF, sending each non-blank one.
///
/// Each message gets a fresh view from `make_view`; the next line is not read
/// until the previous reply has finished streaming. When `prompt` is set it
/// is written to stdout before every read.
pub async fn run_repl<C, R, V, F>(
    client: &ChatClient<C>,
    input: R,
    prompt: Option<&str>,
    mut make_view: F,
) -> ClientResult<ReplSummary>
where
    C: HttpClient + ?Sized,
    R: AsyncBufRead + Unpin,
    V: ReplyView,
    F: FnMut() -> V,
{
    let mut lines = input.lines();
    let mut summary = ReplSummary::default();

    loop {
        if let Some(prompt) = prompt {
            let mut stdout = std::io::stdout();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(message) = normalize_message(&line) else {
            continue;
        };

        let mut view = make_view();
        let report = client.send(&client.request_for(message), &mut view).await;
        if report.outcome == StreamOutcome::Truncated {
            eprintln!("(reply ended before the server finished)");
        }
        summary.record(&report);
    }

    tracing::info!(
        "Input closed after {} messages ({} errored)",
        summary.sent,
        summary.errored
    );
    Ok(summary)
}
