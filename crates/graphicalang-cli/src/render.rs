//! Terminal renderer for `graphicalang run`.

use std::io::Write;

use graphicalang_eval::{CancelToken, DriveOutcome, Renderer, RunningState};

/// Output format for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One human-readable line per snapshot.
    Text,
    /// One JSON document per line, in the `RunningState` wire shape.
    Json,
}

/// Writes snapshots to `out`. A failed write (e.g. a closed pipe) cancels
/// the run.
pub struct TerminalRenderer<W: Write> {
    out: W,
    format: Format,
    cancel: CancelToken,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, format: Format, cancel: CancelToken) -> Self {
        TerminalRenderer {
            out,
            format,
            cancel,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `[3] angle=15 x=10 y=0 | sleep 50`
pub fn format_text(state: &RunningState) -> String {
    let vars: Vec<String> = state
        .variables
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    let mut line = format!("[{}] {}", state.current_stat, vars.join(" "));
    if let Some(duration) = state.duration {
        line.push_str(&format!(" | sleep {duration}"));
    }
    line
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, state: &RunningState) {
        let written = match self.format {
            Format::Text => writeln!(self.out, "{}", format_text(state)),
            Format::Json => match serde_json::to_string(state) {
                Ok(json) => writeln!(self.out, "{json}"),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to serialize snapshot");
                    Ok(())
                }
            },
        };
        if let Err(e) = written {
            tracing::warn!(error = %e, "output closed, stopping run");
            self.cancel.cancel();
        }
    }

    fn finish(&mut self, outcome: &DriveOutcome) {
        let _ = self.out.flush();
        tracing::debug!(?outcome, "renderer finished");
    }
}
