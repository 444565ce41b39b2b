//! Outcome reporting
//!
//! One line per row, tagged so runs can be grepped and counted, followed by
//! a summary line.

use crate::core::types::{OutcomeStatus, RowOutcome};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// Output format for outcome lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// `[CREATED] row 1 create alice: user created with UserId ...`
pub fn render(outcome: &RowOutcome) -> String {
    format!(
        "[{}] row {} {} {}: {}",
        outcome.status.tag(),
        outcome.row_number(),
        outcome.operation,
        outcome.username.as_deref().unwrap_or("-"),
        outcome.detail
    )
}

#[derive(Serialize)]
struct JsonLine<'a> {
    row: usize,
    #[serde(flatten)]
    outcome: &'a RowOutcome,
}

pub fn render_json(outcome: &RowOutcome) -> Result<String> {
    Ok(serde_json::to_string(&JsonLine {
        row: outcome.row_number(),
        outcome,
    })?)
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    summary: &'a BatchSummary,
}

/// Totals per status for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub created: usize,
    pub deleted: usize,
    pub group_skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a RowOutcome>) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    pub fn record(&mut self, outcome: &RowOutcome) {
        self.total += 1;
        match outcome.status {
            OutcomeStatus::Created => self.created += 1,
            OutcomeStatus::Deleted => self.deleted += 1,
            OutcomeStatus::GroupSkipped => self.group_skipped += 1,
            OutcomeStatus::Failed => self.failed += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "summary: {} rows, {} created, {} deleted, {} group skipped, {} failed",
            self.total, self.created, self.deleted, self.group_skipped, self.failed
        )
    }
}

/// Writes outcome lines as they arrive and keeps the running summary
pub struct OutcomeReporter<W: Write> {
    out: W,
    format: OutputFormat,
    summary: BatchSummary,
}

impl<W: Write> OutcomeReporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            summary: BatchSummary::default(),
        }
    }

    /// Count the outcome, then write its line. The count survives a failed write.
    pub fn report(&mut self, outcome: &RowOutcome) -> Result<()> {
        self.summary.record(outcome);
        let line = match self.format {
            OutputFormat::Text => render(outcome),
            OutputFormat::Json => render_json(outcome)?,
        };
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    /// Write the summary line and hand back the totals
    pub fn finish(mut self) -> Result<BatchSummary> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", self.summary)?,
            OutputFormat::Json => writeln!(
                self.out,
                "{}",
                serde_json::to_string(&SummaryLine {
                    summary: &self.summary
                })?
            )?,
        }
        self.out.flush()?;
        Ok(self.summary)
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }
}
