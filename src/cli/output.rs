//! Result reporting
//!
//! JSON mode prints every result as one JSON line. Text mode prints matches
//! to stdout, errors to stderr, and no-matches to stderr only when verbose.

use console::style;
use futures::StreamExt;

use crate::search::{EbiResult, EbiResults};

/// A rendered line and the stream it belongs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Stdout(String),
    Error(String),
    Info(String),
}

/// Tally of reported results
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportCounts {
    pub matches: usize,
    pub no_matches: usize,
    pub errors: usize,
}

/// Output handler for search results
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    json: bool,
    verbose: bool,
}

impl Reporter {
    pub fn new(json: bool, verbose: bool) -> Self {
        Self { json, verbose }
    }

    /// Render one result, or `None` when it is suppressed
    pub fn render(&self, result: &EbiResult) -> Option<ReportLine> {
        if self.json {
            return Some(match serde_json::to_string(result) {
                Ok(line) => ReportLine::Stdout(line),
                Err(e) => ReportLine::Error(format!(
                    "ERROR: could not serialize result for '{}': {}",
                    result.repository(),
                    e
                )),
            });
        }

        match result {
            EbiResult::Match(m) => Some(ReportLine::Stdout(match &m.text_suffix {
                Some(suffix) if !suffix.is_empty() => format!("{} {}", m.base.repository, suffix),
                _ => m.base.repository.clone(),
            })),
            EbiResult::Error(e) => Some(ReportLine::Error(e.error.clone())),
            EbiResult::NoMatch(n) if self.verbose => Some(ReportLine::Info(n.message.clone())),
            EbiResult::NoMatch(_) => None,
        }
    }

    /// Print one result
    pub fn report(&self, result: &EbiResult) {
        match self.render(result) {
            Some(ReportLine::Stdout(line)) => println!("{}", line),
            Some(ReportLine::Error(line)) => eprintln!("{}", style(line).red().for_stderr()),
            Some(ReportLine::Info(line)) => eprintln!("{}", style(line).dim().for_stderr()),
            None => {}
        }
    }

    /// Print results as each repository settles
    pub async fn report_all(&self, results: &EbiResults) -> ReportCounts {
        let mut counts = ReportCounts::default();
        let mut settled = results.settled_in_completion_order();
        while let Some(entry) = settled.next().await {
            let result = entry.unwrap_or_else(|error| error);
            match &result {
                EbiResult::Match(_) => counts.matches += 1,
                EbiResult::NoMatch(_) => counts.no_matches += 1,
                EbiResult::Error(_) => counts.errors += 1,
            }
            self.report(&result);
        }
        counts
    }
}
