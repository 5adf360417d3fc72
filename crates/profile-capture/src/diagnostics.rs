//! Diagnostics for items skipped during extraction.
//!
//! Extraction favors partial results: a malformed experience or education
//! item is parsed into `Result<_, SkipReason>`, only successes reach the
//! record, and every failure is handed to a [`DiagnosticSink`]. The default
//! sink forwards to `tracing`; [`MemorySink`] keeps the events for callers
//! that want to show or assert on them.

use serde::Serialize;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

/// Profile section an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Experience,
    Education,
}

/// Why an item could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum SkipReason {
    /// A structural element the parser relies on is absent.
    #[error("{0} not found")]
    MissingElement(&'static str),
}

impl SkipReason {
    pub fn missing(what: &'static str) -> Self {
        Self::MissingElement(what)
    }
}

/// What happened to the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The item was left out of the result.
    Skipped,
    /// The preferred parser failed and a simpler one was used instead.
    FellBack,
}

/// One diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub section: Section,
    /// Index of the top-level entry within its section.
    pub entry: usize,
    /// Index of the nested role or program, when the event concerns one.
    pub item: Option<usize>,
    pub kind: DiagnosticKind,
    pub reason: SkipReason,
}

/// Receives diagnostics from the extraction engines.
pub trait DiagnosticSink {
    fn record(&self, diagnostic: Diagnostic);

    /// Report an entry (or a nested item of it) that was left out.
    fn skipped(&self, section: Section, entry: usize, item: Option<usize>, reason: SkipReason) {
        self.record(Diagnostic {
            section,
            entry,
            item,
            kind: DiagnosticKind::Skipped,
            reason,
        });
    }

    /// Report an entry that was parsed by a fallback path.
    fn fell_back(&self, section: Section, entry: usize, reason: SkipReason) {
        self.record(Diagnostic {
            section,
            entry,
            item: None,
            kind: DiagnosticKind::FellBack,
            reason,
        });
    }
}

/// Sink that logs every event as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, d: Diagnostic) {
        warn!(
            section = ?d.section,
            entry = d.entry,
            item = ?d.item,
            kind = ?d.kind,
            "{}",
            d.reason
        );
    }
}

/// Sink that logs like [`TracingSink`] and also keeps every event.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, diagnostic: Diagnostic) {
        TracingSink.record(diagnostic.clone());
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic);
        }
    }
}
