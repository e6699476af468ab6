//! Prints diagnostics without stopping anything.

use std::sync::{Mutex, PoisonError};

use log::debug;

use crate::{
    config::APPLICATION_NAME,
    error::{Error, ErrorKind},
    progress::Progress,
};

/// A reported error, kept for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
}

/// Renders errors to stderr and remembers what it rendered.
///
/// Shared by every worker of a run; reporting never panics and never exits.
#[derive(Debug)]
pub struct Reporter {
    progress: Progress,
    application: String,
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(Progress::new())
    }
}

impl Reporter {
    pub fn new(progress: Progress) -> Self {
        Self {
            progress,
            application: APPLICATION_NAME.to_string(),
            diagnostics: Mutex::new(Vec::new()),
        }
    }

    /// A reporter whose bars never draw, for tests and embedding.
    pub fn hidden() -> Self {
        Self::new(Progress::hidden())
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// The line printed for `error`.
    pub fn render(&self, error: &Error) -> String {
        let message = error.to_string();
        let message = message.trim_end();
        match error.kind() {
            ErrorKind::Application => {
                format!("{} ({}) => {message}", ErrorKind::Application.label(), self.application)
            }
            kind => format!("{} => {message}", kind.label()),
        }
    }

    pub fn report(&self, error: Error) {
        let line = self.render(&error);
        debug!("reported {:?}: {error:?}", error.kind());
        self.progress.suspend(|| eprintln!("{line}"));

        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                kind: error.kind(),
                message: error.to_string(),
            });
    }

    /// Print a line to stdout around the progress bars.
    pub fn println(&self, line: impl AsRef<str>) {
        self.progress.suspend(|| println!("{}", line.as_ref()));
    }

    /// Everything reported so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|d| d.kind == kind)
            .count()
    }
}
