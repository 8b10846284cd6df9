//! # Diagnostic Reporting
//!
//! Validation code never logs directly. It reports progress and failures
//! to a [`Reporter`] supplied by the caller: the CLI passes a
//! [`TracingReporter`], tests pass a [`CollectingReporter`] and inspect
//! what was reported.

use std::fmt;
use std::path::{Path, PathBuf};

/// Pipeline phase a recipe was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Opening and reading the file.
    Opening,
    /// Parsing YAML.
    Parsing,
    /// Validating against the recipe schema.
    SchemaChecking,
    /// Checking filename invariants on the file list.
    InvariantChecking,
}

impl Phase {
    /// Verb used in failure diagnostics ("Failed to <verb> <path>").
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Opening => "open",
            Self::Parsing => "parse",
            Self::SchemaChecking | Self::InvariantChecking => "validate",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Parsing => "parsing",
            Self::SchemaChecking => "schema",
            Self::InvariantChecking => "files",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for per-recipe progress and failure diagnostics.
pub trait Reporter {
    /// A recipe is about to be validated.
    fn checking(&mut self, path: &Path);

    /// A recipe passed every phase.
    fn passed(&mut self, path: &Path, file_count: usize);

    /// A recipe failed. Called exactly once per failed recipe.
    fn failed(&mut self, path: &Path, phase: Phase, message: &str);

    /// A batch run finished after `attempted` recipes, `passed` of which passed.
    fn finished(&mut self, attempted: usize, passed: usize) {
        let _ = (attempted, passed);
    }
}

/// Reporter that emits `tracing` events.
///
/// Each recipe gets one `debug` line when it starts and a `trace` line when
/// it passes. Failures go out at `error` level and the batch summary at
/// `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn checking(&mut self, path: &Path) {
        tracing::debug!("Validating {}", path.display());
    }

    fn passed(&mut self, path: &Path, file_count: usize) {
        tracing::trace!(files = file_count, "OK: {}", path.display());
    }

    fn failed(&mut self, path: &Path, phase: Phase, message: &str) {
        tracing::error!(
            phase = %phase,
            "Failed to {} {}: {message}",
            phase.verb(),
            path.display()
        );
    }

    fn finished(&mut self, attempted: usize, passed: usize) {
        tracing::info!("Recipes: {passed}/{attempted} passed");
    }
}

/// One event captured by a [`CollectingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Checking(PathBuf),
    Passed {
        path: PathBuf,
        file_count: usize,
    },
    Failed {
        path: PathBuf,
        phase: Phase,
        message: String,
    },
    Finished {
        attempted: usize,
        passed: usize,
    },
}

/// Reporter that records every event in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in the order they were reported.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Paths of every recipe the validator started on.
    pub fn checked(&self) -> Vec<&Path> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::Checking(path) => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// `(path, phase, message)` for every reported failure.
    pub fn failures(&self) -> Vec<(&Path, Phase, &str)> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::Failed {
                    path,
                    phase,
                    message,
                } => Some((path.as_path(), *phase, message.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for CollectingReporter {
    fn checking(&mut self, path: &Path) {
        self.diagnostics.push(Diagnostic::Checking(path.to_path_buf()));
    }

    fn passed(&mut self, path: &Path, file_count: usize) {
        self.diagnostics.push(Diagnostic::Passed {
            path: path.to_path_buf(),
            file_count,
        });
    }

    fn failed(&mut self, path: &Path, phase: Phase, message: &str) {
        self.diagnostics.push(Diagnostic::Failed {
            path: path.to_path_buf(),
            phase,
            message: message.to_string(),
        });
    }

    fn finished(&mut self, attempted: usize, passed: usize) {
        self.diagnostics
            .push(Diagnostic::Finished { attempted, passed });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn collecting_reporter_keeps_order() {
        let mut reporter = CollectingReporter::new();
        reporter.checking(Path::new("a.yaml"));
        reporter.passed(Path::new("a.yaml"), 2);
        reporter.checking(Path::new("b.yaml"));
        reporter.failed(Path::new("b.yaml"), Phase::Parsing, "bad indent");
        reporter.finished(2, 1);

        assert_eq!(reporter.diagnostics().len(), 5);
        assert_eq!(
            reporter.checked(),
            vec![Path::new("a.yaml"), Path::new("b.yaml")]
        );
        assert_eq!(
            reporter.failures(),
            vec![(Path::new("b.yaml"), Phase::Parsing, "bad indent")]
        );
        assert_eq!(
            reporter.diagnostics().last(),
            Some(&Diagnostic::Finished {
                attempted: 2,
                passed: 1
            })
        );
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn passing_recipe_logs_one_debug_line() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut reporter = TracingReporter;
            reporter.checking(Path::new("a.yaml"));
            reporter.passed(Path::new("a.yaml"), 2);
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().count(), 1, "{output}");
        assert!(output.contains("Validating a.yaml"), "{output}");
    }

    #[test]
    fn phase_verbs_match_diagnostic_wording() {
        assert_eq!(Phase::Opening.verb(), "open");
        assert_eq!(Phase::Parsing.verb(), "parse");
        assert_eq!(Phase::SchemaChecking.verb(), "validate");
        assert_eq!(Phase::InvariantChecking.verb(), "validate");
    }
}
