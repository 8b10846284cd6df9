//! # Batch Validation
//!
//! Lints every recipe selected by the command-line prefix and folds the
//! per-recipe outcomes into one exit status.
//!
//! Each recipe is validated to completion before the next one starts. A
//! failing recipe never aborts the batch unless fail-fast is on, in which
//! case the run stops right after the first failure.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use dbrew_core::Reporter;
use dbrew_schema::{Outcome, RecipeValidator};

use crate::discover::find_recipes;

/// Arguments for the recipe linter.
#[derive(Args, Debug, Clone)]
pub struct LintArgs {
    /// Recipe file, directory of recipes, or glob-style path prefix.
    #[arg(value_name = "PREFIX", default_value = ".")]
    pub prefix: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,

    /// Stop at the first invalid recipe.
    #[arg(short = 'x', long)]
    pub fail_fast: bool,
}

impl LintArgs {
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            fail_fast: self.fail_fast,
        }
    }
}

/// Options controlling a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Stop after the first failed recipe.
    pub fail_fast: bool,
}

/// Summary of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of candidate recipes discovered.
    pub total: usize,
    /// Number of recipes actually validated.
    pub attempted: usize,
    /// Number of recipes that passed.
    pub passed: usize,
    /// Recipes that failed, in the order they were validated.
    pub failures: Vec<PathBuf>,
    /// Combined outcome of every attempted recipe.
    pub outcome: Outcome,
}

impl BatchReport {
    /// Number of recipes that failed.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Process exit code: 0 when every attempted recipe passed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        self.outcome.exit_status()
    }
}

/// Validate `recipes` in order.
pub fn run_batch(
    recipes: &[PathBuf],
    validator: &RecipeValidator,
    options: BatchOptions,
    reporter: &mut dyn Reporter,
) -> BatchReport {
    let mut report = BatchReport {
        total: recipes.len(),
        attempted: 0,
        passed: 0,
        failures: Vec::new(),
        outcome: Outcome::Pass,
    };

    for path in recipes {
        let outcome = validator.check(path, reporter);
        report.attempted += 1;
        report.outcome |= outcome;

        if outcome.is_pass() {
            report.passed += 1;
        } else {
            report.failures.push(path.clone());
            if options.fail_fast {
                tracing::debug!(
                    remaining = recipes.len() - report.attempted,
                    "fail-fast: stopping after {}",
                    path.display()
                );
                break;
            }
        }
    }

    reporter.finished(report.attempted, report.passed);
    report
}

/// Discover and validate the recipes selected by `args`.
///
/// Returns exit code: 0 on success, 1 on validation failure.
///
/// # Errors
///
/// Operational failures (unreadable directory, invalid pattern, schema that
/// does not compile) are returned as errors rather than folded into the
/// exit code.
pub fn run_lint(args: &LintArgs, reporter: &mut dyn Reporter) -> Result<u8> {
    tracing::debug!(prefix = %args.prefix.display(), "Datasets root");

    let validator = RecipeValidator::new().context("failed to compile recipe schema")?;
    let recipes = find_recipes(&args.prefix)?;

    if recipes.is_empty() {
        tracing::warn!("no recipes found under {}", display_prefix(&args.prefix));
        return Ok(0);
    }

    let report = run_batch(&recipes, &validator, args.batch_options(), reporter);
    Ok(report.exit_code())
}

fn display_prefix(prefix: &Path) -> String {
    if prefix.as_os_str().is_empty() {
        ".".to_string()
    } else {
        prefix.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use dbrew_core::{CollectingReporter, Diagnostic};

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: LintArgs,
    }

    fn parse(argv: &[&str]) -> LintArgs {
        TestCli::parse_from(std::iter::once("dbrew-lint").chain(argv.iter().copied())).args
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.prefix, PathBuf::from("."));
        assert!(!args.debug);
        assert!(!args.fail_fast);
    }

    #[test]
    fn short_flags() {
        let args = parse(&["-d", "-x", "recipes/"]);
        assert_eq!(args.prefix, PathBuf::from("recipes/"));
        assert!(args.debug);
        assert!(args.batch_options().fail_fast);
    }

    #[test]
    fn long_flags() {
        let args = parse(&["--fail-fast", "--debug"]);
        assert!(args.fail_fast);
        assert!(args.debug);
    }

    #[test]
    fn empty_batch_passes() {
        let validator = RecipeValidator::new().unwrap();
        let mut reporter = CollectingReporter::new();
        let report = run_batch(&[], &validator, BatchOptions::default(), &mut reporter);

        assert_eq!(report.attempted, 0);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(
            reporter.diagnostics(),
            &[Diagnostic::Finished {
                attempted: 0,
                passed: 0
            }]
        );
    }

    #[test]
    fn unreadable_recipes_counted_as_failures() {
        let dir = tempfile::tempdir().unwrap();
        let recipes = vec![dir.path().join("a.yaml"), dir.path().join("b.yaml")];
        let validator = RecipeValidator::new().unwrap();
        let mut reporter = CollectingReporter::new();

        let report = run_batch(&recipes, &validator, BatchOptions::default(), &mut reporter);

        assert_eq!(report.attempted, 2);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.failures, recipes);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn lint_with_no_matches_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(&[dir.path().to_str().unwrap()]);
        let mut reporter = CollectingReporter::new();
        assert_eq!(run_lint(&args, &mut reporter).unwrap(), 0);
        assert!(reporter.diagnostics().is_empty());
    }
}
