//! # Recipe Validation Pipeline
//!
//! Runs one recipe through four phases, stopping at the first failure:
//!
//! 1. **Opening**: read the file ([`RecipeError::Open`]).
//! 2. **Parsing**: parse YAML ([`RecipeError::Parse`]).
//! 3. **Schema checking**: validate against the recipe schema, then map
//!    onto the typed [`Recipe`] model ([`RecipeError::Schema`]).
//! 4. **Invariant checking**: filenames present and unique
//!    ([`RecipeError::Files`]).
//!
//! A recipe passes only if all four phases succeed. The validator holds
//! nothing but the compiled schema, so validating the same file twice gives
//! the same answer.

use std::path::Path;

use dbrew_core::{validate_files, Recipe, Reporter};
use serde::Deserialize;
use serde_json::Value;

use crate::error::RecipeError;
use crate::load::load_document;
use crate::validate::{
    RecipeSchema, SchemaValidationError, ValidationViolations, Violation, RECIPE_SCHEMA_NAME,
};

/// Result of validating one recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn is_pass(self) -> bool {
        self == Self::Pass
    }

    /// Process exit status contribution: 0 for pass, 1 for fail.
    pub fn exit_status(self) -> u8 {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
        }
    }
}

impl std::ops::BitOr for Outcome {
    type Output = Outcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        if self.is_pass() && rhs.is_pass() {
            Self::Pass
        } else {
            Self::Fail
        }
    }
}

impl std::ops::BitOrAssign for Outcome {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Validates recipe files against the schema and file-list invariants.
#[derive(Debug)]
pub struct RecipeValidator {
    schema: RecipeSchema,
}

impl RecipeValidator {
    /// Build a validator around the embedded recipe schema.
    pub fn new() -> Result<Self, SchemaValidationError> {
        Ok(Self {
            schema: RecipeSchema::new()?,
        })
    }

    /// Run every phase on the recipe at `path`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first phase that fails.
    pub fn validate_path(&self, path: &Path) -> Result<Recipe, RecipeError> {
        let document = load_document(path)?;
        self.validate_document(path, &document)
    }

    /// Run the schema and invariant phases on an already parsed document.
    ///
    /// `path` is used only to label errors.
    pub fn validate_document(&self, path: &Path, document: &Value) -> Result<Recipe, RecipeError> {
        self.check_document(path, document).map(|(recipe, _)| recipe)
    }

    /// Schema and invariant phases, also returning how many files the
    /// recipe declares.
    fn check_document(
        &self,
        path: &Path,
        document: &Value,
    ) -> Result<(Recipe, usize), RecipeError> {
        let schema_error = |violations: ValidationViolations| RecipeError::Schema {
            path: path.to_path_buf(),
            schema_name: RECIPE_SCHEMA_NAME.to_string(),
            violations,
        };

        self.schema.validate(document).map_err(schema_error)?;

        // The schema lets some shapes through that the typed model cannot
        // hold, e.g. a scalar inside a nested `files` list.
        let recipe = Recipe::deserialize(document).map_err(|e| {
            schema_error(ValidationViolations::new(vec![Violation {
                instance_path: String::new(),
                schema_path: String::new(),
                message: format!("unsupported recipe shape: {e}"),
            }]))
        })?;

        let file_count = validate_files(&recipe.root)
            .map_err(|source| RecipeError::Files {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        Ok((recipe, file_count))
    }

    /// Validate one recipe and report the result.
    ///
    /// Reports `checking` first, then either `passed` or exactly one
    /// `failed` diagnostic.
    pub fn check(&self, path: &Path, reporter: &mut dyn Reporter) -> Outcome {
        reporter.checking(path);
        let result = load_document(path).and_then(|document| self.check_document(path, &document));
        match result {
            Ok((_, file_count)) => {
                reporter.passed(path, file_count);
                Outcome::Pass
            }
            Err(e) => {
                reporter.failed(path, e.phase(), &e.to_string());
                Outcome::Fail
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbrew_core::{CollectingReporter, Diagnostic, FileListError, Phase};
    use serde_json::json;
    use std::path::PathBuf;

    fn validator() -> RecipeValidator {
        RecipeValidator::new().unwrap()
    }

    fn label() -> PathBuf {
        PathBuf::from("inline.yaml")
    }

    #[test]
    fn valid_multi_recipe_passes() {
        let doc = json!({
            "name": "census",
            "description": "Census extracts",
            "homepage": "https://example.org",
            "files": [
                {"name": "a", "url": "http://x/a.csv"},
                {"name": "b", "files": [{"name": "c", "url": "http://x/c.csv"}]}
            ]
        });
        let recipe = validator().validate_document(&label(), &doc).unwrap();
        assert_eq!(recipe.name(), "census");
    }

    #[test]
    fn schema_failure_stops_before_invariants() {
        // Duplicate filenames would also fail, but the schema phase runs first.
        let doc = json!({
            "name": "dup",
            "homepage": "h",
            "files": [
                {"name": "a", "url": "http://x/a.csv"},
                {"name": "b", "url": "http://y/a.csv"}
            ]
        });
        let err = validator().validate_document(&label(), &doc).unwrap_err();
        assert_eq!(err.phase(), Phase::SchemaChecking);
    }

    #[test]
    fn scalar_fragment_rejected_as_schema_violation() {
        let doc = json!({
            "name": "odd",
            "description": "d",
            "homepage": "h",
            "files": ["a.csv"]
        });
        let err = validator().validate_document(&label(), &doc).unwrap_err();
        match err {
            RecipeError::Schema { violations, .. } => {
                assert!(violations.violations()[0]
                    .message
                    .starts_with("unsupported recipe shape"));
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn duplicate_filenames_fail_invariants() {
        let doc = json!({
            "name": "dup",
            "description": "d",
            "homepage": "h",
            "files": [
                {"name": "x", "files": [{"name": "a", "url": "http://x/one/a.csv"}]},
                {"name": "y", "files": [{"name": "b", "url": "http://x/two/a.csv"}]}
            ]
        });
        match validator().validate_document(&label(), &doc).unwrap_err() {
            RecipeError::Files {
                source: FileListError::DuplicateFilename { filename, .. },
                ..
            } => assert_eq!(filename, "a.csv"),
            other => panic!("expected duplicate filename, got {other}"),
        }
    }

    #[test]
    fn check_reports_exactly_one_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let mut reporter = CollectingReporter::new();

        let outcome = validator().check(&path, &mut reporter);

        assert_eq!(outcome, Outcome::Fail);
        let failures = reporter.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, path.as_path());
        assert_eq!(failures[0].1, Phase::Opening);
    }

    #[test]
    fn check_reports_file_count_on_pass() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("census.yaml");
        std::fs::write(
            &path,
            "name: census\ndescription: d\nhomepage: h\nfiles:\n  \
             - {name: a, url: 'http://x/a.csv'}\n  \
             - {name: b, files: [{name: c, url: 'http://x/c.csv'}]}\n",
        )
        .unwrap();
        let mut reporter = CollectingReporter::new();

        assert!(validator().check(&path, &mut reporter).is_pass());
        assert_eq!(
            reporter.diagnostics().last(),
            Some(&Diagnostic::Passed {
                path: path.clone(),
                file_count: 2,
            })
        );
    }

    #[test]
    fn outcome_combines_with_or() {
        let mut total = Outcome::Pass;
        total |= Outcome::Pass;
        assert!(total.is_pass());
        total |= Outcome::Fail;
        total |= Outcome::Pass;
        assert_eq!(total, Outcome::Fail);
        assert_eq!(total.exit_status(), 1);
    }
}
