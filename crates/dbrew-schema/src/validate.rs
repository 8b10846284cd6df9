//! # Schema Validation
//!
//! Structural validation of recipe documents against the recipe JSON
//! Schema (draft-04), which is compiled into the binary.
//!
//! ## Security Invariant
//!
//! Recipes are untrusted input. A document must pass schema validation
//! before it is mapped onto the typed model in `dbrew-core`, and every
//! rejection carries the instance path, the schema path and a
//! human-readable message for each violation.
//!
//! ## Schema Shape
//!
//! The top level requires `name`, `description` and `homepage` and must
//! match exactly one of `dataset-single` (a `url`) or `dataset-multi`
//! (a `files` array whose items recursively match either). Unknown
//! properties are accepted at every level.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// Identifier used for the embedded schema in diagnostics.
pub const RECIPE_SCHEMA_NAME: &str = "recipe.schema.json";

/// The recipe schema source.
pub const RECIPE_SCHEMA: &str = include_str!("../schemas/recipe.schema.json");

/// Error building the schema validator.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The schema source is not valid JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// The compiled recipe schema.
///
/// Compilation happens once; the same instance validates any number of
/// documents and holds no per-document state.
pub struct RecipeSchema {
    validator: Validator,
}

impl fmt::Debug for RecipeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeSchema")
            .field("schema", &RECIPE_SCHEMA_NAME)
            .finish()
    }
}

impl RecipeSchema {
    /// Compile the embedded recipe schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the embedded
    /// source is not JSON, or `ValidatorBuildError` if it is not a valid
    /// draft-04 schema.
    pub fn new() -> Result<Self, SchemaValidationError> {
        let schema: Value = serde_json::from_str(RECIPE_SCHEMA).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: RECIPE_SCHEMA_NAME.to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft4);
        let validator =
            opts.build(&schema)
                .map_err(|e| SchemaValidationError::ValidatorBuildError {
                    schema_name: RECIPE_SCHEMA_NAME.to_string(),
                    reason: e.to_string(),
                })?;
        Ok(Self { validator })
    }

    /// Returns true if `instance` satisfies the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate a parsed document.
    ///
    /// # Errors
    ///
    /// Returns every violation found, in the order the validator reports them.
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationViolations> {
        let errors: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationViolations::new(errors))
        }
    }
}
