//! # dbrew-schema: Recipe Loading & Validation
//!
//! Turns a recipe file on disk into a pass/fail verdict.
//!
//! ## Modules
//!
//! - [`load`]: read a file and parse YAML into a JSON value.
//! - [`validate`]: the embedded recipe JSON Schema and its compiled form.
//! - [`pipeline`]: [`RecipeValidator`], which chains loading, schema
//!   validation and the file-list invariants from `dbrew-core`.
//! - [`error`]: [`RecipeError`], one variant per failing phase.
//!
//! ## Crate Policy
//!
//! - Depends only on `dbrew-core` internally.
//! - Schema validation is a trust boundary: invalid documents are rejected
//!   with structured errors including instance path, schema path and message.
//! - Unknown recipe properties are accepted, matching the published recipes.

pub mod error;
pub mod load;
pub mod pipeline;
pub mod validate;

pub use error::RecipeError;
pub use load::load_document;
pub use pipeline::{Outcome, RecipeValidator};
pub use validate::{
    RecipeSchema, SchemaValidationError, ValidationViolations, Violation, RECIPE_SCHEMA,
    RECIPE_SCHEMA_NAME,
};
