//! # dbrew-core: Foundational Types for Dataset Recipes
//!
//! A recipe is a YAML document describing one dataset and the file(s) that
//! make it up. This crate holds the typed form of a recipe and the checks
//! that only make sense once the document has passed schema validation.
//!
//! ## Key Design Principles
//!
//! 1. **Tagged union for recipe fragments.** A fragment is either a
//!    [`Fragment::Single`] file or a [`Fragment::Multi`] group of nested
//!    fragments. Code that walks a recipe matches on the variant instead of
//!    probing an untyped mapping.
//!
//! 2. **Lazy file extraction.** [`iter_files`] walks the fragment tree in
//!    pre-order and yields one [`FileDescriptor`] per downloadable file.
//!
//! 3. **Explicit reporting.** Diagnostics flow through a [`Reporter`] passed
//!    in by the caller, never through global state.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dbrew-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod files;
pub mod recipe;
pub mod report;

// Re-export primary types for ergonomic imports.
pub use error::FileListError;
pub use files::{iter_files, url_basename, validate_files, FileDescriptor, Files};
pub use recipe::{ChecksumAlgorithm, Fragment, MultiFile, Recipe, SingleFile};
pub use report::{CollectingReporter, Diagnostic, Phase, Reporter, TracingReporter};
