//! # dbrew-cli: Recipe Linter
//!
//! Provides the `dbrew-lint` command, which validates a directory of
//! dataset recipes before they are published:
//!
//! ```bash
//! dbrew-lint                  # every *.yaml in the current directory
//! dbrew-lint recipes/         # every *.yaml in recipes/
//! dbrew-lint recipes/census   # recipes/census*.yaml
//! dbrew-lint -x -d recipes/   # stop at the first failure, debug logging
//! ```
//!
//! Exit status is 0 when every recipe passes, 1 when any recipe is invalid
//! or unreadable, and 2 on operational errors such as a bad pattern.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; discovery and batching live here.
//! - Validation itself is delegated to `dbrew-schema`.

pub mod discover;
pub mod validate;

pub use discover::find_recipes;
pub use validate::{run_batch, run_lint, BatchOptions, BatchReport, LintArgs};
