//! # Recipe Errors
//!
//! One variant per way a recipe can fail validation. Every variant carries
//! the recipe path and maps to the pipeline [`Phase`] that raised it.
//! `Display` describes the problem only; callers prepend the path.

use std::io;
use std::path::{Path, PathBuf};

use dbrew_core::{FileListError, Phase};
use thiserror::Error;

use crate::validate::ValidationViolations;

/// A recipe failed validation.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The file could not be opened or read.
    #[error("cannot read file: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not well-formed YAML.
    #[error("{reason}")]
    Parse { path: PathBuf, reason: String },

    /// The document does not match the recipe schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    Schema {
        path: PathBuf,
        schema_name: String,
        violations: ValidationViolations,
    },

    /// The file list violates a filename invariant.
    #[error("{source}")]
    Files {
        path: PathBuf,
        #[source]
        source: FileListError,
    },
}

impl RecipeError {
    /// Path of the recipe that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. }
            | Self::Parse { path, .. }
            | Self::Schema { path, .. }
            | Self::Files { path, .. } => path,
        }
    }

    /// Pipeline phase that raised the error.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Open { .. } => Phase::Opening,
            Self::Parse { .. } => Phase::Parsing,
            Self::Schema { .. } => Phase::SchemaChecking,
            Self::Files { .. } => Phase::InvariantChecking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Violation;

    #[test]
    fn phases_follow_variants() {
        let open = RecipeError::Open {
            path: PathBuf::from("a.yaml"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(open.phase(), Phase::Opening);
        assert_eq!(open.path(), Path::new("a.yaml"));

        let files = RecipeError::Files {
            path: PathBuf::from("b.yaml"),
            source: FileListError::MissingFilename {
                name: "b".to_string(),
                url: "http://x".to_string(),
            },
        };
        assert_eq!(files.phase(), Phase::InvariantChecking);
        assert_eq!(files.to_string(), "filename not found: http://x");
    }

    #[test]
    fn schema_error_lists_violations() {
        let err = RecipeError::Schema {
            path: PathBuf::from("c.yaml"),
            schema_name: "recipe.schema.json".to_string(),
            violations: ValidationViolations::new(vec![Violation {
                instance_path: String::new(),
                schema_path: "/required".to_string(),
                message: r#""homepage" is a required property"#.to_string(),
            }]),
        };
        assert_eq!(err.phase(), Phase::SchemaChecking);
        assert!(err.to_string().contains("homepage"));
    }
}
