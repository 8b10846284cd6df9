//! # Recipe Discovery
//!
//! Resolves the command-line prefix to the list of recipe files to lint:
//!
//! - an existing file is linted on its own;
//! - an existing directory contributes every `*.yaml` file directly inside it;
//! - anything else is a glob-style prefix, expanded as `<prefix>*.yaml`
//!   (or as written when it already ends in `.yaml`).
//!
//! Results are sorted so runs are reproducible.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Extension recipe files carry.
pub const RECIPE_EXTENSION: &str = "yaml";

/// Find the recipe files selected by `prefix`.
///
/// # Errors
///
/// Fails if a directory prefix cannot be listed, if the prefix is not valid
/// UTF-8, or if it expands to an invalid glob pattern.
pub fn find_recipes(prefix: &Path) -> Result<Vec<PathBuf>> {
    if prefix.is_file() {
        return Ok(vec![prefix.to_path_buf()]);
    }
    if prefix.is_dir() {
        return recipes_in_dir(prefix);
    }
    recipes_matching(prefix)
}

fn is_recipe(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == RECIPE_EXTENSION)
}

fn recipes_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read recipe directory {}", dir.display()))?;

    let mut recipes = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if is_recipe(&path) {
            recipes.push(path);
        }
    }
    recipes.sort();
    Ok(recipes)
}

fn recipes_matching(prefix: &Path) -> Result<Vec<PathBuf>> {
    let raw = prefix
        .to_str()
        .with_context(|| format!("recipe prefix is not valid UTF-8: {}", prefix.display()))?;

    let suffix = format!(".{RECIPE_EXTENSION}");
    let has_wildcards = raw.contains(['*', '?', '[']);

    // A plain path to a recipe that does not exist is still a candidate, so
    // the validator can report it as unreadable.
    if !has_wildcards && raw.ends_with(&suffix) {
        return Ok(vec![prefix.to_path_buf()]);
    }

    let pattern = if raw.ends_with(&suffix) {
        raw.to_string()
    } else {
        format!("{raw}*{suffix}")
    };

    let paths = glob::glob(&pattern)
        .with_context(|| format!("invalid recipe pattern '{pattern}'"))?;

    let mut recipes = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if is_recipe(&path) => recipes.push(path),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    path = %e.path().display(),
                    error = %e.error(),
                    "failed to read glob match"
                );
            }
        }
    }
    recipes.sort();
    Ok(recipes)
}
