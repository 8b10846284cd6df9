//! # Recipe Loading
//!
//! Reads a recipe file and parses it as YAML into a `serde_json::Value`,
//! the representation the schema validator works on.
//!
//! The file handle is owned by [`read_recipe`] and dropped before parsing
//! starts, so it is released whether the read, the parse or any later
//! validation phase fails.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::RecipeError;

/// Load and parse the recipe at `path`.
///
/// # Errors
///
/// Returns [`RecipeError::Open`] if the file cannot be opened or read, and
/// [`RecipeError::Parse`] if its content is not well-formed YAML.
pub fn load_document(path: &Path) -> Result<Value, RecipeError> {
    let content = read_recipe(path)?;
    parse_document(&content).map_err(|reason| RecipeError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Read the whole file into memory.
pub fn read_recipe(path: &Path) -> Result<String, RecipeError> {
    let open_error = |source: std::io::Error| RecipeError::Open {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(open_error)?;
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(open_error)?;
    Ok(content)
}

/// Parse YAML text into a JSON value.
///
/// An empty document parses to `null`, which the schema then rejects.
pub fn parse_document(content: &str) -> Result<Value, String> {
    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
    yaml_to_json_value(&yaml_value).map_err(|e| format!("YAML-to-JSON conversion failed: {e}"))
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Recipes use only the JSON-compatible subset of YAML. Scalar mapping keys
/// are stringified; tags are dropped and their inner value kept.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
