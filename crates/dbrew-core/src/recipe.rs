//! # Recipe Model
//!
//! Typed representation of a recipe document. A recipe carries top-level
//! metadata (`description`, `homepage`, `required`) plus a root
//! [`Fragment`] holding the dataset `name` and its file(s).
//!
//! Deserialization is lenient about unknown keys: recipes in the wild carry
//! extra metadata (licenses, tags, notes) that the linter does not own.
//! Structural validation happens first, against the JSON schema in
//! `dbrew-schema`; this model is built from documents that already passed it.

use serde::Deserialize;

/// A complete recipe document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recipe {
    /// Human-readable dataset description.
    pub description: String,
    /// Project or publisher homepage.
    pub homepage: String,
    /// Whether the dataset is required by its consumers.
    #[serde(default)]
    pub required: Option<bool>,
    /// The dataset itself: its name plus one file or a tree of files.
    #[serde(flatten)]
    pub root: Fragment,
}

impl Recipe {
    /// The dataset name declared at the top of the document.
    pub fn name(&self) -> &str {
        self.root.name()
    }
}

/// One node of the recipe file tree.
///
/// `Multi` is tried first so that a node declaring `files` is always read as
/// a group, even when it also carries a `url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Fragment {
    /// A group of nested fragments.
    Multi(MultiFile),
    /// A single downloadable file.
    Single(SingleFile),
}

impl Fragment {
    /// The fragment's `name`.
    pub fn name(&self) -> &str {
        match self {
            Self::Multi(multi) => &multi.name,
            Self::Single(single) => &single.name,
        }
    }

    /// The fragment's download URL, if it declares one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Multi(multi) => multi.url.as_deref(),
            Self::Single(single) => Some(single.url.as_str()),
        }
    }

    /// The explicit `filename` override, if any.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Multi(multi) => multi.filename.as_deref(),
            Self::Single(single) => single.filename.as_deref(),
        }
    }

    /// Nested fragments, in document order. Empty for single files.
    pub fn files(&self) -> &[Fragment] {
        match self {
            Self::Multi(multi) => &multi.files,
            Self::Single(_) => &[],
        }
    }
}

/// A single downloadable file with optional checksums.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SingleFile {
    pub name: String,
    pub url: String,
    /// Local filename; derived from the URL path when absent or empty.
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

impl SingleFile {
    /// Declared checksums as `(algorithm, digest)` pairs, strongest last.
    ///
    /// Digests are returned exactly as written; nothing is verified here.
    pub fn checksums(&self) -> impl Iterator<Item = (ChecksumAlgorithm, &str)> {
        [
            (ChecksumAlgorithm::Md5, self.md5.as_deref()),
            (ChecksumAlgorithm::Sha1, self.sha1.as_deref()),
            (ChecksumAlgorithm::Sha256, self.sha256.as_deref()),
        ]
        .into_iter()
        .filter_map(|(algorithm, digest)| digest.map(|d| (algorithm, d)))
    }
}

/// A named group of nested fragments.
///
/// Nested groups may also carry their own `url`, in which case that file is
/// emitted before the group's children.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MultiFile {
    pub name: String,
    pub files: Vec<Fragment>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Checksum algorithms a recipe may declare for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl ChecksumAlgorithm {
    /// Returns the recipe key for this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
