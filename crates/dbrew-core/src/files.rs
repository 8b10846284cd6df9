//! # File-List Extraction & Invariants
//!
//! Flattens a recipe's fragment tree into the list of files a download
//! would produce, and checks the two invariants the schema cannot express:
//!
//! - every file resolves to a non-empty local filename;
//! - no two files anywhere in the tree resolve to the same filename.
//!
//! Filenames are taken from the URL text as written and compared byte for
//! byte. Case, percent-encoding, backslashes and dot segments are not
//! normalized.

use std::collections::HashSet;
use std::iter::FusedIterator;

use crate::error::FileListError;
use crate::recipe::Fragment;

/// A downloadable file derived from one fragment of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor<'a> {
    /// Name of the fragment that declared the file.
    pub name: &'a str,
    /// Local filename: the explicit override, or the URL's last path segment.
    pub filename: String,
    /// Download URL as written in the recipe.
    pub url: &'a str,
}

impl<'a> FileDescriptor<'a> {
    fn from_fragment(fragment: &'a Fragment, url: &'a str) -> Self {
        let filename = match fragment.filename() {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => url_basename(url),
        };
        Self {
            name: fragment.name(),
            filename,
            url,
        }
    }
}

/// Pre-order iterator over the files of a fragment tree.
///
/// Created by [`iter_files`]. A fragment's own file (if it has a non-empty
/// `url`) comes before the files of its children.
#[derive(Debug, Clone)]
pub struct Files<'a> {
    stack: Vec<&'a Fragment>,
}

impl<'a> Iterator for Files<'a> {
    type Item = FileDescriptor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(fragment) = self.stack.pop() {
            self.stack.extend(fragment.files().iter().rev());
            if let Some(url) = fragment.url().filter(|url| !url.is_empty()) {
                return Some(FileDescriptor::from_fragment(fragment, url));
            }
        }
        None
    }
}

impl FusedIterator for Files<'_> {}

/// Lazily walk `root` and yield one [`FileDescriptor`] per declared file.
pub fn iter_files(root: &Fragment) -> Files<'_> {
    Files { stack: vec![root] }
}

/// Schemes whose last path segment may carry `;params`, which are not part
/// of the filename.
const PARAM_SCHEMES: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtspu", "sip",
    "sips", "mms", "sftp", "tel",
];

/// Last segment of the path component of `url`.
///
/// Works on the raw text: the scheme, the `//authority` part, the query and
/// the fragment are cut off and nothing else is rewritten. Returns an empty
/// string when the path is empty or ends with `/`. Strings without a scheme
/// are treated as bare paths.
pub fn url_basename(url: &str) -> String {
    let (scheme, rest) = split_scheme(url);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let path = match rest.strip_prefix("//") {
        Some(authority) => authority.find('/').map_or("", |i| &authority[i..]),
        None => rest,
    };

    let segment = path.rsplit('/').next().unwrap_or_default();
    if PARAM_SCHEMES.contains(&scheme.as_str()) {
        segment.split(';').next().unwrap_or_default().to_string()
    } else {
        segment.to_string()
    }
}

/// Split off a leading `scheme:`, returning the lowercased scheme (empty if
/// there is none) and the remainder.
fn split_scheme(url: &str) -> (String, &str) {
    match url.split_once(':') {
        Some((scheme, rest))
            if scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            (scheme.to_ascii_lowercase(), rest)
        }
        _ => (String::new(), url),
    }
}

/// Extract every file of `root` and enforce the filename invariants.
///
/// Returns the files in traversal order when both invariants hold.
///
/// # Errors
///
/// Returns [`FileListError::MissingFilename`] for the first file without a
/// usable filename, or [`FileListError::DuplicateFilename`] when filenames
/// are not unique across the whole tree.
pub fn validate_files(root: &Fragment) -> Result<Vec<FileDescriptor<'_>>, FileListError> {
    let files: Vec<FileDescriptor<'_>> = iter_files(root).collect();

    if let Some(file) = files.iter().find(|file| file.filename.is_empty()) {
        return Err(FileListError::MissingFilename {
            name: file.name.to_string(),
            url: file.url.to_string(),
        });
    }

    let duplicate = {
        let mut seen: HashSet<&str> = HashSet::with_capacity(files.len());
        let mut first_repeat: Option<String> = None;
        for file in &files {
            if !seen.insert(file.filename.as_str()) && first_repeat.is_none() {
                first_repeat = Some(file.filename.clone());
            }
        }
        first_repeat.map(|filename| (filename, seen.len()))
    };

    match duplicate {
        Some((filename, distinct)) => Err(FileListError::DuplicateFilename {
            filename,
            total: files.len(),
            distinct,
        }),
        None => Ok(files),
    }
}
