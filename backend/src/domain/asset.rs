//! Uploaded image assets and their generated references.
//!
//! An asset is addressed by a generated filename of the form
//! `<unix-millis>-<originalName>`. When two uploads land in the same
//! millisecond with the same name, a collision counter is inserted:
//! `<unix-millis>-<n>-<originalName>`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback name used when an upload carries no usable filename.
pub const DEFAULT_ASSET_NAME: &str = "upload";

const MAX_ORIGINAL_NAME_LEN: usize = 128;

/// Validation errors raised when parsing an [`AssetRef`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetRefValidationError {
    /// The reference was empty.
    #[error("asset reference must not be empty")]
    Empty,
    /// The reference would escape the asset directory.
    #[error("asset reference must be a plain file name")]
    NotAFileName,
}

/// Generated asset filename.
///
/// ## Invariants
/// - Non-empty.
/// - Contains no path separators, is not `.`/`..`, and contains no NUL bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetRef(String);

impl AssetRef {
    /// Validate an existing reference, for example one read back from the
    /// record store or taken from a request path.
    ///
    /// # Examples
    /// ```
    /// use pixelwall::domain::AssetRef;
    ///
    /// assert!(AssetRef::parse("1700000000000-cat.png").is_ok());
    /// assert!(AssetRef::parse("../secrets").is_err());
    /// ```
    pub fn parse(raw: impl Into<String>) -> Result<Self, AssetRefValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(AssetRefValidationError::Empty);
        }
        if raw == "." || raw == ".." || raw.contains(['/', '\\', '\0']) {
            return Err(AssetRefValidationError::NotAFileName);
        }
        Ok(Self(raw))
    }

    /// Build the reference for an upload stored at `timestamp_millis`.
    ///
    /// `attempt` is zero for the first try and increases on each filename
    /// collision.
    ///
    /// # Examples
    /// ```
    /// use pixelwall::domain::AssetRef;
    ///
    /// let first = AssetRef::generate(1_700_000_000_000, 0, "cat.png");
    /// let retry = AssetRef::generate(1_700_000_000_000, 1, "cat.png");
    /// assert_eq!(first.as_str(), "1700000000000-cat.png");
    /// assert_eq!(retry.as_str(), "1700000000000-1-cat.png");
    /// ```
    #[must_use]
    pub fn generate(timestamp_millis: i64, attempt: u32, original_name: &str) -> Self {
        let name = sanitize_original_name(original_name);
        if attempt == 0 {
            Self(format!("{timestamp_millis}-{name}"))
        } else {
            Self(format!("{timestamp_millis}-{attempt}-{name}"))
        }
    }

    /// Borrow the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AssetRef {
    type Error = AssetRefValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AssetRef> for String {
    fn from(value: AssetRef) -> Self {
        value.0
    }
}

/// Reduce a client-supplied filename to a safe final path component.
///
/// Only the last `/`- or `\`-separated segment is kept, characters outside
/// `[A-Za-z0-9._-]` become `_`, leading dots are stripped, and the result is
/// capped at 128 characters. An empty result becomes [`DEFAULT_ASSET_NAME`].
///
/// # Examples
/// ```
/// use pixelwall::domain::sanitize_original_name;
///
/// assert_eq!(sanitize_original_name("C:\\photos\\my cat.png"), "my_cat.png");
/// assert_eq!(sanitize_original_name("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_original_name(".."), "upload");
/// ```
#[must_use]
pub fn sanitize_original_name(original: &str) -> String {
    let last_segment = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last_segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed: String = cleaned
        .trim_start_matches('.')
        .chars()
        .take(MAX_ORIGINAL_NAME_LEN)
        .collect();
    if trimmed.is_empty() {
        DEFAULT_ASSET_NAME.to_owned()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cat.png", "cat.png")]
    #[case("dir/sub/cat.png", "cat.png")]
    #[case("кот.png", "___.png")]
    #[case(".hidden", "hidden")]
    #[case("", DEFAULT_ASSET_NAME)]
    #[case("/", DEFAULT_ASSET_NAME)]
    fn sanitises_original_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_original_name(input), expected);
    }

    #[rstest]
    fn caps_long_names() {
        let long = "a".repeat(500);
        assert_eq!(sanitize_original_name(&long).len(), MAX_ORIGINAL_NAME_LEN);
    }

    #[rstest]
    #[case("", AssetRefValidationError::Empty)]
    #[case("..", AssetRefValidationError::NotAFileName)]
    #[case("a/b.png", AssetRefValidationError::NotAFileName)]
    #[case("a\\b.png", AssetRefValidationError::NotAFileName)]
    fn parse_rejects_unsafe_refs(#[case] raw: &str, #[case] expected: AssetRefValidationError) {
        assert_eq!(AssetRef::parse(raw), Err(expected));
    }

    #[rstest]
    fn generated_refs_differ_by_timestamp() {
        let first = AssetRef::generate(1_000, 0, "a.png");
        let second = AssetRef::generate(1_001, 0, "a.png");
        assert_ne!(first, second);
        assert!(AssetRef::parse(first.as_str()).is_ok());
    }

    #[rstest]
    fn deserialisation_validates() {
        let result: Result<AssetRef, _> = serde_json::from_str("\"../x\"");
        assert!(result.is_err());
    }
}
