//! Field keys: structured addresses of schema leaves.
//!
//! A key is carried as a list of path segments and only joined into its dotted
//! form (`word.too_short`) when displayed or serialized.

use serde::{Serialize, Serializer};
use std::fmt;

/// Separator between path segments in the dotted form of a key.
///
/// Segment names never contain it, so splitting a joined key is lossless.
pub const KEY_SEPARATOR: char = '.';

/// Path from the schema root to a single leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FieldKey {
    segments: Vec<String>,
}

impl FieldKey {
    /// Create a key from its path segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the dotted form of a key (`help.help_texts.word.ban`).
    ///
    /// An empty string yields the empty (root) key.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::default();
        }
        Self::new(dotted.split(KEY_SEPARATOR))
    }

    /// Key of the language code leaf, which names the exported file.
    pub fn lang_code() -> Self {
        Self::new(["lang_code"])
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, shown as the input label.
    pub fn label(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Return a new key with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Dotted form of the key.
    pub fn dotted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", KEY_SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for FieldKey {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
