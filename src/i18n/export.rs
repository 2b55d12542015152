//! Export of a submitted form as a JSON language file.

use crate::i18n::{FieldKey, SchemaNode};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// File stem used when the language code is empty.
pub const DEFAULT_FILE_STEM: &str = "language";

/// Nested language document built from a submitted form.
///
/// Mirrors the schema tree with every leaf replaced by its final string. Keys
/// keep schema declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExportDocument {
    root: Map<String, Value>,
}

impl ExportDocument {
    pub(crate) fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// String stored at `key`, if `key` addresses a string.
    pub fn get(&self, key: &FieldKey) -> Option<&str> {
        let (last, parents) = key.segments().split_last()?;
        let mut current = &self.root;
        for segment in parents {
            current = current.get(segment)?.as_object()?;
        }
        current.get(last)?.as_str()
    }

    /// Check that the document has exactly the group/leaf shape of `schema`.
    pub fn conforms_to(&self, schema: &SchemaNode) -> bool {
        match schema {
            SchemaNode::Group(children) => object_conforms(&self.root, children),
            SchemaNode::Leaf(_) => false,
        }
    }
}

fn object_conforms(map: &Map<String, Value>, children: &[(String, SchemaNode)]) -> bool {
    map.len() == children.len()
        && children.iter().all(|(name, node)| match (node, map.get(name)) {
            (SchemaNode::Leaf(_), Some(Value::String(_))) => true,
            (SchemaNode::Group(grandchildren), Some(Value::Object(inner))) => {
                object_conforms(inner, grandchildren)
            }
            _ => false,
        })
}

/// An exported language file, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFile {
    /// Suggested file name (e.g. `fr.json`)
    pub file_name: String,

    /// UTF-8 JSON text
    pub contents: Vec<u8>,
}

impl LanguageFile {
    /// Contents as text.
    pub fn as_str(&self) -> &str {
        // Built from serde_json output, which is always valid UTF-8
        std::str::from_utf8(&self.contents).unwrap_or_default()
    }

    /// Save the file into `dir` under its suggested name.
    ///
    /// # Returns
    /// The path that was written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        let path = dir.join(&self.file_name);
        fs::write(&path, &self.contents)
            .with_context(|| format!("Failed to write language file {}", path.display()))?;

        info!(path = %path.display(), bytes = self.contents.len(), "Wrote language file");
        Ok(path)
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize language document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File name for a language code: `{code}.json`, or `language.json` when the
/// code is blank.
pub fn file_name_for(name_hint: &str) -> String {
    let stem = name_hint.trim();
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };
    format!("{}.json", stem)
}

/// Serialize `document` as pretty JSON (2-space indent) and name it after
/// `name_hint`.
pub fn export(document: &ExportDocument, name_hint: &str) -> Result<LanguageFile, ExportError> {
    let contents = serde_json::to_vec_pretty(document)?;
    let file_name = file_name_for(name_hint);
    debug!(file_name = %file_name, bytes = contents.len(), "Exported language document");

    Ok(LanguageFile {
        file_name,
        contents,
    })
}
