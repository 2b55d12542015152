//! Conversion between the nested schema and a flat list of keyed fields.
//!
//! The form works on a flat, ordered list of leaves. Export goes the other way
//! and rebuilds the nested document from keyed values.

use crate::i18n::{ExportDocument, FieldKey, LeafSpec, PlaceholderValidator, SchemaNode};
use serde::Serialize;
use serde_json::{Map, Value};

/// One schema leaf, addressed by its full key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatField {
    pub key: FieldKey,
    pub default_value: String,
    pub allowed_placeholders: Vec<String>,
}

impl FlatField {
    fn from_leaf(key: FieldKey, spec: &LeafSpec) -> Self {
        Self {
            key,
            default_value: spec.default_value.clone(),
            allowed_placeholders: spec.allowed_placeholders.clone(),
        }
    }

    /// Label shown next to the input (last key segment).
    pub fn label(&self) -> &str {
        self.key.label()
    }

    /// "Must include: ..." hint, if the field declares placeholders.
    pub fn hint(&self) -> Option<String> {
        PlaceholderValidator::hint(&self.allowed_placeholders)
    }
}

/// Flatten `node` into its leaves, depth-first in declaration order.
///
/// Every key starts with `prefix`. A leaf passed directly is keyed by `prefix`
/// itself.
pub fn flatten(node: &SchemaNode, prefix: &FieldKey) -> Vec<FlatField> {
    let mut fields = Vec::with_capacity(node.leaf_count());
    collect_leaves(node, prefix, &mut fields);
    fields
}

fn collect_leaves(node: &SchemaNode, key: &FieldKey, out: &mut Vec<FlatField>) {
    match node {
        SchemaNode::Leaf(spec) => out.push(FlatField::from_leaf(key.clone(), spec)),
        SchemaNode::Group(children) => {
            for (name, child) in children {
                collect_leaves(child, &key.child(name.as_str()), out);
            }
        }
    }
}

/// Rebuild a nested document from keyed values.
///
/// Objects keep the order in which their keys were first seen. Every segment
/// but the last is treated as a group; a string already stored at such a path
/// is replaced by an object. Root keys carry no path and are ignored.
pub fn unflatten<'a, I>(values: I) -> ExportDocument
where
    I: IntoIterator<Item = (&'a FieldKey, &'a str)>,
{
    let mut root = Map::new();

    'keys: for (key, value) in values {
        let Some((last, parents)) = key.segments().split_last() else {
            continue;
        };

        let mut current = &mut root;
        for segment in parents {
            let entry = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            // A group wins over a scalar written earlier at the same path
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Some(group) = entry.as_object_mut() else {
                continue 'keys;
            };
            current = group;
        }
        current.insert(last.clone(), Value::String(value.to_string()));
    }

    ExportDocument::from_map(root)
}

/// String leaves of an existing document, plus the paths that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedDocument {
    /// `(key, value)` for every string leaf, in document order
    pub entries: Vec<(FieldKey, String)>,

    /// Paths holding something other than a string or an object
    pub skipped: Vec<FieldKey>,
}

/// Flatten an existing language document (e.g. a locale file being edited).
pub fn flatten_document(document: &Value) -> FlattenedDocument {
    let mut out = FlattenedDocument::default();
    walk_document(document, &FieldKey::default(), &mut out);
    out
}

fn walk_document(value: &Value, key: &FieldKey, out: &mut FlattenedDocument) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                walk_document(child, &key.child(name.as_str()), out);
            }
        }
        Value::String(text) => out.entries.push((key.clone(), text.clone())),
        _ => out.skipped.push(key.clone()),
    }
}
