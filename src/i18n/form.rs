//! Form state for editing one language file.
//!
//! `LanguageForm` owns the value and validation errors of every schema leaf.
//! Fields validate independently; submitting rebuilds the nested document.

use crate::i18n::{
    export, flatten, flatten_document, unflatten, ExportDocument, ExportError, FieldKey,
    FlatField, LanguageFile, PlaceholderValidator, SchemaNode, ValidationError,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, info, warn};

/// State of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub field: FlatField,
    pub current_value: String,
    pub errors: Vec<ValidationError>,
}

impl FieldState {
    fn new(field: FlatField) -> Self {
        Self {
            current_value: field.default_value.clone(),
            errors: Vec::new(),
            field,
        }
    }

    pub fn key(&self) -> &FieldKey {
        &self.field.key
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.current_value.is_empty()
    }

    /// Error messages, in reporting order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// A declared placeholder and whether the current value already uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderToken {
    pub name: String,
    pub used: bool,
}

impl PlaceholderToken {
    /// Braced text inserted into the field (`{name}`).
    pub fn text(&self) -> String {
        PlaceholderValidator::token(&self.name)
    }
}

/// Why a submit attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// At least one field has validation errors
    ValidationErrors,

    /// No errors, but at least one field is empty
    EmptyFields,
}

impl RejectionReason {
    /// User-facing message shown when a submit is refused for this reason.
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::ValidationErrors => "Please fix all errors before submitting.",
            RejectionReason::EmptyFields => "Please fill all fields.",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::ValidationErrors => f.write_str("validation_errors"),
            RejectionReason::EmptyFields => f.write_str("empty_fields"),
        }
    }
}

/// A refused submit. All entered values are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .reason.message())]
pub struct SubmitRejection {
    pub reason: RejectionReason,

    /// Fields that caused the rejection, in form order
    pub fields: Vec<FieldKey>,
}

/// Misuse of the form API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(FieldKey),

    #[error("Selection {start}..{end} is outside field {key} ({len} characters)")]
    InvalidSelection {
        key: FieldKey,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("The form was already exported; start a new form to keep editing")]
    SessionClosed,
}

/// Failure of [`LanguageForm::submit_and_export`].
#[derive(Debug, Error)]
pub enum ExportFailure {
    #[error(transparent)]
    Rejected(#[from] SubmitRejection),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,

    /// Last submit was refused; the next edit returns to `Editing`
    Rejected(RejectionReason),

    /// Last submit produced a document
    Accepted,

    /// The document was exported; no further edits
    Exported,
}

/// Outcome of loading an existing language document into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Values applied to known fields
    pub applied: usize,

    /// Keys in the document that the schema does not define
    pub unknown: Vec<FieldKey>,

    /// Keys holding something other than a string
    pub skipped: Vec<FieldKey>,
}

/// Value and error state for every field of a language file.
#[derive(Debug, Clone)]
pub struct LanguageForm {
    fields: Vec<FieldState>,
    index: HashMap<FieldKey, usize>,
    phase: FormPhase,
}

impl LanguageForm {
    /// Seed one field per flattened leaf, holding its default value and no
    /// errors.
    pub fn new(flattened: Vec<FlatField>) -> Self {
        let fields: Vec<FieldState> = flattened.into_iter().map(FieldState::new).collect();
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, state)| (state.key().clone(), i))
            .collect();

        Self {
            fields,
            index,
            phase: FormPhase::Editing,
        }
    }

    /// Build a form for every leaf of `schema`.
    pub fn from_schema(schema: &SchemaNode) -> Self {
        let form = Self::new(flatten(schema, &FieldKey::default()));
        debug!(fields = form.fields.len(), "Initialized language form");
        form
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldState> {
        self.fields.iter()
    }

    pub fn field(&self, key: &FieldKey) -> Option<&FieldState> {
        self.index.get(key).map(|&i| &self.fields[i])
    }

    pub fn value(&self, key: &FieldKey) -> Option<&str> {
        self.field(key).map(|state| state.current_value.as_str())
    }

    pub fn errors(&self, key: &FieldKey) -> Option<&[ValidationError]> {
        self.field(key).map(|state| state.errors.as_slice())
    }

    /// Current language code, which names the exported file.
    pub fn lang_code(&self) -> &str {
        self.value(&FieldKey::lang_code()).unwrap_or_default()
    }

    /// Replace a field's value and re-validate it.
    ///
    /// # Returns
    /// The field's new errors (empty when valid).
    ///
    /// # Errors
    /// `UnknownField` if `key` is not a leaf of this form, `SessionClosed` once
    /// the form has been exported. Nothing is changed in either case.
    pub fn update_field(
        &mut self,
        key: &FieldKey,
        new_value: impl Into<String>,
    ) -> Result<&[ValidationError], FormError> {
        if self.phase == FormPhase::Exported {
            return Err(FormError::SessionClosed);
        }
        let i = *self
            .index
            .get(key)
            .ok_or_else(|| FormError::UnknownField(key.clone()))?;

        let state = &mut self.fields[i];
        state.current_value = new_value.into();
        state.errors =
            PlaceholderValidator::validate(&state.current_value, &state.field.allowed_placeholders);
        self.phase = FormPhase::Editing;

        debug!(field = %key, errors = state.errors.len(), "Updated field");
        Ok(state.errors.as_slice())
    }

    /// Declared placeholders of a field, flagged by whether the value uses them.
    pub fn placeholder_tokens(&self, key: &FieldKey) -> Option<Vec<PlaceholderToken>> {
        let state = self.field(key)?;
        Some(
            state
                .field
                .allowed_placeholders
                .iter()
                .map(|name| PlaceholderToken {
                    name: name.clone(),
                    used: state
                        .current_value
                        .contains(&PlaceholderValidator::token(name)),
                })
                .collect(),
        )
    }

    /// Replace the characters in `selection` with `{name}` and re-validate.
    ///
    /// `selection` counts characters, not bytes; an empty range inserts at that
    /// position.
    pub fn insert_placeholder(
        &mut self,
        key: &FieldKey,
        name: &str,
        selection: Range<usize>,
    ) -> Result<&[ValidationError], FormError> {
        let current = self
            .value(key)
            .ok_or_else(|| FormError::UnknownField(key.clone()))?;

        let len = current.chars().count();
        if selection.start > selection.end || selection.end > len {
            return Err(FormError::InvalidSelection {
                key: key.clone(),
                start: selection.start,
                end: selection.end,
                len,
            });
        }

        let byte_at = |chars: usize| {
            current
                .char_indices()
                .nth(chars)
                .map(|(i, _)| i)
                .unwrap_or(current.len())
        };
        let (start, end) = (byte_at(selection.start), byte_at(selection.end));

        let new_value = format!(
            "{}{}{}",
            &current[..start],
            PlaceholderValidator::token(name),
            &current[end..]
        );
        self.update_field(key, new_value)
    }

    /// Apply the string leaves of an existing language document.
    ///
    /// Keys the schema does not define are reported and otherwise ignored.
    pub fn load_document(&mut self, document: &Value) -> Result<LoadReport, FormError> {
        let flat = flatten_document(document);
        let mut report = LoadReport {
            skipped: flat.skipped,
            ..LoadReport::default()
        };

        for (key, value) in flat.entries {
            if self.index.contains_key(&key) {
                self.update_field(&key, value)?;
                report.applied += 1;
            } else {
                warn!(field = %key, "Ignoring key not defined by the language schema");
                report.unknown.push(key);
            }
        }
        for key in &report.skipped {
            warn!(field = %key, "Ignoring non-string value");
        }

        info!(
            applied = report.applied,
            unknown = report.unknown.len(),
            skipped = report.skipped.len(),
            "Loaded language document"
        );
        Ok(report)
    }

    fn with_errors(&self) -> Vec<FieldKey> {
        self.fields
            .iter()
            .filter(|state| state.has_errors())
            .map(|state| state.key().clone())
            .collect()
    }

    fn empty(&self) -> Vec<FieldKey> {
        self.fields
            .iter()
            .filter(|state| state.is_empty())
            .map(|state| state.key().clone())
            .collect()
    }

    /// Why a submit would be refused right now, if it would.
    ///
    /// Validation errors take precedence over empty fields.
    pub fn rejection(&self) -> Option<SubmitRejection> {
        let with_errors = self.with_errors();
        if !with_errors.is_empty() {
            return Some(SubmitRejection {
                reason: RejectionReason::ValidationErrors,
                fields: with_errors,
            });
        }

        let empty = self.empty();
        if !empty.is_empty() {
            return Some(SubmitRejection {
                reason: RejectionReason::EmptyFields,
                fields: empty,
            });
        }

        None
    }

    /// True when no field has errors and no field is empty.
    pub fn can_submit(&self) -> bool {
        self.fields
            .iter()
            .all(|state| !state.has_errors() && !state.is_empty())
    }

    /// Build the nested document from the current values.
    ///
    /// A refused submit leaves every value as entered.
    pub fn submit(&mut self) -> Result<ExportDocument, SubmitRejection> {
        if let Some(rejection) = self.rejection() {
            warn!(
                reason = %rejection.reason,
                fields = rejection.fields.len(),
                "Submit rejected"
            );
            if self.phase != FormPhase::Exported {
                self.phase = FormPhase::Rejected(rejection.reason);
            }
            return Err(rejection);
        }

        let document = unflatten(
            self.fields
                .iter()
                .map(|state| (state.key(), state.current_value.as_str())),
        );
        if self.phase != FormPhase::Exported {
            self.phase = FormPhase::Accepted;
        }
        info!(fields = self.fields.len(), "Submit accepted");
        Ok(document)
    }

    /// Submit and export, naming the file after the language code.
    pub fn submit_and_export(&mut self) -> Result<LanguageFile, ExportFailure> {
        let document = self.submit()?;
        let file = export(&document, self.lang_code())?;
        self.phase = FormPhase::Exported;
        Ok(file)
    }
}
