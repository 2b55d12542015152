//! Language file building: schema, validation, form state and export.
//!
//! This module contains everything needed to turn the bot's language schema
//! into an editable form and the filled form into a JSON language file.
//!
//! # Architecture
//!
//! - `schema`: Single source of truth for every translatable string and its placeholders
//! - `key`: Structured field keys, joined to dotted paths only for display
//! - `flatten`: Schema-to-field-list traversal and the nested document rebuild
//! - `validator`: Required and forbidden `{placeholder}` checks per field
//! - `form`: Per-field values and errors, submit gating
//! - `export`: Pretty JSON serialization and file naming
//!
//! # Example
//!
//! ```rust,ignore
//! use language_creator::i18n::{FieldKey, LanguageForm, LanguageSchema};
//!
//! let mut form = LanguageForm::from_schema(LanguageSchema::get().root());
//! form.update_field(&FieldKey::lang_code(), "fr")?;
//! form.update_field(&FieldKey::parse("word.too_short"), "Trop court, {action}")?;
//!
//! match form.submit_and_export() {
//!     Ok(file) => println!("{}", file.file_name),
//!     Err(rejection) => eprintln!("{}", rejection),
//! }
//! ```

mod export;
mod flatten;
mod form;
mod key;
mod schema;
mod validator;

pub use export::{export, file_name_for, ExportDocument, ExportError, LanguageFile, DEFAULT_FILE_STEM};
pub use flatten::{flatten, flatten_document, unflatten, FlatField, FlattenedDocument};
pub use form::{
    ExportFailure, FieldState, FormError, FormPhase, LanguageForm, LoadReport, PlaceholderToken,
    RejectionReason, SubmitRejection,
};
pub use key::{FieldKey, KEY_SEPARATOR};
pub use schema::{LanguageSchema, LeafSpec, SchemaNode};
pub use validator::{PlaceholderValidator, ValidationError};
