//! Integration tests for the language creator
//!
//! These tests drive the full schema → form → submit → export workflow against
//! the compiled-in language schema.

use language_creator::i18n::{
    export, flatten, FieldKey, FormPhase, LanguageForm, LanguageSchema, PlaceholderValidator,
    RejectionReason, ValidationError,
};
use serde_json::Value;
use tempfile::TempDir;

// ==================== Test Helpers ====================

/// A valid value for a field: some text plus every declared placeholder.
fn valid_value(label: &str, placeholders: &[String]) -> String {
    let tokens: Vec<String> = placeholders
        .iter()
        .map(|name| PlaceholderValidator::token(name))
        .collect();
    format!("{} {}", label, tokens.join(" "))
}

/// A form for the full schema with every field filled validly.
fn filled_form(lang_code: &str) -> LanguageForm {
    let schema = LanguageSchema::get().root();
    let mut form = LanguageForm::from_schema(schema);

    for field in flatten(schema, &FieldKey::default()) {
        let value = if field.key == FieldKey::lang_code() {
            lang_code.to_string()
        } else {
            valid_value(field.label(), &field.allowed_placeholders)
        };
        form.update_field(&field.key, value).expect("known field");
    }
    form
}

// ==================== Scenario Tests ====================

#[test]
fn test_too_short_with_action_is_valid() {
    let mut form = LanguageForm::from_schema(LanguageSchema::get().root());
    let key = FieldKey::parse("word.too_short");

    let errors = form.update_field(&key, "Too short, {action}").unwrap();
    assert!(errors.is_empty());

    let errors = form.update_field(&key, "Too short").unwrap();
    assert_eq!(
        errors,
        &[ValidationError::MissingPlaceholder(vec!["action".to_string()])]
    );
}

#[test]
fn test_extra_placeholder_is_forbidden_only() {
    let mut form = LanguageForm::from_schema(LanguageSchema::get().root());
    let key = FieldKey::parse("word.too_short");

    let errors = form.update_field(&key, "{action} and {extra}").unwrap();
    assert_eq!(
        errors,
        &[ValidationError::ForbiddenPlaceholder(vec!["extra".to_string()])]
    );
}

#[test]
fn test_full_form_submits_and_exports_as_lang_code() {
    let mut form = filled_form("fr");
    assert!(form.can_submit());

    let file = form.submit_and_export().expect("export");

    assert_eq!(file.file_name, "fr.json");
    let document: Value = serde_json::from_slice(&file.contents).unwrap();
    assert_eq!(document["lang_code"], "fr");
    assert_eq!(
        document["statistics"]["users_item"],
        "users_item {id} {user} {count}"
    );
    assert_eq!(form.phase(), &FormPhase::Exported);
}

#[test]
fn test_empty_lang_code_blocks_submit_as_validation_error() {
    let mut form = filled_form("");

    let rejection = form.submit().unwrap_err();

    // An edited field that ends up empty is too short, not merely unfilled
    assert_eq!(rejection.reason, RejectionReason::ValidationErrors);
    assert_eq!(rejection.fields, vec![FieldKey::lang_code()]);
    assert_eq!(
        form.errors(&FieldKey::lang_code()).unwrap(),
        &[ValidationError::TooShort]
    );
    assert_eq!(form.value(&FieldKey::parse("error")), Some("error "));
}

#[test]
fn test_untouched_lang_code_blocks_submit_as_empty_field() {
    let schema = LanguageSchema::get().root();
    let mut form = LanguageForm::from_schema(schema);
    for field in flatten(schema, &FieldKey::default()) {
        if field.key != FieldKey::lang_code() {
            let value = valid_value(field.label(), &field.allowed_placeholders);
            form.update_field(&field.key, value).expect("known field");
        }
    }

    let rejection = form.submit().unwrap_err();

    assert_eq!(rejection.reason, RejectionReason::EmptyFields);
    assert_eq!(rejection.fields, vec![FieldKey::lang_code()]);
    assert!(form.errors(&FieldKey::lang_code()).unwrap().is_empty());
}

#[test]
fn test_export_with_empty_name_hint_falls_back() {
    let mut form = filled_form("fr");
    let document = form.submit().unwrap();

    let file = export(&document, "").unwrap();
    assert_eq!(file.file_name, "language.json");
}

// ==================== Export Shape Tests ====================

#[test]
fn test_exported_document_mirrors_schema() {
    let schema = LanguageSchema::get();
    let mut form = filled_form("de");
    let document = form.submit().unwrap();

    assert!(document.conforms_to(schema.root()));

    let top_level: Vec<&str> = document.as_map().keys().map(String::as_str).collect();
    assert_eq!(top_level, schema.top_level_names());
}

#[test]
fn test_export_omits_placeholder_metadata() {
    let mut form = filled_form("de");
    let file = form.submit_and_export().unwrap();

    assert!(!file.as_str().contains("template_args"));
    assert!(!file.as_str().contains("allowed_placeholders"));
}

// ==================== Round Trip Tests ====================

#[test]
fn test_exported_file_loads_back_into_new_form() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut original = filled_form("pt");
    let path = original
        .submit_and_export()
        .unwrap()
        .write_to(temp_dir.path())
        .expect("write");

    let text = std::fs::read_to_string(&path).expect("read back");
    let document: Value = serde_json::from_str(&text).expect("valid json");

    let mut reloaded = LanguageForm::from_schema(LanguageSchema::get().root());
    let report = reloaded.load_document(&document).unwrap();

    assert_eq!(report.applied, reloaded.len());
    assert!(report.unknown.is_empty());
    assert!(report.skipped.is_empty());
    assert!(reloaded.can_submit());
    for state in original.fields() {
        assert_eq!(reloaded.value(state.key()), Some(state.current_value.as_str()));
    }
}

#[test]
fn test_partial_locale_leaves_rest_empty() {
    let mut form = LanguageForm::from_schema(LanguageSchema::get().root());
    let document = serde_json::json!({
        "lang_code": "it",
        "word": { "too_short": "Troppo corto, {action}" },
        "legacy": { "old_key": "unused" }
    });

    let report = form.load_document(&document).unwrap();

    assert_eq!(report.applied, 2);
    assert_eq!(report.unknown, vec![FieldKey::parse("legacy.old_key")]);
    assert_eq!(form.lang_code(), "it");

    let rejection = form.submit().unwrap_err();
    assert_eq!(rejection.reason, RejectionReason::EmptyFields);
    assert_eq!(rejection.fields.len(), form.len() - 2);
}

// ==================== Placeholder Token Tests ====================

#[test]
fn test_dropping_tokens_completes_a_field() {
    let mut form = LanguageForm::from_schema(LanguageSchema::get().root());
    let key = FieldKey::parse("template.list_item");

    form.update_field(&key, "#: ").unwrap();
    form.insert_placeholder(&key, "template_id", 1..1).unwrap();
    let len = form.value(&key).unwrap().chars().count();
    let errors = form.insert_placeholder(&key, "template", len..len).unwrap();

    assert!(errors.is_empty());
    assert_eq!(form.value(&key), Some("#{template_id}: {template}"));
    assert!(form
        .placeholder_tokens(&key)
        .unwrap()
        .iter()
        .all(|token| token.used));
}
