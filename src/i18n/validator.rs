//! Placeholder validation for a single field.
//!
//! A field's text must contain every `{placeholder}` its leaf declares, must
//! not contain any undeclared ones, and must not be blank.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// A problem with one field's current text.
///
/// Errors are reported in a fixed order: `TooShort`, then
/// `MissingPlaceholder`, then `ForbiddenPlaceholder`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The text is empty or whitespace only
    #[error("Field must be at least 1 character long")]
    TooShort,

    /// Declared placeholders absent from the text, in declaration order
    #[error("Missing: {}", .0.join(", "))]
    MissingPlaceholder(Vec<String>),

    /// Undeclared placeholders found in the text, in first-seen order
    #[error("Forbidden: {}", .0.join(", "))]
    ForbiddenPlaceholder(Vec<String>),
}

impl ValidationError {
    /// Placeholder names the error refers to (empty for `TooShort`).
    pub fn names(&self) -> &[String] {
        match self {
            ValidationError::TooShort => &[],
            ValidationError::MissingPlaceholder(names)
            | ValidationError::ForbiddenPlaceholder(names) => names,
        }
    }
}

/// Validator for placeholder usage in field text.
pub struct PlaceholderValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl PlaceholderValidator {
    /// Validate `value` against the placeholders declared for its field.
    ///
    /// All applicable errors are returned together.
    pub fn validate(value: &str, allowed_placeholders: &[String]) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if value.trim().is_empty() {
            errors.push(ValidationError::TooShort);
        }

        let missing: Vec<String> = allowed_placeholders
            .iter()
            .filter(|name| !value.contains(&Self::token(name)))
            .cloned()
            .collect();
        if !missing.is_empty() {
            errors.push(ValidationError::MissingPlaceholder(missing));
        }

        let forbidden: Vec<String> = Self::extract_placeholders(value)
            .into_iter()
            .filter(|name| !allowed_placeholders.contains(name))
            .collect();
        if !forbidden.is_empty() {
            errors.push(ValidationError::ForbiddenPlaceholder(forbidden));
        }

        errors
    }

    /// Distinct placeholder names in `text`, in first-seen order.
    pub fn extract_placeholders(text: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| {
            Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid")
        });

        let mut names: Vec<String> = Vec::new();
        for cap in regex.captures_iter(text) {
            if let Some(name) = cap.get(1) {
                if !names.iter().any(|n| n == name.as_str()) {
                    names.push(name.as_str().to_string());
                }
            }
        }
        names
    }

    /// Braced form of a placeholder name (`action` -> `{action}`).
    pub fn token(name: &str) -> String {
        format!("{{{}}}", name)
    }

    /// Input hint listing the placeholders a field must include.
    pub fn hint(allowed_placeholders: &[String]) -> Option<String> {
        if allowed_placeholders.is_empty() {
            return None;
        }
        let tokens: Vec<String> = allowed_placeholders
            .iter()
            .map(|name| Self::token(name))
            .collect();
        Some(format!("Must include: {}", tokens.join(", ")))
    }
}
