//! Print the language form's field list as JSON.
//!
//! Each entry carries the dotted key, its label, the default value, the
//! placeholders the value must contain and the input hint. A form front end
//! renders one input per entry.
//!
//! Usage:
//!   cargo run --bin language-template > template.json

use anyhow::Result;
use language_creator::i18n::{flatten, FieldKey, FlatField, LanguageSchema};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct FieldTemplate<'a> {
    #[serde(flatten)]
    field: &'a FlatField,
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_template=info".parse()?),
        )
        .init();

    let fields = flatten(LanguageSchema::get().root(), &FieldKey::default());
    let templates: Vec<FieldTemplate> = fields
        .iter()
        .map(|field| FieldTemplate {
            field,
            label: field.label(),
            hint: field.hint(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&templates)?);
    info!("Listed {} fields", templates.len());

    Ok(())
}
