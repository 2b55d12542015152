use anyhow::{bail, Context, Result};
use language_creator::config::Config;
use language_creator::i18n::{ExportFailure, FieldKey, LanguageForm, LanguageSchema};
use std::fs;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_creator=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let mut form = LanguageForm::from_schema(LanguageSchema::get().root());
    info!("Language form ready with {} fields", form.len());

    // Step 1: Start from an existing language file, if given
    let input_file = std::env::args().nth(1).or_else(|| config.input_file.clone());
    if let Some(path) = input_file {
        info!("Loading {}", path);
        let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
        let document: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path))?;
        form.load_document(&document)?;
    }

    // Step 2: Apply the language code override
    if let Some(code) = &config.lang_code {
        form.update_field(&FieldKey::lang_code(), code.as_str())?;
    }

    // Step 3: Report fields that still need work
    for state in form.fields().filter(|state| state.has_errors()) {
        warn!(field = %state.key(), "{}", state.messages().join(", "));
    }

    // Step 4: Submit and write the file
    match form.submit_and_export() {
        Ok(file) => {
            let path = file.write_to(&config.output_dir)?;
            info!("✓ Saved language file to {}", path.display());
            Ok(())
        }
        Err(ExportFailure::Rejected(rejection)) => {
            error!(reason = %rejection.reason, "{} field(s) block the export", rejection.fields.len());
            for key in &rejection.fields {
                error!(field = %key, "Needs attention");
            }
            bail!(rejection)
        }
        Err(e) => Err(e.into()),
    }
}
