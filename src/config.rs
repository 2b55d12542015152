use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Output
    pub output_dir: String,

    // Input
    pub input_file: Option<String>,
    pub lang_code: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            input_file: None,
            lang_code: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            // Directory the language file is written to
            output_dir: non_empty_var("LANGUAGE_OUTPUT_DIR")?.unwrap_or(defaults.output_dir),

            // Existing language file to start from
            input_file: non_empty_var("LANGUAGE_INPUT_FILE")?,

            // Overrides lang_code from the input file
            lang_code: non_empty_var("LANG_CODE")?,
        })
    }
}

/// Read an optional variable, treating an empty value as unset.
fn non_empty_var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{} is not valid unicode", name)),
    }
}
