//! Build bot language files from a fixed schema of placeholder-checked strings.

pub mod config;
pub mod i18n;
