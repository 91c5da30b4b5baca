//! Writing exported PNG images to disk.

use crate::config::ExportConfig;
use crate::util::expand_tilde;
use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid filename template '{0}'")]
    InvalidTemplate(String),
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
///
/// # Errors
/// Returns [`ExportError::InvalidTemplate`] if the template contains an
/// unknown format specifier.
pub fn generate_filename(template: &str, format: &str) -> Result<String, ExportError> {
    let now = Local::now();
    let mut filename = String::new();
    write!(filename, "{}.{}", now.format(template), format)
        .map_err(|_| ExportError::InvalidTemplate(template.to_string()))?;
    Ok(filename)
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes PNG bytes to an explicit path.
pub fn write_png(path: &Path, png: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }
    fs::write(path, png)?;
    log::info!("Exported {} ({} bytes)", path.display(), png.len());
    Ok(())
}

/// Writes PNG bytes into the configured export directory under a
/// timestamped name. Returns the path written.
pub fn save_to_directory(png: &[u8], config: &ExportConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&expand_tilde(&config.directory))?;
    let file_path = directory.join(generate_filename(&config.filename_template, "png")?);
    write_png(&file_path, png)?;
    Ok(file_path)
}
