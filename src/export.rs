//! Writing the rendered drawing to disk.

use crate::config::ExportConfig;
use crate::draw::{CanvasRenderer, RenderError};
use chrono::Local;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write drawing: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Generate a file name from a chrono format template and the current time.
pub fn generate_filename(template: &str, extension: &str) -> String {
    let stem = Local::now().format(template).to_string();
    format!("{stem}.{extension}")
}

/// Creates `directory` if needed and returns its canonical form.
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

/// Default export directory: `<pictures>/LowCalorieDraw`, or the home directory
/// when there is no pictures directory.
pub fn default_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("LowCalorieDraw")
}

/// Path for a new export according to `config`.
pub fn timestamped_path(config: &ExportConfig) -> Result<PathBuf, ExportError> {
    let directory = config.directory.clone().unwrap_or_else(default_directory);
    let directory = ensure_directory_exists(&directory)?;
    Ok(directory.join(generate_filename(&config.filename_template, "png")))
}

/// Encodes the renderer's surface as PNG at `path`, creating parent directories.
pub fn save_png(renderer: &CanvasRenderer, path: &Path) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }

    let mut out = BufWriter::new(fs::File::create(path)?);
    renderer.write_png(&mut out)?;
    out.flush()?;

    let written = fs::metadata(path)?.len();
    log::info!("Saved drawing to {} ({} bytes)", path.display(), written);
    Ok(path.to_path_buf())
}
